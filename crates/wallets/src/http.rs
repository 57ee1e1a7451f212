//! EIP-1193 requests forwarded to a JSON-RPC node over HTTP.
//!
//! The node signs `eth_sendTransaction` itself, so this is only useful against nodes with
//! unlocked accounts, such as a local development node.

use async_trait::async_trait;
use reqwest::{Client, IntoUrl, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    error::{ProviderError, RpcErrorObject},
    provider::Eip1193Provider,
};

#[derive(Debug)]
pub struct HttpProvider {
    client: Client,
    url: Url,
    next_id: AtomicU64,
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

impl HttpProvider {
    pub fn new(url: impl IntoUrl) -> Result<Self, ProviderError> {
        Ok(Self { client: Client::new(), url: url.into_url()?, next_id: AtomicU64::new(1) })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Eip1193Provider for HttpProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        trace!(id, method, %params, "json-rpc request");

        let response: JsonRpcResponse = self
            .client
            .post(self.url.clone())
            .json(&JsonRpcRequest { jsonrpc: "2.0", id, method, params })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match response.error {
            Some(err) => Err(err.into()),
            None => Ok(response.result),
        }
    }
}
