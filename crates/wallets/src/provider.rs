//! The [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193) provider seam.

use alloy_primitives::{Address, U64};
use alloy_rpc_types_eth::{Filter, Log, TransactionRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::fmt;

use crate::error::ProviderError;

/// An Ethereum provider in the shape browsers inject as `window.ethereum`.
///
/// Implementors only supply [`request`](Self::request); the typed helpers decode the handful of
/// methods the minter issues.
#[async_trait]
pub trait Eip1193Provider: fmt::Debug + Send + Sync {
    /// Issues a raw `request({ method, params })` call.
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;

    /// `eth_accounts`: accounts the user already authorized, without prompting.
    async fn accounts(&self) -> Result<Vec<Address>, ProviderError> {
        let method = "eth_accounts";
        decode(method, self.request(method, json!([])).await?)
    }

    /// `eth_requestAccounts`: prompts the user to authorize an account.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        let method = "eth_requestAccounts";
        decode(method, self.request(method, json!([])).await?)
    }

    /// `eth_chainId`, returned verbatim as the wallet reports it.
    async fn chain_id(&self) -> Result<String, ProviderError> {
        let method = "eth_chainId";
        decode(method, self.request(method, json!([])).await?)
    }

    /// `eth_sendTransaction`: has the wallet sign and broadcast `tx`, returning its hash.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<String, ProviderError> {
        let method = "eth_sendTransaction";
        let params = encode(method, [tx])?;
        decode(method, self.request(method, params).await?)
    }

    /// `eth_getTransactionReceipt`, `None` while the transaction is pending.
    async fn transaction_receipt(
        &self,
        hash: &str,
    ) -> Result<Option<TransactionReceipt>, ProviderError> {
        let method = "eth_getTransactionReceipt";
        decode(method, self.request(method, json!([hash])).await?)
    }

    /// `eth_blockNumber`.
    async fn block_number(&self) -> Result<u64, ProviderError> {
        let method = "eth_blockNumber";
        let number: U64 = decode(method, self.request(method, json!([])).await?)?;
        Ok(number.to())
    }

    /// `eth_getLogs`.
    async fn logs(&self, filter: &Filter) -> Result<Vec<Log>, ProviderError> {
        let method = "eth_getLogs";
        let params = encode(method, [filter])?;
        decode(method, self.request(method, params).await?)
    }
}

/// The subset of a transaction receipt the minter inspects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `0x1` on success, `0x0` if execution reverted. Absent before byzantium.
    #[serde(default)]
    pub status: Option<U64>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.is_none_or(|status| status == U64::from(1))
    }
}

fn decode<T: DeserializeOwned>(method: &str, value: Value) -> Result<T, ProviderError> {
    serde_json::from_value(value)
        .map_err(|source| ProviderError::InvalidResponse { method: method.to_string(), source })
}

fn encode<T: Serialize>(method: &str, params: T) -> Result<Value, ProviderError> {
    serde_json::to_value(params)
        .map_err(|source| ProviderError::InvalidParams { method: method.to_string(), source })
}
