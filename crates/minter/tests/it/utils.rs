use std::{future::Future, sync::Arc, time::Duration};

use minter::MinterServer;
use minter_config::MinterConfig;
use minter_wallets::{
    Eip1193Provider, ProviderError, RpcErrorObject,
    mock::MockProvider,
    wallet_browser::{
        BridgeRequest, BridgeResponse, BrowserApiResponse, ProviderStatus, SESSION_TOKEN_HEADER,
    },
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::task::JoinHandle;

/// The minter app served on an ephemeral port.
#[derive(Clone)]
pub struct TestApp {
    pub server: MinterServer,
    pub client: reqwest::Client,
    pub base: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let config = MinterConfig { poll_interval_ms: 10, ..Default::default() };
        let server = MinterServer::new(config).unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = server.clone();
        tokio::spawn(async move { app.serve(listener, std::future::pending()).await.unwrap() });
        Self { server, client: reqwest::Client::new(), base: format!("http://{addr}") }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{path}", self.base))
            .header(SESSION_TOKEN_HEADER, self.server.session_token().as_str())
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{path}", self.base))
            .header(SESSION_TOKEN_HEADER, self.server.session_token().as_str())
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> T {
        self.get(path).send().await.unwrap().json().await.unwrap()
    }

    pub async fn post_json<T: DeserializeOwned>(&self, path: &str, body: &Value) -> T {
        self.post(path).json(body).send().await.unwrap().json().await.unwrap()
    }

    /// The current view as raw JSON.
    pub async fn view(&self) -> Value {
        match self.get_json::<BrowserApiResponse<Value>>("/api/ui/view").await {
            BrowserApiResponse::Ok(view) => view,
            BrowserApiResponse::Error { message } => panic!("view failed: {message}"),
        }
    }

    pub async fn alerts(&self) -> Vec<String> {
        match self.get_json::<BrowserApiResponse<Vec<String>>>("/api/ui/alerts").await {
            BrowserApiResponse::Ok(alerts) => alerts,
            BrowserApiResponse::Error { message } => panic!("alerts failed: {message}"),
        }
    }

    /// Reports the injected provider and, if there is one, starts forwarding bridge requests to
    /// it the way the page does.
    pub async fn open_page(&self, wallet: Option<MockProvider>) -> Option<JoinHandle<()>> {
        let status = ProviderStatus { available: wallet.is_some() };
        let resp: BrowserApiResponse =
            self.post_json("/api/wallet/provider", &serde_json::to_value(status).unwrap()).await;
        assert_eq!(resp, BrowserApiResponse::ok());

        let wallet = Arc::new(wallet?);
        let page = self.clone();
        Some(tokio::spawn(async move {
            loop {
                match page.get_json::<BrowserApiResponse<BridgeRequest>>("/api/wallet/request").await
                {
                    BrowserApiResponse::Ok(request) => {
                        let response = match wallet.request(&request.method, request.params).await {
                            Ok(result) => {
                                BridgeResponse { id: request.id, result: Some(result), error: None }
                            }
                            Err(ProviderError::Rpc { code, message }) => BridgeResponse {
                                id: request.id,
                                result: None,
                                error: Some(RpcErrorObject::new(code, message)),
                            },
                            Err(err) => panic!("unexpected wallet error: {err}"),
                        };
                        let _: BrowserApiResponse = page
                            .post_json("/api/wallet/response", &serde_json::to_value(response).unwrap())
                            .await;
                    }
                    BrowserApiResponse::Error { .. } => {
                        tokio::time::sleep(Duration::from_millis(10)).await
                    }
                }
            }
        }))
    }
}

/// Polls `f` until it returns true, failing after `timeout`.
pub async fn wait_for<F, Fut>(mut f: F, timeout: Duration)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while !f().await {
        assert!(tokio::time::Instant::now() < deadline, "timed out after {timeout:?}");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
