//! Bridge to a wallet injected into a browser page.
//!
//! Provider calls are queued here; the served page polls `GET /request`, forwards each request
//! to `window.ethereum.request(...)` and posts the outcome to `POST /response`. On load the page
//! reports through `POST /provider` whether it found an injected wallet at all.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::Router;
use serde_json::Value;
use uuid::Uuid;

use crate::{error::ProviderError, provider::Eip1193Provider};

mod handlers;
mod queue;
mod router;
mod state;
mod types;

pub use router::{SESSION_TOKEN_HEADER, require_session_token};
pub use types::{BridgeRequest, BridgeResponse, BrowserApiResponse, ProviderStatus};

use state::BrowserWalletState;

/// An [`Eip1193Provider`] backed by the wallet of the page connected to the bridge.
#[derive(Clone, Debug)]
pub struct BrowserProvider {
    state: Arc<BrowserWalletState>,
    poll_interval: Duration,
}

impl Default for BrowserProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserProvider {
    pub fn new() -> Self {
        Self { state: Arc::new(BrowserWalletState::new()), poll_interval: Duration::from_millis(100) }
    }

    /// Sets how often an outstanding request checks for the page's response.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// The token the page must send in [`SESSION_TOKEN_HEADER`].
    pub fn session_token(&self) -> Arc<String> {
        self.state.session_token()
    }

    /// The bridge API, to be nested by the app serving the page.
    pub fn router(&self) -> Router {
        router::build_router(self.state.clone())
    }

    /// Whether the page found an injected wallet, `None` until it reports.
    pub fn is_available(&self) -> Option<bool> {
        self.state.provider_available()
    }

    /// Number of requests the page has not answered yet.
    pub fn pending_requests(&self) -> usize {
        self.state.pending_requests()
    }
}

#[async_trait]
impl Eip1193Provider for BrowserProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        if self.state.provider_available() == Some(false) {
            return Err(ProviderError::NotInstalled);
        }

        let id = Uuid::new_v4();
        trace!(%id, method, "queue browser request");
        self.state.add_request(BridgeRequest { id, method: method.to_string(), params });
        let _pending = PendingRequest { state: &self.state, id };

        loop {
            if let Some(response) = self.state.get_response(&id) {
                return match response.error {
                    Some(err) => Err(err.into()),
                    None => Ok(response.result.unwrap_or(Value::Null)),
                };
            }

            if self.state.provider_available() == Some(false) {
                return Err(ProviderError::NotInstalled);
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Withdraws a queued request once its caller stops waiting, answered or not.
struct PendingRequest<'a> {
    state: &'a BrowserWalletState,
    id: Uuid,
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        self.state.discard(&self.id);
    }
}
