use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::wallet_browser::{
    queue::RequestQueue,
    types::{BridgeRequest, BridgeResponse},
};

#[derive(Debug, Clone)]
pub(crate) struct BrowserWalletState {
    /// Whether the page found an injected provider, `None` until it reports.
    provider: Arc<Mutex<Option<bool>>>,
    /// Request/response queue for provider calls.
    requests: Arc<Mutex<RequestQueue<BridgeRequest, BridgeResponse>>>,
    /// Token the page must present on every API call.
    session_token: Arc<String>,
}

impl BrowserWalletState {
    /// Create a new browser wallet state.
    pub fn new() -> Self {
        Self {
            provider: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(RequestQueue::new())),
            session_token: Arc::new(Uuid::new_v4().simple().to_string()),
        }
    }

    pub fn session_token(&self) -> Arc<String> {
        self.session_token.clone()
    }

    /// Whether the page reported an injected provider.
    pub fn provider_available(&self) -> Option<bool> {
        *self.provider.lock()
    }

    pub fn set_provider_available(&self, available: bool) {
        *self.provider.lock() = Some(available);
    }

    /// Add a provider request.
    pub fn add_request(&self, request: BridgeRequest) {
        self.requests.lock().add_request(request);
    }

    /// Check if a request is still outstanding.
    pub fn has_request(&self, id: &Uuid) -> bool {
        self.requests.lock().has_request(id)
    }

    /// Read the next outstanding request.
    pub fn read_next_request(&self) -> Option<BridgeRequest> {
        self.requests.lock().read_request().cloned()
    }

    /// Add a response, retiring its request.
    pub fn add_response(&self, response: BridgeResponse) {
        let id = response.id;
        let mut requests = self.requests.lock();
        requests.add_response(id, response);
        requests.remove_request(&id);
    }

    /// Forget a request along with any response already posted for it.
    pub fn discard(&self, id: &Uuid) {
        let mut requests = self.requests.lock();
        requests.remove_request(id);
        requests.get_response(id);
    }

    /// Get a response, removing it from the queue.
    pub fn get_response(&self, id: &Uuid) -> Option<BridgeResponse> {
        self.requests.lock().get_response(id)
    }

    pub fn pending_requests(&self) -> usize {
        self.requests.lock().len()
    }
}
