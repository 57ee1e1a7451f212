use std::sync::Arc;

use axum::{Json, extract::State};

use crate::wallet_browser::{
    state::BrowserWalletState,
    types::{BridgeRequest, BridgeResponse, BrowserApiResponse, ProviderStatus},
};

/// The page reports whether `window.ethereum` exists.
pub(crate) async fn post_provider_status(
    State(state): State<Arc<BrowserWalletState>>,
    Json(status): Json<ProviderStatus>,
) -> Json<BrowserApiResponse> {
    debug!(available = status.available, "page reported injected provider");
    state.set_provider_available(status.available);
    Json(BrowserApiResponse::ok())
}

/// Hands the oldest outstanding provider request to the page.
pub(crate) async fn get_next_request(
    State(state): State<Arc<BrowserWalletState>>,
) -> Json<BrowserApiResponse<BridgeRequest>> {
    match state.read_next_request() {
        Some(request) => Json(BrowserApiResponse::Ok(request)),
        None => Json(BrowserApiResponse::error("No pending request")),
    }
}

/// Accepts the page's answer to a provider request.
pub(crate) async fn post_response(
    State(state): State<Arc<BrowserWalletState>>,
    Json(response): Json<BridgeResponse>,
) -> Json<BrowserApiResponse> {
    if !state.has_request(&response.id) {
        return Json(BrowserApiResponse::error("Unknown request id"));
    }
    trace!(id = %response.id, failed = response.error.is_some(), "page answered request");
    state.add_response(response);
    Json(BrowserApiResponse::ok())
}
