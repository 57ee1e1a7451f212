use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};

use crate::wallet_browser::{handlers, state::BrowserWalletState};

/// Header carrying the per-process session token.
pub const SESSION_TOKEN_HEADER: &str = "X-Session-Token";

pub(crate) fn build_router(state: Arc<BrowserWalletState>) -> Router {
    Router::new()
        .route("/provider", post(handlers::post_provider_status))
        .route("/request", get(handlers::get_next_request))
        .route("/response", post(handlers::post_response))
        .route_layer(middleware::from_fn_with_state(state.session_token(), require_session_token))
        .with_state(state)
}

/// Rejects requests that do not carry the expected [`SESSION_TOKEN_HEADER`].
pub async fn require_session_token(
    State(expected): State<Arc<String>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let ok = req
        .headers()
        .get(SESSION_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected.as_str())
        .unwrap_or(false);

    if !ok {
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(req).await)
}
