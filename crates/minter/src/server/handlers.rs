use axum::{
    Json,
    extract::State,
    http::{HeaderValue, header},
    response::{Html, IntoResponse},
};
use minter_wallets::wallet_browser::BrowserApiResponse;
use serde::{Deserialize, Serialize};

use super::{AppState, INDEX_HTML, SESSION_TOKEN_PLACEHOLDER};
use crate::view::View;

/// Pointer state of the connect button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hover {
    pub show_icon: bool,
}

pub(crate) async fn serve_index(State(state): State<AppState>) -> impl IntoResponse {
    let page = INDEX_HTML.replace(SESSION_TOKEN_PLACEHOLDER, &state.session_token);
    (
        [(header::CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"))],
        Html(page),
    )
}

pub(crate) async fn get_view(State(state): State<AppState>) -> Json<BrowserApiResponse<View>> {
    Json(BrowserApiResponse::Ok(state.controller.view()))
}

/// Looks for an authorized account in the background; the page picks the result up from the view.
pub(crate) async fn post_load(State(state): State<AppState>) -> Json<BrowserApiResponse> {
    tokio::spawn(async move {
        state.controller.load().await;
    });
    Json(BrowserApiResponse::ok())
}

pub(crate) async fn post_connect(State(state): State<AppState>) -> Json<BrowserApiResponse> {
    tokio::spawn(async move {
        state.controller.connect().await;
    });
    Json(BrowserApiResponse::ok())
}

pub(crate) async fn post_mint(State(state): State<AppState>) -> Json<BrowserApiResponse> {
    match state.controller.start_mint() {
        Ok(()) => Json(BrowserApiResponse::ok()),
        Err(err) => Json(BrowserApiResponse::error(err.to_string())),
    }
}

pub(crate) async fn post_hover(
    State(state): State<AppState>,
    Json(hover): Json<Hover>,
) -> Json<BrowserApiResponse> {
    state.controller.set_hover(hover.show_icon);
    Json(BrowserApiResponse::ok())
}

pub(crate) async fn get_alerts(State(state): State<AppState>) -> Json<BrowserApiResponse<Vec<String>>> {
    Json(BrowserApiResponse::Ok(state.alerts.drain()))
}
