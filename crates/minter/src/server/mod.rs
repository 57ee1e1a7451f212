//! The local app serving the mint page.
//!
//! The page renders [`View`](crate::view::View)s polled from `GET /api/ui/view`, forwards clicks to
//! the other `/api/ui` routes, shows alerts drained from `GET /api/ui/alerts`, and runs the
//! wallet bridge nested under `/api/wallet`.

use std::{future::Future, sync::Arc};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use minter_config::MinterConfig;
use minter_wallets::{AlertQueue, BrowserProvider, WalletGateway, wallet_browser};
use tokio::net::TcpListener;

use crate::{
    contract::{ContractError, MintContract},
    controller::Controller,
};

mod handlers;

const INDEX_HTML: &str = include_str!("assets/index.html");

/// Placeholder in [`INDEX_HTML`] replaced with the session token.
const SESSION_TOKEN_PLACEHOLDER: &str = "__SESSION_TOKEN__";

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    controller: Arc<Controller>,
    alerts: AlertQueue,
    session_token: Arc<String>,
}

/// The controller wired to the page's wallet through the browser bridge.
#[derive(Clone, Debug)]
pub struct MinterServer {
    state: AppState,
    bridge: BrowserProvider,
}

impl MinterServer {
    pub fn new(config: MinterConfig) -> Result<Self, ContractError> {
        let bridge = BrowserProvider::new();
        let alerts = AlertQueue::new();
        let contract = MintContract::from_config(&config)?;
        let gateway =
            WalletGateway::new(Some(Arc::new(bridge.clone())), Arc::new(alerts.clone()), &config);
        let controller = Arc::new(Controller::new(gateway, contract, config));
        let session_token = bridge.session_token();
        Ok(Self { state: AppState { controller, alerts, session_token }, bridge })
    }

    pub fn controller(&self) -> &Arc<Controller> {
        &self.state.controller
    }

    /// The token every `/api` request must carry, embedded in the served page.
    pub fn session_token(&self) -> Arc<String> {
        self.state.session_token.clone()
    }

    pub fn router(&self) -> Router {
        let ui = Router::new()
            .route("/view", get(handlers::get_view))
            .route("/load", post(handlers::post_load))
            .route("/connect", post(handlers::post_connect))
            .route("/mint", post(handlers::post_mint))
            .route("/hover", post(handlers::post_hover))
            .route("/alerts", get(handlers::get_alerts))
            .route_layer(middleware::from_fn_with_state(
                self.state.session_token.clone(),
                wallet_browser::require_session_token,
            ))
            .with_state(self.state.clone());

        Router::new()
            .route("/", get(handlers::serve_index))
            .with_state(self.state.clone())
            .nest("/api/ui", ui)
            .nest("/api/wallet", self.bridge.router())
    }

    /// Serves the app on `listener` until `shutdown` resolves.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> std::io::Result<()> {
        debug!(addr = ?listener.local_addr(), "serving minter page");
        axum::serve(listener, self.router()).with_graceful_shutdown(shutdown).await
    }
}
