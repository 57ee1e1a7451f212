//! The mint page state machine.

use alloy_primitives::U256;
use minter_config::MinterConfig;
use minter_wallets::{Session, WalletGateway};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

use crate::{
    contract::{ContractBinding, ContractError, MintCompleted, MintContract, Subscription},
    view::View,
};

/// Alert shown when minting before a wallet is connected.
pub const MINT_WITHOUT_WALLET: &str = "Please connect to your Metamask wallet.";

/// Where the controller is, derived from its fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "activity", rename_all = "snake_case")]
pub enum ControllerState {
    Disconnected,
    Connecting,
    Connected(Activity),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Idle,
    Minting,
    Success,
    Error,
}

/// Progress of the current mint attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MintRequest {
    pub is_minting: bool,
    pub transaction_hash: Option<String>,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl MintRequest {
    fn activity(&self) -> Activity {
        if self.is_minting {
            Activity::Minting
        } else if self.error_message.is_some() {
            Activity::Error
        } else if self.success_message.is_some() {
            Activity::Success
        } else {
            Activity::Idle
        }
    }
}

/// Why a mint click did not start an attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MintRejected {
    #[error("a mint is already in progress")]
    InFlight,
    #[error("no wallet connected")]
    NoWallet,
}

#[derive(Debug, Default)]
struct Inner {
    session: Option<Session>,
    connecting: bool,
    request: MintRequest,
    show_icon: bool,
    binding: Option<Arc<ContractBinding>>,
    subscription: Option<Subscription>,
    /// Bumped on every session reset; work started under an older epoch is discarded.
    epoch: u64,
}

/// Drives the page: connection, minting and the mint-completed listener.
///
/// All operations take `&self`; the state lock is never held across an `.await`.
#[derive(Debug)]
pub struct Controller {
    gateway: WalletGateway,
    contract: Arc<MintContract>,
    config: Arc<MinterConfig>,
    inner: Mutex<Inner>,
}

impl Controller {
    pub fn new(gateway: WalletGateway, contract: MintContract, config: MinterConfig) -> Self {
        Self {
            gateway,
            contract: Arc::new(contract),
            config: Arc::new(config),
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn config(&self) -> &MinterConfig {
        &self.config
    }

    pub fn gateway(&self) -> &WalletGateway {
        &self.gateway
    }

    /// Page load: starts from a blank page, then silently picks up an already authorized account
    /// and starts listening for mints.
    pub async fn load(&self) -> Option<Session> {
        let epoch = self.begin_session(false);
        self.restore(epoch).await
    }

    /// Prompts for an account; on success starts a fresh session with it.
    pub async fn connect(&self) -> Option<Session> {
        {
            let mut inner = self.inner.lock();
            if inner.connecting {
                return None;
            }
            inner.connecting = true;
        }

        match self.gateway.request_authorization().await {
            Some(account) => {
                debug!(%account, "Connected");
                let epoch = self.begin_session(true);
                self.restore(epoch).await
            }
            None => {
                self.inner.lock().connecting = false;
                None
            }
        }
    }

    /// Drops the session, the contract binding, the listener and any mint progress.
    pub fn reset_session(&self) {
        self.begin_session(false);
    }

    fn begin_session(&self, connecting: bool) -> u64 {
        let mut inner = self.inner.lock();
        let epoch = inner.epoch.wrapping_add(1);
        *inner = Inner { epoch, connecting, ..Default::default() };
        epoch
    }

    async fn restore(&self, epoch: u64) -> Option<Session> {
        let connected = match (self.gateway.authorized_account().await, self.gateway.provider()) {
            (Some(session), Some(provider)) => {
                let binding = Arc::new(self.contract.bind(
                    provider.clone(),
                    session.account,
                    self.config.poll_interval(),
                ));
                let subscription = binding.subscribe_mint_completed(self.on_mint_completed());
                Some((session, binding, subscription))
            }
            _ => None,
        };

        let mut inner = self.inner.lock();
        if inner.epoch != epoch {
            debug!("session reset while loading, discarding account");
            return None;
        }
        inner.connecting = false;
        let (session, binding, subscription) = connected?;
        debug!(account = %session.account, chain = %session.chain_id, "wallet connected");
        inner.session = Some(session.clone());
        inner.binding = Some(binding);
        inner.subscription = Some(subscription);
        Some(session)
    }

    pub fn set_hover(&self, show_icon: bool) {
        self.inner.lock().show_icon = show_icon;
    }

    /// Mints a token and waits for the transaction to be included.
    ///
    /// Returns the finished request; failures end up in its error message.
    pub async fn mint(&self) -> Result<MintRequest, MintRejected> {
        let (binding, epoch) = self.begin_mint()?;
        let outcome = mint_and_confirm(&binding).await;
        Ok(self.finish_mint(epoch, outcome))
    }

    /// Like [`Self::mint`], but returns as soon as the attempt started.
    pub fn start_mint(self: &Arc<Self>) -> Result<(), MintRejected> {
        let (binding, epoch) = self.begin_mint()?;
        let this = self.clone();
        tokio::spawn(async move {
            let outcome = mint_and_confirm(&binding).await;
            this.finish_mint(epoch, outcome);
        });
        Ok(())
    }

    pub fn state(&self) -> ControllerState {
        let inner = self.inner.lock();
        if inner.session.is_some() {
            ControllerState::Connected(inner.request.activity())
        } else if inner.connecting {
            ControllerState::Connecting
        } else {
            ControllerState::Disconnected
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.lock().session.clone()
    }

    pub fn request(&self) -> MintRequest {
        self.inner.lock().request.clone()
    }

    /// Whether the mint-completed listener is running.
    pub fn is_subscribed(&self) -> bool {
        self.inner.lock().subscription.as_ref().is_some_and(Subscription::is_active)
    }

    pub fn view(&self) -> View {
        let state = self.state();
        let inner = self.inner.lock();
        View::new(
            &self.config,
            state,
            inner.session.as_ref(),
            &inner.request,
            inner.show_icon,
        )
    }

    fn begin_mint(&self) -> Result<(Arc<ContractBinding>, u64), MintRejected> {
        let mut inner = self.inner.lock();
        if inner.request.is_minting {
            return Err(MintRejected::InFlight);
        }
        inner.request = MintRequest::default();

        let Some(binding) = inner.binding.clone() else {
            drop(inner);
            self.gateway.notifier().alert(MINT_WITHOUT_WALLET);
            return Err(MintRejected::NoWallet);
        };
        inner.request.is_minting = true;
        Ok((binding, inner.epoch))
    }

    fn finish_mint(&self, epoch: u64, outcome: Result<String, ContractError>) -> MintRequest {
        let request = match outcome {
            Ok(hash) => {
                debug!("Mined, see transaction: {}", self.config.transaction_url(&hash));
                MintRequest {
                    is_minting: false,
                    success_message: Some(format!("Mining successful. Hash: {hash}")),
                    transaction_hash: Some(hash),
                    error_message: None,
                }
            }
            Err(err) => {
                warn!(%err, "mint failed");
                MintRequest { error_message: Some(err.to_string()), ..Default::default() }
            }
        };

        let mut inner = self.inner.lock();
        if inner.epoch == epoch {
            inner.request = request.clone();
        } else {
            debug!("session reset while minting, discarding outcome");
        }
        request
    }

    fn on_mint_completed(&self) -> impl Fn(MintCompleted) + Send + Sync + 'static {
        let notifier = self.gateway.notifier().clone();
        let config = self.config.clone();
        move |event| {
            debug!(from = %event.from, token_id = %event.token_id, "mint completed");
            notifier.alert(&minted_message(&config, event.token_id));
        }
    }
}

async fn mint_and_confirm(binding: &ContractBinding) -> Result<String, ContractError> {
    binding.mint().await?.confirmation().await
}

/// The alert shown for every mint-completed event.
pub fn minted_message(config: &MinterConfig, token_id: U256) -> String {
    format!(
        "Hey there! We've minted your NFT and sent it to your wallet. It may be blank right now. \
         It can take a max of 10 min to show up on OpenSea. Here's the link: {}",
        config.token_url(token_id)
    )
}
