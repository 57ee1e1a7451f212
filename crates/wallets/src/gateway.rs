use alloy_primitives::Address;
use minter_config::{ChainIdentifier, MinterConfig};
use std::sync::Arc;

use crate::{error::ProviderError, notifier::Notifier, provider::Eip1193Provider};

/// Alert shown when looking up accounts without an injected wallet.
pub const WALLET_MISSING: &str = "Make sure that metamask is installed.";

/// Alert shown when asking for authorization without an injected wallet.
pub const WALLET_INSTALL: &str = "Please install Metamask";

/// An authorized account together with the chain the wallet is on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub account: Address,
    pub chain_id: String,
}

/// Account access on top of an injected wallet provider.
#[derive(Clone, Debug)]
pub struct WalletGateway {
    provider: Option<Arc<dyn Eip1193Provider>>,
    notifier: Arc<dyn Notifier>,
    chain: ChainIdentifier,
    wrong_network: String,
}

impl WalletGateway {
    pub fn new(
        provider: Option<Arc<dyn Eip1193Provider>>,
        notifier: Arc<dyn Notifier>,
        config: &MinterConfig,
    ) -> Self {
        Self {
            provider,
            notifier,
            chain: config.chain_id,
            wrong_network: config.wrong_network_message(),
        }
    }

    pub fn provider(&self) -> Option<&Arc<dyn Eip1193Provider>> {
        self.provider.as_ref()
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Returns the first account the user already authorized, without prompting.
    ///
    /// Alerts if no wallet is installed, and warns (without failing) if the wallet is on a chain
    /// other than the configured one.
    pub async fn authorized_account(&self) -> Option<Session> {
        let Some(provider) = self.provider() else {
            self.notifier.alert(WALLET_MISSING);
            return None;
        };

        let accounts = match provider.accounts().await {
            Ok(accounts) => accounts,
            Err(ProviderError::NotInstalled) => {
                self.notifier.alert(WALLET_MISSING);
                return None;
            }
            Err(err) => {
                warn!(%err, "failed to read authorized accounts");
                return None;
            }
        };

        let chain_id = match provider.chain_id().await {
            Ok(chain_id) => chain_id,
            Err(err) => {
                warn!(%err, "failed to read chain id");
                return None;
            }
        };
        debug!("Connected to chain {chain_id}");

        if !self.chain.matches(&chain_id) {
            warn!(expected = %self.chain, actual = %chain_id, "wallet is on another network");
            self.notifier.alert(&self.wrong_network);
        }

        match accounts.first() {
            Some(&account) => Some(Session { account, chain_id }),
            None => {
                debug!("No account found.");
                None
            }
        }
    }

    /// Prompts the user to authorize an account.
    ///
    /// Rejections and provider failures are logged and yield `None`.
    pub async fn request_authorization(&self) -> Option<Address> {
        let Some(provider) = self.provider() else {
            self.notifier.alert(WALLET_INSTALL);
            return None;
        };

        match provider.request_accounts().await {
            Ok(accounts) => {
                let account = accounts.first().copied();
                if account.is_none() {
                    debug!("wallet authorized no accounts");
                }
                account
            }
            Err(ProviderError::NotInstalled) => {
                self.notifier.alert(WALLET_INSTALL);
                None
            }
            Err(err) => {
                if err.is_user_rejection() {
                    debug!(%err, "user rejected authorization");
                } else {
                    warn!(%err, "wallet authorization failed");
                }
                None
            }
        }
    }
}
