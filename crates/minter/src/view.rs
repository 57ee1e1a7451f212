use alloy_primitives::Address;
use minter_config::MinterConfig;
use minter_wallets::Session;
use serde::Serialize;

use crate::controller::{ControllerState, MintRequest};

/// Spinner id while idle.
pub const SPINNER: &str = "spinning-btn";
/// Spinner id while a mint is in flight.
pub const SPINNER_FAST: &str = "spinning-btn-faster";

/// What the top-right connect button shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectButton {
    /// An account is connected.
    Hidden,
    Label,
    /// Shown while the pointer is over the button.
    WalletIcon,
}

/// Color of the ring around the mint button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ring {
    Red,
    Indigo,
    Green,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SuccessBanner {
    pub text: String,
    pub href: String,
}

/// Everything the page renders, recomputed from controller state on every read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct View {
    pub state: ControllerState,
    pub account: Option<Address>,
    pub chain_id: Option<String>,
    pub wrong_network: bool,
    pub request: MintRequest,
    pub connect_button: ConnectButton,
    pub spinner: &'static str,
    pub ring: Ring,
    pub mint_enabled: bool,
    pub error_banner: Option<String>,
    pub success_banner: Option<SuccessBanner>,
}

impl View {
    pub fn new(
        config: &MinterConfig,
        state: ControllerState,
        session: Option<&Session>,
        request: &MintRequest,
        show_icon: bool,
    ) -> Self {
        let connected = session.is_some();

        let connect_button = match (connected, show_icon) {
            (true, _) => ConnectButton::Hidden,
            (false, true) => ConnectButton::WalletIcon,
            (false, false) => ConnectButton::Label,
        };
        let ring = if request.success_message.is_some() {
            Ring::Green
        } else if !connected {
            Ring::Red
        } else {
            Ring::Indigo
        };

        let error_banner = request.error_message.as_ref().map(|msg| format!("{msg}."));
        let success_banner = request.success_message.as_ref().map(|msg| SuccessBanner {
            text: format!("{msg}."),
            href: config.transaction_url(request.transaction_hash.as_deref().unwrap_or_default()),
        });

        Self {
            state,
            account: session.map(|s| s.account),
            chain_id: session.map(|s| s.chain_id.clone()),
            wrong_network: session.is_some_and(|s| !config.chain_id.matches(&s.chain_id)),
            request: request.clone(),
            connect_button,
            spinner: if request.is_minting { SPINNER_FAST } else { SPINNER },
            ring,
            mint_enabled: !request.is_minting,
            error_banner,
            success_banner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Activity;
    use alloy_primitives::address;
    use similar_asserts::assert_eq;

    fn session(chain_id: &str) -> Session {
        Session {
            account: address!("0xABC0000000000000000000000000000000000001"),
            chain_id: chain_id.to_string(),
        }
    }

    #[test]
    fn disconnected() {
        let config = MinterConfig::default();
        let view =
            View::new(&config, ControllerState::Disconnected, None, &MintRequest::default(), false);
        assert_eq!(view.connect_button, ConnectButton::Label);
        assert_eq!(view.ring, Ring::Red);
        assert_eq!(view.spinner, SPINNER);
        assert!(view.mint_enabled);
        assert!(!view.wrong_network);

        let hovered =
            View::new(&config, ControllerState::Disconnected, None, &MintRequest::default(), true);
        assert_eq!(hovered.connect_button, ConnectButton::WalletIcon);
    }

    #[test]
    fn connected_hides_button() {
        let config = MinterConfig::default();
        let session = session("0x5");
        let view = View::new(
            &config,
            ControllerState::Connected(Activity::Idle),
            Some(&session),
            &MintRequest::default(),
            true,
        );
        assert_eq!(view.connect_button, ConnectButton::Hidden);
        assert_eq!(view.ring, Ring::Indigo);
        assert_eq!(view.chain_id.as_deref(), Some("0x5"));
        assert!(!view.wrong_network);
    }

    #[test]
    fn minting_spins_faster() {
        let config = MinterConfig::default();
        let session = session("0x1");
        let request = MintRequest { is_minting: true, ..Default::default() };
        let view = View::new(
            &config,
            ControllerState::Connected(Activity::Minting),
            Some(&session),
            &request,
            false,
        );
        assert_eq!(view.spinner, SPINNER_FAST);
        assert!(!view.mint_enabled);
        assert!(view.wrong_network);
    }

    #[test]
    fn banners() {
        let config = MinterConfig::default();
        let session = session("0x5");
        let success = MintRequest {
            transaction_hash: Some("0xdeadbeef".into()),
            success_message: Some("Mining successful. Hash: 0xdeadbeef".into()),
            ..Default::default()
        };
        let view = View::new(
            &config,
            ControllerState::Connected(Activity::Success),
            Some(&session),
            &success,
            false,
        );
        assert_eq!(view.ring, Ring::Green);
        assert_eq!(
            view.success_banner,
            Some(SuccessBanner {
                text: "Mining successful. Hash: 0xdeadbeef.".into(),
                href: "https://goerli.etherscan.io/tx/0xdeadbeef".into(),
            })
        );
        assert_eq!(view.error_banner, None);

        let failure =
            MintRequest { error_message: Some("insufficient funds".into()), ..Default::default() };
        let view = View::new(
            &config,
            ControllerState::Connected(Activity::Error),
            Some(&session),
            &failure,
            false,
        );
        assert_eq!(view.error_banner.as_deref(), Some("insufficient funds."));
        assert_eq!(view.success_banner, None);
        assert_eq!(view.ring, Ring::Indigo);
    }
}
