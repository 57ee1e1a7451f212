use alloy_primitives::Address;
use clap::Parser;
use eyre::{OptionExt, Result};
use minter::MintContract;
use minter_wallets::{Eip1193Provider, HttpProvider, StderrNotifier, WalletGateway};
use serde::Serialize;
use std::{path::Path, sync::Arc};

use super::load_config;

/// CLI arguments for `minter mint`.
#[derive(Clone, Debug, Parser, Serialize)]
pub struct MintArgs {
    /// The RPC endpoint of a node that signs for `--from`.
    #[arg(long, env = "ETH_RPC_URL", value_name = "URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,

    /// The account to mint from.
    ///
    /// Defaults to the node's first account.
    #[arg(long, value_name = "ADDRESS")]
    #[serde(skip)]
    pub from: Option<Address>,
}

impl MintArgs {
    pub async fn run(self, config_path: Option<&Path>) -> Result<()> {
        let config = load_config(config_path, &self)?;
        let rpc_url = config
            .rpc_url
            .as_deref()
            .ok_or_eyre("no RPC URL configured, pass --rpc-url or set `rpc_url` in minter.toml")?;
        let provider: Arc<dyn Eip1193Provider> = Arc::new(HttpProvider::new(rpc_url)?);

        let gateway = WalletGateway::new(Some(provider.clone()), Arc::new(StderrNotifier), &config);
        let session = gateway.authorized_account().await;
        let from = self
            .from
            .or(session.map(|s| s.account))
            .ok_or_eyre("the node has no unlocked accounts, pass --from")?;

        let contract = Arc::new(MintContract::from_config(&config)?);
        let binding = contract.bind(provider, from, config.poll_interval());
        let pending = binding.mint().await?;
        println!("Mining...please wait. Hash: {}", pending.hash());

        let hash = pending.confirmation().await?;
        println!("Mining successful. Hash: {hash}");
        println!("Mined, see transaction: {}", config.transaction_url(&hash));
        Ok(())
    }
}
