use clap::Parser;
use eyre::{Result, WrapErr};
use minter::MinterServer;
use serde::Serialize;
use std::{net::Ipv4Addr, path::Path};
use tokio::net::TcpListener;

use super::load_config;

/// CLI arguments for `minter serve`.
#[derive(Clone, Debug, Parser, Serialize)]
pub struct ServeArgs {
    /// Port to serve the mint page on.
    #[arg(long, short, value_name = "PORT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl ServeArgs {
    pub async fn run(self, config_path: Option<&Path>) -> Result<()> {
        let config = load_config(config_path, &self)?;
        let port = config.port;
        let server = MinterServer::new(config)?;

        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, port))
            .await
            .wrap_err_with(|| format!("failed to bind to port {port}"))?;
        let addr = listener.local_addr()?;
        println!("Mint page ready at http://{addr}");
        println!("Open it in a browser with a wallet extension installed. Press Ctrl+C to stop.");

        server
            .serve(listener, async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    error!(%err, "failed to listen for ctrl-c");
                }
            })
            .await?;
        Ok(())
    }
}
