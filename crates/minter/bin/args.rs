use crate::cmd::{mint::MintArgs, serve::ServeArgs};
use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Mint an NFT from your browser wallet.
#[derive(Parser)]
#[command(name = "minter", version, next_display_order = None)]
pub struct Minter {
    /// Path to the config file.
    ///
    /// Defaults to `minter.toml` in the working directory, or `$MINTER_CONFIG`.
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: MinterSubcommand,
}

#[derive(Subcommand)]
pub enum MinterSubcommand {
    /// Serve the mint page.
    ///
    /// Open the printed URL in a browser with a wallet extension installed.
    #[command(visible_alias = "s")]
    Serve(ServeArgs),

    /// Mint without a browser, through a node with unlocked accounts.
    #[command(visible_alias = "m")]
    Mint(MintArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Minter::command().debug_assert();
    }

    #[test]
    fn parse_serve_port() {
        let args = Minter::parse_from(["minter", "serve", "--port", "8545", "--config", "a.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("a.toml")));
        match args.cmd {
            MinterSubcommand::Serve(serve) => assert_eq!(serve.port, Some(8545)),
            MinterSubcommand::Mint(_) => panic!("expected serve"),
        }
    }
}
