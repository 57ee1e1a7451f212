#[macro_use]
extern crate tracing;

use clap::Parser;
use eyre::Result;
use minter::{handler, utils};

pub mod args;
pub mod cmd;

use args::{Minter, MinterSubcommand};

fn main() -> Result<()> {
    handler::install();
    utils::subscriber();
    let args = Minter::parse();
    main_args(args)
}

#[tokio::main]
async fn main_args(args: Minter) -> Result<()> {
    match args.cmd {
        MinterSubcommand::Serve(cmd) => cmd.run(args.config.as_deref()).await,
        MinterSubcommand::Mint(cmd) => cmd.run(args.config.as_deref()).await,
    }
}
