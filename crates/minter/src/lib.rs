//! # minter
//!
//! Mint an NFT from a page connected to a browser wallet.
//!
//! - [`contract`]: the NFT contract binding, its mint call and mint-completed events
//! - [`controller`]: the page state machine
//! - [`view`]: what the page renders for a controller state
//! - [`server`]: the local app serving the page and the wallet bridge

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

// Used by the binary.
use clap as _;
use figment as _;

pub mod contract;
pub mod controller;
pub mod errors;
pub mod handler;
pub mod server;
pub mod utils;
pub mod view;

pub use contract::{ContractBinding, ContractError, MintCompleted, MintContract, Subscription};
pub use controller::{Activity, Controller, ControllerState, MintRejected, MintRequest};
pub use server::MinterServer;
pub use view::View;
