//! # minter-wallets
//!
//! Wallet access for the minter, built around the
//! [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193) provider interface:
//! - [`Eip1193Provider`]: the injected provider seam
//! - [`WalletGateway`]: account discovery and authorization on top of a provider
//! - [`BrowserProvider`]: a provider backed by a wallet injected into the served page
//! - [`HttpProvider`]: a provider backed by a JSON-RPC node with unlocked accounts

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod error;
pub mod gateway;
pub mod http;
pub mod notifier;
pub mod provider;
pub mod wallet_browser;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{ProviderError, RpcErrorObject};
pub use gateway::{Session, WalletGateway};
pub use http::HttpProvider;
pub use notifier::{AlertQueue, Notifier, StderrNotifier};
pub use provider::{Eip1193Provider, TransactionReceipt};
pub use wallet_browser::BrowserProvider;
