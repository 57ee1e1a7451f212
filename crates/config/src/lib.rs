//! # minter-config
//!
//! Minter configuration.
//!
//! Settings are layered, later layers winning:
//!
//! 1. built-in defaults ([`MinterConfig::default`])
//! 2. `minter.toml` in the project root, or the file named by `MINTER_CONFIG`
//! 3. `MINTER_*` environment variables
//!
//! Callers such as the CLI merge their own overrides on top of [`MinterConfig::figment`].

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use alloy_primitives::{Address, U256, address};
use figment::{
    Error, Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

mod error;
pub use error::{ExtractConfigError, FAILED_TO_EXTRACT_CONFIG_MSG, InvalidSetting};

/// Minter configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinterConfig {
    /// Address of the deployed NFT contract.
    pub contract_address: Address,
    /// Path to the contract ABI, either a bare ABI array or an artifact with an `abi` field.
    ///
    /// When unset, the built-in ABI describing the mint function and event is used.
    pub abi_path: Option<PathBuf>,
    /// Name of the zero-argument function that mints a token.
    pub mint_function: String,
    /// Name of the event emitted once a token has been minted.
    pub mint_event: String,
    /// The chain the contract is deployed on.
    pub chain_id: ChainIdentifier,
    /// Human readable name of [`Self::chain_id`], used in the wrong-network warning.
    pub network_name: String,
    /// Block explorer base URL, transaction links are `<explorer_url>/tx/<hash>`.
    pub explorer_url: String,
    /// Marketplace base URL, token links are `<marketplace_url>/<contract>/<token id>`.
    pub marketplace_url: String,
    /// Interval between receipt and event polls, in milliseconds. Must not be zero.
    pub poll_interval_ms: u64,
    /// Port the minter page is served on.
    pub port: u16,
    /// JSON-RPC endpoint used by headless mints.
    pub rpc_url: Option<String>,
}

impl MinterConfig {
    /// The default config file name.
    pub const FILE_NAME: &'static str = "minter.toml";

    /// The environment variable overriding the config file path.
    pub const CONFIG_ENV: &'static str = "MINTER_CONFIG";

    /// Prefix of environment variables overriding single settings.
    pub const ENV_PREFIX: &'static str = "MINTER_";

    /// The contract minted against when nothing else is configured.
    pub const DEFAULT_CONTRACT: Address = address!("0xd2061CaB2451d88bDe6d8bd5a3ce3656B91A5DeA");

    /// Returns the current `MinterConfig`, rooted at the working directory.
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment())
    }

    /// Returns the current `MinterConfig`, reading `minter.toml` from `root`.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment_with_root(root))
    }

    /// Attempts to extract a `MinterConfig` from `provider`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use figment::providers::{Format, Toml};
    /// use minter_config::MinterConfig;
    ///
    /// let figment = MinterConfig::figment().merge(Toml::file("other.toml"));
    /// let config = MinterConfig::try_from(figment);
    /// ```
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        let figment = Figment::from(provider);
        trace!("load config with provider: {:?}", figment.metadata().next());
        let config = figment.extract::<Self>().map_err(ExtractConfigError::new)?;
        if config.poll_interval_ms == 0 {
            return Err(ExtractConfigError::invalid_value(
                &figment,
                "poll_interval_ms",
                0,
                "expected a positive number of milliseconds",
            ));
        }
        Ok(config)
    }

    /// Returns the default figment rooted at the working directory.
    pub fn figment() -> Figment {
        Self::figment_with_root(".")
    }

    /// Returns the default figment, merging `minter.toml` found in `root` and the environment.
    ///
    /// `MINTER_CONFIG`, if set, names the config file instead.
    pub fn figment_with_root(root: impl AsRef<Path>) -> Figment {
        let toml = std::env::var_os(Self::CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| root.as_ref().join(Self::FILE_NAME));
        Self::figment_with_file(toml)
    }

    /// Returns the default figment, merging the config file at `path` and the environment.
    ///
    /// A missing file contributes nothing.
    pub fn figment_with_file(path: impl AsRef<Path>) -> Figment {
        Figment::from(Self::default())
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(Self::ENV_PREFIX).ignore(&["CONFIG"]))
    }

    /// Interval between receipt and event polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Block explorer link for a transaction hash.
    pub fn transaction_url(&self, hash: &str) -> String {
        format!("{}/tx/{hash}", self.explorer_url.trim_end_matches('/'))
    }

    /// Marketplace link for a minted token.
    pub fn token_url(&self, token_id: U256) -> String {
        format!(
            "{}/{}/{token_id}",
            self.marketplace_url.trim_end_matches('/'),
            self.contract_address
        )
    }

    /// Message shown when the wallet reports a chain other than [`Self::chain_id`].
    pub fn wrong_network_message(&self) -> String {
        format!("You are not connected to the {}!", self.network_name)
    }
}

impl Default for MinterConfig {
    fn default() -> Self {
        Self {
            contract_address: Self::DEFAULT_CONTRACT,
            abi_path: None,
            mint_function: "makeAnEpicNFT".to_string(),
            mint_event: "NewEpicNFTMinted".to_string(),
            chain_id: ChainIdentifier::GOERLI,
            network_name: "Goerli Test Network".to_string(),
            explorer_url: "https://goerli.etherscan.io".to_string(),
            marketplace_url: "https://testnets.opensea.io/assets".to_string(),
            poll_interval_ms: 4_000,
            port: 3000,
            rpc_url: None,
        }
    }
}

impl Provider for MinterConfig {
    fn metadata(&self) -> Metadata {
        Metadata::named("Minter Config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        Serialized::defaults(self).data()
    }
}

/// A chain identifier as reported by `eth_chainId`.
///
/// Serialized as a `0x`-prefixed hex string; deserialized from hex or decimal strings and
/// from plain integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChainIdentifier(pub u64);

impl ChainIdentifier {
    pub const GOERLI: Self = Self(5);

    /// Returns true if `reported`, as returned by the wallet, names this chain.
    pub fn matches(&self, reported: &str) -> bool {
        reported.parse::<Self>().is_ok_and(|id| id == *self)
    }
}

impl fmt::Display for ChainIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl FromStr for ChainIdentifier {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16).map(Self),
            None => s.parse().map(Self),
        }
    }
}

impl Serialize for ChainIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChainIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(u64),
            Str(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(id) => Ok(Self(id)),
            Repr::Str(s) => s.parse().map_err(de::Error::custom),
        }
    }
}
