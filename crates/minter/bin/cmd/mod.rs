use eyre::{Result, bail};
use figment::providers::Serialized;
use minter_config::MinterConfig;
use serde::Serialize;
use std::path::Path;

pub mod mint;
pub mod serve;

/// Loads the config, with `overrides` from the command line taking precedence.
///
/// An explicitly passed config file must exist.
pub fn load_config(path: Option<&Path>, overrides: impl Serialize) -> Result<MinterConfig> {
    let figment = match path {
        Some(path) => {
            if !path.is_file() {
                bail!("config file {} does not exist", path.display());
            }
            MinterConfig::figment_with_file(path)
        }
        None => MinterConfig::figment(),
    };
    let config = MinterConfig::try_from(figment.merge(Serialized::defaults(overrides)))?;
    trace!(?config, "loaded config");
    Ok(config)
}
