//! How the `minter` binary reports errors.

use crate::errors::dedup_chain;
use eyre::EyreHandler;
use itertools::Itertools;
use std::{error::Error, fmt};

/// Prints an error as its deduplicated cause chain, or defers to `color-eyre` when verbose.
struct Handler {
    verbose: Option<Box<dyn EyreHandler>>,
}

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", dedup_chain(error).iter().format("; "))
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(verbose) = &self.verbose {
            return verbose.debug(error, f);
        }

        let mut chain = dedup_chain(error).into_iter();
        if let Some(error) = chain.next() {
            f.write_str(&error)?;
        }
        for cause in chain {
            write!(f, "\n  caused by: {cause}")?;
        }
        Ok(())
    }
}

/// Installs the minter [`eyre`] and [`panic`](mod@std::panic) hooks as the global ones.
///
/// Set `MINTER_DEBUG` for the verbose `color-eyre` report. Panics always go through
/// `color-eyre`.
pub fn install() {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    panic_hook.install();
    let eyre_hook = eyre_hook.into_eyre_hook();
    let verbose = std::env::var_os("MINTER_DEBUG").is_some();
    if let Err(e) = eyre::set_hook(Box::new(move |e| {
        Box::new(Handler { verbose: verbose.then(|| eyre_hook(e)) })
    })) {
        debug!("failed to install eyre error hook: {e}");
    }
}
