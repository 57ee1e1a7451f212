//! Config extraction errors
use figment::{Figment, Metadata};
use std::{error::Error, fmt};

/// The message shown when the config could not be extracted from the figment
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract minter config:";

/// A `MinterConfig` setting that was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidSetting {
    /// Dotted path of the setting, like `contract_address`.
    pub field: String,
    /// Where the offending value came from, such as the toml file or an environment variable.
    pub source: Option<String>,
    /// What is wrong with the value, including the value itself when known.
    pub reason: String,
}

impl InvalidSetting {
    fn from_figment(err: &figment::Error) -> Self {
        let field = if err.path.is_empty() { "<root>".to_string() } else { err.path.join(".") };
        Self { field, source: err.metadata.as_ref().map(describe), reason: err.kind.to_string() }
    }
}

impl fmt::Display for InvalidSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.field)?;
        if let Some(source) = &self.source {
            write!(f, " from {source}")?;
        }
        write!(f, ": {}", self.reason)
    }
}

fn describe(meta: &Metadata) -> String {
    match &meta.source {
        Some(source) => format!("{} `{source}`", meta.name),
        None => meta.name.to_string(),
    }
}

/// Represents a failed attempt to extract `MinterConfig` from a `Figment`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractConfigError {
    settings: Vec<InvalidSetting>,
}

impl ExtractConfigError {
    /// Collects every distinct setting figment failed on.
    pub fn new(error: figment::Error) -> Self {
        let mut settings: Vec<InvalidSetting> = Vec::with_capacity(error.count());
        for err in error {
            let setting = InvalidSetting::from_figment(&err);
            if !settings.contains(&setting) {
                settings.push(setting);
            }
        }
        Self { settings }
    }

    /// A value that deserialized but is not usable, blamed on whichever provider set it.
    pub(crate) fn invalid_value(
        figment: &Figment,
        field: &str,
        value: impl fmt::Display,
        reason: &str,
    ) -> Self {
        let setting = InvalidSetting {
            field: field.to_string(),
            source: figment.find_metadata(field).map(describe),
            reason: format!("invalid value {value}, {reason}"),
        };
        Self { settings: vec![setting] }
    }

    /// The rejected settings, in the order they were found.
    pub fn settings(&self) -> &[InvalidSetting] {
        &self.settings
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{FAILED_TO_EXTRACT_CONFIG_MSG}")?;
        for setting in &self.settings {
            writeln!(f, "    {setting}")?;
        }
        Ok(())
    }
}

impl Error for ExtractConfigError {}
