use serde::{Deserialize, Serialize};

/// An error object as returned by an EIP-1193 provider or a JSON-RPC node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

impl RpcErrorObject {
    /// EIP-1193 code for a request the user rejected.
    pub const USER_REJECTED: i64 = 4001;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// No injected wallet provider exists.
    #[error("no wallet provider is installed")]
    NotInstalled,
    /// The provider answered with an error; only its message is displayed so it can be shown
    /// to the user verbatim.
    #[error("{message}")]
    Rpc { code: i64, message: String },
    #[error("invalid `{method}` response: {source}")]
    InvalidResponse {
        method: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode `{method}` params: {source}")]
    InvalidParams {
        method: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ProviderError {
    /// Returns true if the user declined the request in the wallet.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::Rpc { code, .. } if *code == RpcErrorObject::USER_REJECTED)
    }
}

impl From<RpcErrorObject> for ProviderError {
    fn from(err: RpcErrorObject) -> Self {
        Self::Rpc { code: err.code, message: err.message }
    }
}
