//! A scripted in-memory provider for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};

use crate::{
    error::{ProviderError, RpcErrorObject},
    provider::Eip1193Provider,
};

type Scripted = Result<Value, RpcErrorObject>;

/// Answers requests from per-method scripts.
///
/// One-shot responses queued with [`push_result`](Self::push_result) /
/// [`push_error`](Self::push_error) are consumed first; afterwards the sticky response set with
/// [`with_result`](Self::with_result) / [`with_error`](Self::with_error) is returned. Methods
/// without any script fail with `-32601 method not found`.
#[derive(Debug, Default)]
pub struct MockProvider {
    installed: bool,
    once: Mutex<HashMap<String, VecDeque<Scripted>>>,
    sticky: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self { installed: true, ..Default::default() }
    }

    /// A provider that behaves like a page without an injected wallet.
    pub fn not_installed() -> Self {
        Self { installed: false, ..Default::default() }
    }

    pub fn with_result(self, method: &str, result: Value) -> Self {
        self.sticky.lock().insert(method.to_string(), Ok(result));
        self
    }

    pub fn with_error(self, method: &str, code: i64, message: &str) -> Self {
        self.sticky.lock().insert(method.to_string(), Err(RpcErrorObject::new(code, message)));
        self
    }

    pub fn push_result(&self, method: &str, result: Value) {
        self.once.lock().entry(method.to_string()).or_default().push_back(Ok(result));
    }

    pub fn push_error(&self, method: &str, code: i64, message: &str) {
        self.once
            .lock()
            .entry(method.to_string())
            .or_default()
            .push_back(Err(RpcErrorObject::new(code, message)));
    }

    /// Every request seen so far, in order.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().clone()
    }

    /// Number of requests seen for `method`.
    pub fn count(&self, method: &str) -> usize {
        self.calls.lock().iter().filter(|(m, _)| m == method).count()
    }
}

#[async_trait]
impl Eip1193Provider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.calls.lock().push((method.to_string(), params));
        if !self.installed {
            return Err(ProviderError::NotInstalled);
        }

        let scripted = self
            .once
            .lock()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .or_else(|| self.sticky.lock().get(method).cloned())
            .unwrap_or_else(|| Err(RpcErrorObject::new(-32601, "method not found")));
        scripted.map_err(Into::into)
    }
}
