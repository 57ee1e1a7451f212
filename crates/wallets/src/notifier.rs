use parking_lot::Mutex;
use std::{collections::VecDeque, fmt, sync::Arc};

/// Sink for user-facing alerts, the page's `alert()`.
pub trait Notifier: fmt::Debug + Send + Sync {
    fn alert(&self, message: &str);
}

/// Buffers alerts until the page polls for them.
#[derive(Clone, Debug, Default)]
pub struct AlertQueue {
    alerts: Arc<Mutex<VecDeque<String>>>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes all pending alerts, oldest first.
    pub fn drain(&self) -> Vec<String> {
        self.alerts.lock().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.lock().is_empty()
    }
}

impl Notifier for AlertQueue {
    fn alert(&self, message: &str) {
        debug!(%message, "queue alert");
        self.alerts.lock().push_back(message.to_string());
    }
}

/// Prints alerts to stderr, for headless use.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}
