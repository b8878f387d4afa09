use std::sync::Mutex;

use crate::error::RelayError;

/// Sink for relay failures. Injected into [`super::Relay`] so failures can be
/// observed without capturing process-wide output.
pub trait RelayLog: Send + Sync {
    fn failure(&self, error: &RelayError);
}

/// Default sink writing to `tracing`.
pub struct TracingLog;

impl RelayLog for TracingLog {
    fn failure(&self, error: &RelayError) {
        if error.is_client_error() {
            tracing::warn!("Rejected contact submission: {error}");
        } else {
            tracing::error!("Contact relay failure: {error}");
        }
    }
}

/// Keeps failure messages in memory.
#[derive(Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<String>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }
}

impl RelayLog for MemoryLog {
    fn failure(&self, error: &RelayError) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(error.to_string());
        }
    }
}
