// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

use magicstream_core::RequestKey;
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::oneshot;
use uuid::Uuid;

/// Fires once when the call is superseded by a newer identical one.
pub type CancelSignal = oneshot::Receiver<()>;

struct PendingEntry {
    attempt_id: Uuid,
    cancel: oneshot::Sender<()>,
}

/// In-flight calls keyed by request identity. At most one entry per key.
pub struct PendingRequests {
    requests: Mutex<HashMap<RequestKey, PendingEntry>>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Registers `attempt_id` under `key`, cancelling whatever was there.
    /// Replace and cancel happen under a single lock acquisition.
    pub fn register(&self, key: RequestKey, attempt_id: Uuid) -> CancelSignal {
        let (cancel, signal) = oneshot::channel();
        let mut requests = self.requests.lock();
        if let Some(previous) = requests.insert(key, PendingEntry { attempt_id, cancel }) {
            tracing::debug!(
                "Cancelling superseded request attempt {}",
                previous.attempt_id
            );
            let _ = previous.cancel.send(());
        }
        signal
    }

    /// Removes the entry only if it still belongs to `attempt_id`; a superseded
    /// attempt never removes its replacement.
    pub fn complete(&self, key: &RequestKey, attempt_id: Uuid) -> bool {
        let mut requests = self.requests.lock();
        match requests.get(key) {
            Some(entry) if entry.attempt_id == attempt_id => {
                requests.remove(key);
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, key: &RequestKey) -> bool {
        self.requests.lock().contains_key(key)
    }

    pub fn count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Default for PendingRequests {
    fn default() -> Self {
        Self::new()
    }
}

/// Deregisters an attempt when dropped, whether it settled or the caller
/// abandoned the future.
pub(crate) struct SettleGuard<'a> {
    pub(crate) pending: &'a PendingRequests,
    pub(crate) key: RequestKey,
    pub(crate) attempt_id: Uuid,
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        self.pending.complete(&self.key, self.attempt_id);
    }
}
