use std::sync::Arc;

use parking_lot::Mutex;

use super::SnapshotStore;
use crate::error::AppError;

/// In-process store. Clones share the same slot, so a test can keep a handle
/// and inspect what the session saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<String>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with a blob, as if saved by an earlier run.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let store = Self::default();
        *store.slot.lock() = Some(blob.into());
        store
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.lock().clone()
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&mut self) -> Result<Option<String>, AppError> {
        Ok(self.slot.lock().clone())
    }

    fn save(&mut self, blob: &str) -> Result<(), AppError> {
        *self.slot.lock() = Some(blob.to_string());
        *self.saves.lock() += 1;
        Ok(())
    }
}
