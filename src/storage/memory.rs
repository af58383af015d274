use std::cell::{Cell, RefCell};
use std::path::PathBuf;

use crate::core::Session;
use crate::error::StorageError;

use super::{SessionStorage, decode_sessions};

/// In-memory slot with a switch to simulate a broken backend
#[derive(Debug, Default)]
pub(crate) struct MemoryStorage {
    slot: RefCell<Option<String>>,
    failing: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    pub(crate) fn with_raw(raw: &str) -> Self {
        let storage = MemoryStorage::default();
        storage.slot.replace(Some(raw.to_string()));
        storage
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub(crate) fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.get()
    }
}

fn offline() -> StorageError {
    StorageError::Write {
        path: PathBuf::from("<memory>"),
        source: std::io::Error::other("memory slot offline"),
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Option<Vec<Session>> {
        if self.failing.get() {
            return None;
        }
        let raw = self.slot.borrow();
        let document = serde_json::from_str(raw.as_deref()?).ok()?;
        decode_sessions(document)
    }

    fn save(&self, sessions: &[Session]) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(offline());
        }
        self.slot.replace(Some(serde_json::to_string(sessions)?));
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(offline());
        }
        self.slot.replace(None);
        Ok(())
    }
}
