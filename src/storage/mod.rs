//! Persistence adapters for the session list
//!
//! Persistence is best-effort: `load` returns `None` for anything it
//! cannot use, and callers log and ignore `save`/`clear` failures.

mod file;
#[cfg(test)]
mod memory;

use serde_json::Value;

use crate::core::Session;
use crate::error::StorageError;

pub(crate) use file::FileStorage;
#[cfg(test)]
pub(crate) use memory::MemoryStorage;

/// A single named slot holding the serialized session list
pub(crate) trait SessionStorage {
    /// Stored sessions, or `None` if the slot is empty or unusable
    fn load(&self) -> Option<Vec<Session>>;

    fn save(&self, sessions: &[Session]) -> Result<(), StorageError>;

    /// Remove the slot entirely
    fn clear(&self) -> Result<(), StorageError>;
}

/// Decode a stored document record by record. Only a non-array document is
/// unusable; records that fail to decode are skipped.
pub(crate) fn decode_sessions(document: Value) -> Option<Vec<Session>> {
    let Value::Array(records) = document else {
        tracing::warn!("stored sessions are not a list");
        return None;
    };

    let total = records.len();
    let sessions: Vec<Session> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping unreadable stored session");
                None
            }
        })
        .collect();
    if sessions.len() < total {
        tracing::warn!(kept = sessions.len(), total, "some stored sessions were skipped");
    }
    Some(sessions)
}
