//! Authoritative in-memory session list
//!
//! Records stay in insertion order. Every successful mutation bumps the
//! revision so derived views can tell when they are stale.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::types::{Session, SessionFields, ValidFields};
use crate::error::ValidationError;

/// Hands out strictly increasing session ids until `u64::MAX` is reached
#[derive(Debug, Clone)]
pub(crate) struct IdGenerator {
    next: Option<u64>,
}

impl IdGenerator {
    /// Start above both the wall clock (in ms) and every id already in use
    pub(crate) fn after(sessions: &[Session]) -> Self {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        let floor = match sessions.iter().map(|s| s.id).max() {
            Some(id) => id.checked_add(1),
            None => Some(0),
        };
        IdGenerator {
            next: floor.map(|floor| floor.max(now_ms)),
        }
    }

    /// `None` once the id space above the existing ids is used up
    pub(crate) fn next_id(&mut self) -> Option<u64> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }
}

/// Lowest id from 1 upward that no session holds
fn smallest_unused_id(sessions: &[Session]) -> u64 {
    let mut ids: Vec<u64> = sessions.iter().map(|s| s.id).collect();
    ids.sort_unstable();
    ids.dedup();
    let mut candidate = 1;
    for id in ids {
        if id > candidate {
            break;
        }
        if id == candidate {
            candidate += 1;
        }
    }
    candidate
}

#[derive(Debug, Clone)]
pub(crate) struct SessionStore {
    sessions: Vec<Session>,
    ids: IdGenerator,
    revision: u64,
}

impl SessionStore {
    pub(crate) fn new(sessions: Vec<Session>) -> Self {
        let ids = IdGenerator::after(&sessions);
        SessionStore {
            sessions,
            ids,
            revision: 0,
        }
    }

    pub(crate) fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub(crate) fn get(&self, id: u64) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Validate and append a new pending session
    pub(crate) fn create(&mut self, fields: &SessionFields) -> Result<&Session, ValidationError> {
        let valid = fields.validate()?;
        let id = self.ids.next_id().unwrap_or_else(|| {
            let id = smallest_unused_id(&self.sessions);
            tracing::warn!(id, "session ids exhausted above the largest one, reusing a gap");
            id
        });
        self.sessions.push(Session::from_valid(id, valid));
        self.revision += 1;
        Ok(&self.sessions[self.sessions.len() - 1])
    }

    /// Validate then replace the matching record's fields.
    /// Returns `Ok(false)` when no record has `id`.
    #[cfg(test)]
    pub(crate) fn update(&mut self, id: u64, fields: &SessionFields) -> Result<bool, ValidationError> {
        let valid = fields.validate()?;
        Ok(self.update_valid(id, valid))
    }

    pub(crate) fn update_valid(&mut self, id: u64, fields: ValidFields) -> bool {
        let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        session.apply(fields);
        self.revision += 1;
        true
    }

    /// Flip completion; returns the new value
    pub(crate) fn toggle_completed(&mut self, id: u64) -> Option<bool> {
        let session = self.sessions.iter_mut().find(|s| s.id == id)?;
        session.completed = !session.completed;
        self.revision += 1;
        Some(session.completed)
    }

    pub(crate) fn delete(&mut self, id: u64) -> Option<Session> {
        let index = self.sessions.iter().position(|s| s.id == id)?;
        self.revision += 1;
        Some(self.sessions.remove(index))
    }

    pub(crate) fn replace_all(&mut self, sessions: Vec<Session>) {
        self.ids = IdGenerator::after(&sessions);
        self.sessions = sessions;
        self.revision += 1;
    }
}
