//! Sample sessions shown when nothing is stored

use crate::core::types::Session;

fn seed_session(id: u64, subject: &str, duration: u32, date: &str, completed: bool) -> Session {
    Session {
        id,
        subject: subject.to_string(),
        duration,
        date: date.to_string(),
        notes: String::new(),
        completed,
    }
}

/// Fallback list used when nothing usable is persisted
pub(crate) fn seed_sessions() -> Vec<Session> {
    vec![
        seed_session(1, "Data Structures & Algorithms", 60, "2025-12-10", false),
        seed_session(2, "DBMS Revision", 45, "2025-12-11", true),
        seed_session(3, "Operating Systems", 30, "2025-12-12", false),
    ]
}
