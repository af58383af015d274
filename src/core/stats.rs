//! Statistics over the full session list

use serde::Serialize;

use crate::core::types::Session;

/// Summary over the full session list, independent of the current view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub(crate) struct Statistics {
    pub(crate) total_sessions: usize,
    pub(crate) total_minutes: u64,
    pub(crate) completed_count: usize,
    pub(crate) pending_count: usize,
    /// Whole percent, 0 for an empty list
    pub(crate) completion_rate: u32,
}

impl Statistics {
    pub(crate) fn from_sessions(sessions: &[Session]) -> Self {
        let total_sessions = sessions.len();
        let total_minutes = sessions.iter().map(|s| u64::from(s.duration)).sum();
        let completed_count = sessions.iter().filter(|s| s.completed).count();
        let completion_rate = if total_sessions == 0 {
            0
        } else {
            (completed_count as f64 / total_sessions as f64 * 100.0).round() as u32
        };

        Statistics {
            total_sessions,
            total_minutes,
            completed_count,
            pending_count: total_sessions - completed_count,
            completion_rate,
        }
    }
}
