use crate::core::{Session, Statistics};

/// Derived view as a JSON array
pub(crate) fn output_sessions_json(view: &[Session]) -> String {
    serde_json::to_string_pretty(view).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to serialize sessions");
        "[]".to_string()
    })
}

pub(crate) fn output_session_json(session: &Session) -> String {
    serde_json::to_string_pretty(session).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to serialize session");
        "{}".to_string()
    })
}

pub(crate) fn output_stats_json(stats: &Statistics) -> String {
    serde_json::to_string_pretty(stats).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to serialize statistics");
        "{}".to_string()
    })
}
