/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed identifier of the persisted session slot
pub(crate) const STORAGE_KEY: &str = "study-sessions";

/// Directory name used under the platform config/data dirs
pub(crate) const APP_DIR: &str = "studytrack";
