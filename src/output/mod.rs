mod format;
mod json;
mod table;

pub(crate) use format::NumberFormat;
pub(crate) use json::{output_session_json, output_sessions_json, output_stats_json};
pub(crate) use table::{TableOptions, print_session_table, print_stats_table};
