//! Core module - session records, the store, derived views, and statistics

mod edit;
mod seed;
mod stats;
mod store;
mod tracker;
mod types;
mod view;

#[cfg(test)]
pub(crate) use seed::seed_sessions;
pub(crate) use stats::Statistics;
pub(crate) use tracker::Tracker;
pub(crate) use types::{Session, SessionFields};
pub(crate) use view::{SortDirection, SortKey, SortSpec, StatusFilter};
