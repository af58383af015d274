//! Derived view pipeline: status filter, then search, then stable sort
//!
//! Always works on a borrowed snapshot and returns a fresh vector.

use std::cmp::Ordering;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Deserialize;

use crate::consts::DATE_FORMAT;
use crate::core::types::Session;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum StatusFilter {
    /// Every session (default)
    #[default]
    All,
    /// Only completed sessions
    Completed,
    /// Only sessions not yet completed
    Pending,
}

impl StatusFilter {
    pub(crate) fn matches(self, session: &Session) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => session.completed,
            StatusFilter::Pending => !session.completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SortKey {
    /// Case-insensitive subject
    Subject,
    /// Minutes studied
    Duration,
    /// Calendar date
    Date,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SortDirection {
    /// Smallest first (default)
    #[default]
    Asc,
    /// Largest first
    Desc,
}

impl SortDirection {
    pub(crate) fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SortSpec {
    pub(crate) key: SortKey,
    pub(crate) direction: SortDirection,
}

impl SortSpec {
    pub(crate) fn new(key: SortKey, direction: SortDirection) -> Self {
        SortSpec { key, direction }
    }

    /// Column-header click: same key flips direction, a new key starts ascending
    pub(crate) fn select(current: Option<SortSpec>, key: SortKey) -> SortSpec {
        match current {
            Some(spec) if spec.key == key => SortSpec::new(key, spec.direction.flipped()),
            _ => SortSpec::new(key, SortDirection::Asc),
        }
    }
}

/// Inputs of the derived view besides the session list
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub(crate) struct ViewParams {
    pub(crate) status: StatusFilter,
    pub(crate) search: String,
    pub(crate) sort: Option<SortSpec>,
}

fn matches_search(session: &Session, needle: &str) -> bool {
    session.subject.to_lowercase().contains(needle) || session.notes.to_lowercase().contains(needle)
}

/// Unparsable or empty dates sort as the epoch
fn sort_date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).unwrap_or_default()
}

fn compare_by(key: SortKey, a: &Session, b: &Session) -> Ordering {
    match key {
        SortKey::Subject => a.subject.to_lowercase().cmp(&b.subject.to_lowercase()),
        SortKey::Duration => a.duration.cmp(&b.duration),
        SortKey::Date => sort_date(&a.date).cmp(&sort_date(&b.date)),
    }
}

pub(crate) fn derive_view(sessions: &[Session], params: &ViewParams) -> Vec<Session> {
    let needle = params.search.trim().to_lowercase();

    let mut view: Vec<Session> = sessions
        .iter()
        .filter(|s| params.status.matches(s))
        .filter(|s| needle.is_empty() || matches_search(s, &needle))
        .cloned()
        .collect();

    if let Some(spec) = params.sort {
        // sort_by is stable, so ties keep input order in both directions
        match spec.direction {
            SortDirection::Asc => view.sort_by(|a, b| compare_by(spec.key, a, b)),
            SortDirection::Desc => view.sort_by(|a, b| compare_by(spec.key, b, a)),
        }
    }

    view
}
