//! Top-level tracker context
//!
//! Owns the canonical session list, the storage slot, the view parameters,
//! and the edit workflow. All mutation goes through here so every change
//! is persisted and the cached view is invalidated.

use std::cell::RefCell;

use crate::core::edit::EditWorkflow;
use crate::core::seed::seed_sessions;
use crate::core::stats::Statistics;
use crate::core::store::SessionStore;
use crate::core::types::{Session, SessionFields};
use crate::core::view::{SortKey, SortSpec, StatusFilter, ViewParams, derive_view};
use crate::error::{AppError, ValidationError};
use crate::storage::SessionStorage;

#[derive(Debug)]
struct CachedView {
    revision: u64,
    params: ViewParams,
    sessions: Vec<Session>,
}

pub(crate) struct Tracker<S: SessionStorage> {
    store: SessionStore,
    storage: S,
    params: ViewParams,
    edit: EditWorkflow,
    view_cache: RefCell<Option<CachedView>>,
}

impl<S: SessionStorage> Tracker<S> {
    /// Load persisted sessions, falling back to the seed list
    pub(crate) fn open(storage: S) -> Self {
        let sessions = storage.load().unwrap_or_else(|| {
            tracing::info!("no usable stored sessions, starting from seed data");
            seed_sessions()
        });
        Tracker {
            store: SessionStore::new(sessions),
            storage,
            params: ViewParams::default(),
            edit: EditWorkflow::default(),
            view_cache: RefCell::new(None),
        }
    }

    pub(crate) fn sessions(&self) -> &[Session] {
        self.store.sessions()
    }

    pub(crate) fn get(&self, id: u64) -> Option<&Session> {
        self.store.get(id)
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(self.store.sessions()) {
            tracing::warn!(error = %e, "failed to persist sessions");
        }
    }

    fn ensure_idle(&self) -> Result<(), AppError> {
        if self.edit.suspends_background() {
            return Err(AppError::Busy);
        }
        Ok(())
    }

    // --- session store operations ---

    pub(crate) fn create(&mut self, fields: &SessionFields) -> Result<Session, AppError> {
        self.ensure_idle()?;
        let created = self.store.create(fields)?.clone();
        tracing::debug!(id = created.id, subject = %created.subject, "created session");
        self.persist();
        Ok(created)
    }

    /// `Ok(false)` when `id` is unknown
    #[cfg(test)]
    pub(crate) fn update(&mut self, id: u64, fields: &SessionFields) -> Result<bool, AppError> {
        self.ensure_idle()?;
        let updated = self.store.update(id, fields)?;
        if updated {
            self.persist();
        }
        Ok(updated)
    }

    /// New completion value, `None` when `id` is unknown
    pub(crate) fn toggle_completed(&mut self, id: u64) -> Result<Option<bool>, AppError> {
        self.ensure_idle()?;
        let toggled = self.store.toggle_completed(id);
        if toggled.is_some() {
            self.persist();
        }
        Ok(toggled)
    }

    /// Caller must have obtained confirmation
    pub(crate) fn delete(&mut self, id: u64) -> Result<Option<Session>, AppError> {
        self.ensure_idle()?;
        let removed = self.store.delete(id);
        if removed.is_some() {
            self.persist();
        }
        Ok(removed)
    }

    /// Replace everything with the seed list and empty the storage slot
    pub(crate) fn reset_to_seed(&mut self) -> Result<(), AppError> {
        self.ensure_idle()?;
        self.store.replace_all(seed_sessions());
        if let Err(e) = self.storage.clear() {
            tracing::warn!(error = %e, "failed to clear stored sessions");
        }
        Ok(())
    }

    // --- view parameters ---

    pub(crate) fn params(&self) -> &ViewParams {
        &self.params
    }

    pub(crate) fn set_status_filter(&mut self, status: StatusFilter) {
        self.params.status = status;
    }

    pub(crate) fn set_search(&mut self, term: &str) {
        self.params.search = term.to_string();
    }

    /// Same key toggles direction, a new key sorts ascending
    pub(crate) fn select_sort(&mut self, key: SortKey) {
        self.params.sort = Some(SortSpec::select(self.params.sort, key));
    }

    pub(crate) fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.params.sort = sort;
    }

    /// Sessions to display for the current parameters
    pub(crate) fn view(&self) -> Vec<Session> {
        let revision = self.store.revision();
        let mut cache = self.view_cache.borrow_mut();
        if let Some(cached) = cache.as_ref()
            && cached.revision == revision
            && cached.params == self.params
        {
            return cached.sessions.clone();
        }

        let sessions = derive_view(self.store.sessions(), &self.params);
        *cache = Some(CachedView {
            revision,
            params: self.params.clone(),
            sessions: sessions.clone(),
        });
        sessions
    }

    /// Always over the full list, never the filtered view
    pub(crate) fn statistics(&self) -> Statistics {
        Statistics::from_sessions(self.store.sessions())
    }

    // --- edit workflow ---

    #[cfg(test)]
    pub(crate) fn edit_workflow(&self) -> &EditWorkflow {
        &self.edit
    }

    /// False if `id` is unknown or another edit is open
    pub(crate) fn begin_edit(&mut self, id: u64) -> bool {
        match self.store.get(id) {
            Some(session) => self.edit.open(session),
            None => false,
        }
    }

    pub(crate) fn edit_buffer_mut(&mut self) -> Option<&mut SessionFields> {
        self.edit.buffer_mut()
    }

    /// Commit the buffer by id. On a validation error the editor stays open.
    /// `Ok(false)` means nothing was written.
    pub(crate) fn save_edit(&mut self) -> Result<bool, ValidationError> {
        let Some((id, fields)) = self.edit.commit()? else {
            return Ok(false);
        };
        let updated = self.store.update_valid(id, fields);
        if updated {
            self.persist();
        }
        self.edit.finalize_close();
        Ok(updated)
    }

    pub(crate) fn cancel_edit(&mut self) -> bool {
        let closing = self.edit.cancel();
        self.edit.finalize_close();
        closing
    }

    /// Escape or click outside the editor
    #[cfg(test)]
    pub(crate) fn dismiss_edit(&mut self) -> bool {
        let closing = self.edit.dismiss();
        self.edit.finalize_close();
        closing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::edit::EditState;
    use crate::core::view::SortDirection;
    use crate::storage::MemoryStorage;

    fn tracker() -> Tracker<MemoryStorage> {
        Tracker::open(MemoryStorage::default())
    }

    fn input(subject: &str, duration: u32, date: &str) -> SessionFields {
        SessionFields {
            subject: subject.to_string(),
            duration: Some(duration),
            date: date.to_string(),
            notes: String::new(),
        }
    }

    fn stored(t: &Tracker<MemoryStorage>) -> Vec<Session> {
        serde_json::from_str(&t.storage().raw().unwrap()).unwrap()
    }

    #[test]
    fn empty_slot_falls_back_to_seed() {
        let t = tracker();
        assert_eq!(t.sessions(), seed_sessions().as_slice());
        assert_eq!(t.storage().writes(), 0);
    }

    #[test]
    fn unparsable_slot_falls_back_to_seed() {
        let t = Tracker::open(MemoryStorage::with_raw("definitely not json"));
        assert_eq!(t.sessions().len(), 3);
    }

    #[test]
    fn persisted_slot_is_used() {
        let raw = r#"[{"id":5,"subject":"Compilers","duration":20,"date":"2025-11-01"}]"#;
        let t = Tracker::open(MemoryStorage::with_raw(raw));
        assert_eq!(t.sessions().len(), 1);
        assert_eq!(t.sessions()[0].subject, "Compilers");
    }

    #[test]
    fn one_bad_record_does_not_discard_the_others() {
        let raw = r#"[
            {"id":10,"subject":"Compilers","duration":40,"date":"2025-11-01"},
            {"id":11,"subject":"Graphs","duration":25,"date":"2025-11-02"},
            {"id":12,"subject":null,"duration":5,"date":"2025-11-03"},
            {"subject":"no id at all"}
        ]"#;
        let mut t = Tracker::open(MemoryStorage::with_raw(raw));
        let ids: Vec<u64> = t.sessions().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);

        assert_eq!(t.toggle_completed(10).unwrap(), Some(true));
        let subjects: Vec<String> = stored(&t).into_iter().map(|s| s.subject).collect();
        assert_eq!(subjects, vec!["Compilers", "Graphs", ""]);
    }

    #[test]
    fn largest_possible_stored_id_opens_and_creates() {
        let raw = r#"[{"id":18446744073709551615,"subject":"Edge","duration":10,"date":"2025-01-01"}]"#;
        let mut t = Tracker::open(MemoryStorage::with_raw(raw));
        assert_eq!(t.sessions()[0].id, u64::MAX);
        let created = t.create(&input("Networks", 50, "2025-12-15")).unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(t.sessions().len(), 2);
    }

    #[test]
    fn create_persists_full_list() {
        let mut t = tracker();
        let created = t.create(&input("Networks", 50, "2025-12-15")).unwrap();
        assert_eq!(t.sessions().len(), 4);
        assert_eq!(stored(&t).len(), 4);
        assert_eq!(stored(&t)[3], created);
    }

    #[test]
    fn invalid_create_writes_nothing() {
        let mut t = tracker();
        let err = t.create(&input("", 50, "2025-12-15")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(t.storage().writes(), 0);
        assert_eq!(t.sessions().len(), 3);
    }

    #[test]
    fn not_found_mutations_write_nothing() {
        let mut t = tracker();
        assert_eq!(t.toggle_completed(99).unwrap(), None);
        assert!(t.delete(99).unwrap().is_none());
        assert!(!t.update(99, &input("x", 1, "2025-01-01")).unwrap());
        assert_eq!(t.storage().writes(), 0);
    }

    #[test]
    fn storage_failure_never_blocks_memory() {
        let mut t = tracker();
        t.storage().set_failing(true);
        t.create(&input("Networks", 50, "2025-12-15")).unwrap();
        assert_eq!(t.toggle_completed(1).unwrap(), Some(true));
        assert_eq!(t.sessions().len(), 4);
        assert!(t.sessions()[0].completed);
        t.reset_to_seed().unwrap();
        assert_eq!(t.sessions(), seed_sessions().as_slice());
    }

    #[test]
    fn reset_clears_slot_instead_of_writing_seed() {
        let mut t = tracker();
        t.delete(1).unwrap();
        assert!(t.storage().raw().is_some());
        t.reset_to_seed().unwrap();
        assert!(t.storage().raw().is_none());
        assert_eq!(t.sessions(), seed_sessions().as_slice());
    }

    #[test]
    fn networks_scenario() {
        let mut t = tracker();
        t.create(&input("Networks", 50, "2025-12-15")).unwrap();
        t.set_status_filter(StatusFilter::Pending);
        assert_eq!(t.view().len(), 3);

        t.set_status_filter(StatusFilter::All);
        t.select_sort(SortKey::Duration);
        let durations: Vec<u32> = t.view().iter().map(|s| s.duration).collect();
        assert_eq!(durations, vec![30, 45, 50, 60]);
    }

    #[test]
    fn view_cache_tracks_mutations_and_params() {
        let mut t = tracker();
        let first = t.view();
        assert_eq!(t.view(), first);

        t.toggle_completed(1).unwrap();
        t.set_status_filter(StatusFilter::Completed);
        assert_eq!(t.view().len(), 2);

        t.set_search("dbms");
        assert_eq!(t.view().len(), 1);
        t.set_search("zzz");
        assert!(t.view().is_empty());
    }

    #[test]
    fn select_sort_twice_flips_direction() {
        let mut t = tracker();
        t.select_sort(SortKey::Date);
        t.select_sort(SortKey::Date);
        assert_eq!(
            t.params().sort,
            Some(SortSpec::new(SortKey::Date, SortDirection::Desc))
        );
        assert_eq!(t.view()[0].id, 3);
    }

    #[test]
    fn statistics_ignore_view_params() {
        let mut t = tracker();
        t.set_status_filter(StatusFilter::Completed);
        t.set_search("dbms");
        let stats = t.statistics();
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.total_minutes, 135);
        assert_eq!(stats.completion_rate, 33);
    }

    #[test]
    fn edit_with_empty_subject_is_rejected() {
        let mut t = tracker();
        assert!(t.begin_edit(2));
        t.edit_buffer_mut().unwrap().subject = String::new();
        assert!(t.save_edit().is_err());
        assert!(matches!(t.edit_workflow().state(), EditState::Editing(_)));
        assert_eq!(t.get(2).unwrap().subject, "DBMS Revision");
        assert_eq!(t.storage().writes(), 0);
    }

    #[test]
    fn edit_save_commits_and_closes() {
        let mut t = tracker();
        assert!(t.begin_edit(2));
        t.edit_buffer_mut().unwrap().notes = "normal forms".to_string();
        assert!(t.save_edit().unwrap());
        assert!(t.edit_workflow().is_closed());
        assert_eq!(t.get(2).unwrap().notes, "normal forms");
        assert_eq!(stored(&t)[1].notes, "normal forms");
    }

    #[test]
    fn edit_cancel_discards_changes() {
        let mut t = tracker();
        t.begin_edit(1);
        t.edit_buffer_mut().unwrap().duration = Some(999);
        assert!(t.cancel_edit());
        assert!(!t.dismiss_edit());
        assert_eq!(t.get(1).unwrap().duration, 60);
        assert_eq!(t.storage().writes(), 0);
    }

    #[test]
    fn mutations_refused_while_editing() {
        let mut t = tracker();
        t.begin_edit(1);
        assert!(matches!(t.toggle_completed(2), Err(AppError::Busy)));
        assert!(matches!(t.delete(2), Err(AppError::Busy)));
        assert!(!t.begin_edit(2));
        t.dismiss_edit();
        assert_eq!(t.toggle_completed(2).unwrap(), Some(false));
    }

    #[test]
    fn begin_edit_unknown_id_is_false() {
        let mut t = tracker();
        assert!(!t.begin_edit(404));
        assert!(t.edit_workflow().is_closed());
    }
}
