//! Edit workflow for a single session
//!
//! `Closed -> Editing -> Closing -> Closed`. Field edits only touch the
//! private buffer; the caller commits the validated result by id.

use crate::core::types::{Session, SessionFields, ValidFields};
use crate::error::ValidationError;

/// Uncommitted copy of one session's fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EditBuffer {
    pub(crate) id: u64,
    pub(crate) fields: SessionFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum EditState {
    #[default]
    Closed,
    Editing(EditBuffer),
    /// Waiting for the close transition to be finalized
    Closing,
}

#[derive(Debug, Default)]
pub(crate) struct EditWorkflow {
    state: EditState,
}

impl EditWorkflow {
    #[cfg(test)]
    pub(crate) fn state(&self) -> &EditState {
        &self.state
    }

    pub(crate) fn is_closed(&self) -> bool {
        matches!(self.state, EditState::Closed)
    }

    /// Background interaction is off for as long as the editor is up
    pub(crate) fn suspends_background(&self) -> bool {
        !self.is_closed()
    }

    /// Copy `session` into a fresh buffer. Only possible while closed.
    pub(crate) fn open(&mut self, session: &Session) -> bool {
        if !self.is_closed() {
            return false;
        }
        self.state = EditState::Editing(EditBuffer {
            id: session.id,
            fields: session.fields(),
        });
        true
    }

    pub(crate) fn buffer(&self) -> Option<&EditBuffer> {
        match &self.state {
            EditState::Editing(buffer) => Some(buffer),
            _ => None,
        }
    }

    pub(crate) fn buffer_mut(&mut self) -> Option<&mut SessionFields> {
        match &mut self.state {
            EditState::Editing(buffer) => Some(&mut buffer.fields),
            _ => None,
        }
    }

    /// Validate the buffer. On success the workflow starts closing and the
    /// caller gets the id and fields to commit; on failure it stays editing.
    /// Returns `Ok(None)` when nothing is being edited.
    pub(crate) fn commit(&mut self) -> Result<Option<(u64, ValidFields)>, ValidationError> {
        let Some(buffer) = self.buffer() else {
            return Ok(None);
        };
        let id = buffer.id;
        let valid = buffer.fields.validate()?;
        self.begin_close();
        Ok(Some((id, valid)))
    }

    /// Throw the buffer away
    pub(crate) fn cancel(&mut self) -> bool {
        self.begin_close()
    }

    /// Escape key or a click outside the editor; same as cancel
    #[cfg(test)]
    pub(crate) fn dismiss(&mut self) -> bool {
        self.begin_close()
    }

    fn begin_close(&mut self) -> bool {
        if !matches!(self.state, EditState::Editing(_)) {
            return false;
        }
        self.state = EditState::Closing;
        true
    }

    /// Complete a pending close. Calling it again is a no-op.
    pub(crate) fn finalize_close(&mut self) -> bool {
        if self.state != EditState::Closing {
            return false;
        }
        self.state = EditState::Closed;
        true
    }
}
