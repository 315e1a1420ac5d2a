//! The contact form: an in-progress draft plus a Create/Edit mode.
//!
//! The form starts in [`FormMode::Create`]. [`FormController::begin_edit`]
//! loads a stored record into the draft and switches to [`FormMode::Edit`];
//! a successful [`FormController::submit`] writes the draft to the store and
//! returns to Create with an empty draft. There is no cancel: the way out of
//! Edit is to submit.

use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::record::{Draft, Field, Record, RecordId};
use crate::repository::RecordRepository;
use crate::store::RecordStore;

/// Which kind of write the next submit performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Submit appends a new record.
    #[default]
    Create,
    /// Submit overwrites the record with this id.
    Edit(RecordId),
}

impl FormMode {
    /// Label for the submit action in this mode.
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Create => "Add User Data",
            Self::Edit(_) => "Update User Data",
        }
    }
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Edit(id) => write!(f, "edit {id}"),
        }
    }
}

/// What a successful submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new record was appended.
    Added(RecordId),
    /// An existing record was overwritten.
    Updated(RecordId),
}

impl SubmitOutcome {
    /// Id of the record that was written.
    #[must_use]
    pub fn id(&self) -> RecordId {
        match self {
            Self::Added(id) | Self::Updated(id) => *id,
        }
    }
}

/// Form state driving writes into a [`RecordStore`].
#[derive(Debug, Clone, Default)]
pub struct FormController {
    draft: Draft,
    mode: FormMode,
}

impl FormController {
    /// A form in Create mode with an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The in-progress values.
    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// The current mode.
    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Update one field of the draft.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Update one field of the draft by its name (`firstName`, `lastName`, `phone`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if `name` isn't a record field.
    pub fn set_field_named(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let field: Field = name.parse()?;
        self.set_field(field, value);
        Ok(())
    }

    /// Load a stored record into the draft and switch to Edit mode.
    ///
    /// Any unsaved draft values are replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if the store has no such record.
    pub fn begin_edit<R: RecordRepository>(
        &mut self,
        store: &RecordStore<R>,
        id: RecordId,
    ) -> Result<()> {
        let record = store.get(id).ok_or(Error::RecordNotFound(id))?;
        self.draft = record.to_draft();
        self.mode = FormMode::Edit(id);
        debug!("Editing record {}", id);
        Ok(())
    }

    /// Validate the draft and write it to the store.
    ///
    /// In Create mode the draft is appended as a new record; in Edit mode it
    /// overwrites the target. On success the draft is cleared and the form
    /// returns to Create mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteForm`] without touching the store or the
    /// draft if a field is blank. Returns [`Error::RecordNotFound`] if the
    /// edit target has disappeared, and storage errors from persisting.
    pub fn submit<R: RecordRepository>(
        &mut self,
        store: &mut RecordStore<R>,
    ) -> Result<SubmitOutcome> {
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            warn!("Please fill all fields before submitting");
            return Err(Error::IncompleteForm { missing });
        }

        let outcome = match self.mode {
            FormMode::Edit(id) => {
                store.replace(id, Record::from_draft(id, self.draft.clone()))?;
                info!("Updated record {}", id);
                SubmitOutcome::Updated(id)
            }
            FormMode::Create => {
                let id = store.append(Record::from_draft(RecordId::new(), self.draft.clone()))?;
                info!("Added record {}", id);
                SubmitOutcome::Added(id)
            }
        };

        self.reset();
        Ok(outcome)
    }

    /// Remove a record from the store.
    ///
    /// Deleting the record being edited drops the form back to Create mode;
    /// the draft is kept so it can still be submitted as a new record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if the store has no such record, and
    /// storage errors from persisting.
    pub fn delete<R: RecordRepository>(
        &mut self,
        store: &mut RecordStore<R>,
        id: RecordId,
    ) -> Result<Record> {
        let removed = store.remove(id)?;
        if self.mode == FormMode::Edit(id) {
            debug!("Edit target {} deleted, back to create mode", id);
            self.mode = FormMode::Create;
        }
        info!("Deleted record {}", id);
        Ok(removed)
    }

    fn reset(&mut self) {
        self.draft = Draft::empty();
        self.mode = FormMode::Create;
    }
}
