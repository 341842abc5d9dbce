//! Edit lifecycle for a single block's output.

use crate::{OutputValidation, validate_output};
use sequin_core::{BlockType, OutputEdit};
use sequin_error::ValidationRejected;
use tracing::{debug, instrument, warn};

/// Where an edit session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum EditState {
    /// Output is displayed, nothing is being edited
    #[default]
    Viewing,
    /// A draft is being edited
    Editing,
    /// The draft is being checked
    Validating,
    /// The draft passed validation and may be saved
    Saved,
    /// The draft failed validation and is still being edited
    EditingWithErrors,
}

/// Drives one block's edit through `Viewing → Editing → Validating →
/// (Saved | EditingWithErrors)`.
///
/// # Examples
///
/// ```
/// use sequin_core::{BlockType, OutputEdit};
/// use sequin_validate::{EditSession, EditState};
///
/// let mut session = EditSession::new(BlockType::Standard);
/// session.begin(OutputEdit::Content(String::new()));
/// assert!(session.submit().is_err());
/// assert_eq!(session.state(), EditState::EditingWithErrors);
///
/// session.update(OutputEdit::Content("Revised answer.".into()));
/// assert!(session.submit().is_ok());
/// assert_eq!(session.state(), EditState::Saved);
/// ```
#[derive(Debug, Clone)]
pub struct EditSession {
    block_type: BlockType,
    state: EditState,
    draft: Option<OutputEdit>,
    last_validation: Option<OutputValidation>,
}

impl EditSession {
    /// Start a session in the viewing state.
    pub fn new(block_type: BlockType) -> Self {
        Self {
            block_type,
            state: EditState::Viewing,
            draft: None,
            last_validation: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> EditState {
        self.state
    }

    /// Block type the session validates for.
    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    /// Current draft, if editing.
    pub fn draft(&self) -> Option<&OutputEdit> {
        self.draft.as_ref()
    }

    /// Findings from the last submit.
    pub fn last_validation(&self) -> Option<&OutputValidation> {
        self.last_validation.as_ref()
    }

    /// Enter editing with an initial draft, discarding any previous one.
    pub fn begin(&mut self, initial: OutputEdit) {
        self.draft = Some(initial);
        self.last_validation = None;
        self.transition(EditState::Editing);
    }

    /// Replace the draft. Ignored unless a draft is being edited.
    pub fn update(&mut self, draft: OutputEdit) -> bool {
        match self.state {
            EditState::Editing | EditState::EditingWithErrors => {
                self.draft = Some(draft);
                true
            }
            _ => false,
        }
    }

    /// Validate the draft.
    ///
    /// On success the session moves to [`EditState::Saved`] and the draft
    /// is returned for saving. Errors keep the session editing.
    ///
    /// # Errors
    ///
    /// Returns a rejection when there is no draft or the validator reports
    /// errors.
    #[instrument(skip(self), fields(block_type = %self.block_type, state = %self.state))]
    pub fn submit(&mut self) -> Result<&OutputEdit, ValidationRejected> {
        let Some(draft) = self.draft.as_ref() else {
            return Err(ValidationRejected::new(0, "No edit in progress"));
        };
        self.state = EditState::Validating;
        let report = validate_output(self.block_type, draft);

        if report.is_valid() {
            if !report.warnings.is_empty() {
                warn!(
                    warnings = report.warnings.len(),
                    "Saving output with advisory findings"
                );
            }
            self.last_validation = Some(report);
            self.transition(EditState::Saved);
            self.draft
                .as_ref()
                .ok_or_else(|| ValidationRejected::new(0, "No edit in progress"))
        } else {
            let rejection = ValidationRejected::new(report.errors.len(), report.format_errors());
            self.last_validation = Some(report);
            self.transition(EditState::EditingWithErrors);
            Err(rejection)
        }
    }

    /// Leave editing without saving.
    pub fn cancel(&mut self) {
        self.draft = None;
        self.last_validation = None;
        self.transition(EditState::Viewing);
    }

    /// Return to viewing after a save completes, yielding the saved draft.
    pub fn finish(&mut self) -> Option<OutputEdit> {
        if self.state != EditState::Saved {
            return None;
        }
        self.transition(EditState::Viewing);
        self.draft.take()
    }

    fn transition(&mut self, next: EditState) {
        debug!(from = %self.state, to = %next, "Edit session transition");
        self.state = next;
    }
}
