//! # Form State Machine
//!
//! The create/edit form shape shared by every form in the storefront.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            begin_edit(id)                                              │
//! │   ┌──────┐ ─────────────────► ┌─────────────┐                          │
//! │   │ Idle │                    │ Editing(id) │                          │
//! │   └──────┘ ◄───────────────── └─────────────┘                          │
//! │     │  ▲         cancel()            │                                 │
//! │     │  │                             │                                 │
//! │     │  │ finish(ok)                  │ begin_submit()                  │
//! │     │  │                             ▼                                 │
//! │     │  │                 ┌────────────────────────┐                    │
//! │     │  └──────────────── │ Submitting { target }  │                    │
//! │     └──────────────────► └────────────────────────┘                    │
//! │       begin_submit()        │ finish(err): back to the phase           │
//! │                             │ the submit started from, draft kept      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - A submit from `Editing(id)` always yields [`Submission::Update`] for
//!   that `id`; a submit from `Idle` always yields [`Submission::Create`]
//! - At most one submission is outstanding per form
//! - Success and cancel both reset the draft to `D::default()`

use crate::error::{CoreError, CoreResult, ValidationError};

/// Where a form currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase<K> {
    /// Create mode, nothing selected.
    #[default]
    Idle,
    /// An existing item is selected; submit updates it.
    Editing(K),
    /// A call is outstanding. `target` is `Some` for updates.
    Submitting { target: Option<K> },
}

/// The call a submit turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<K, P> {
    Create(P),
    Update(K, P),
}

/// A form keyed by `K` with a raw draft `D`.
#[derive(Debug, Clone, Default)]
pub struct EntityForm<K, D> {
    phase: FormPhase<K>,
    draft: D,
}

impl<K: Copy + PartialEq, D: Default> EntityForm<K, D> {
    pub fn new() -> Self {
        EntityForm {
            phase: FormPhase::Idle,
            draft: D::default(),
        }
    }

    pub fn phase(&self) -> FormPhase<K> {
        self.phase
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    /// The selected item, including while its update is in flight.
    pub fn selected(&self) -> Option<K> {
        match self.phase {
            FormPhase::Editing(id) => Some(id),
            FormPhase::Submitting { target } => target,
            FormPhase::Idle => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting { .. })
    }

    /// Selects `id` for editing with `draft` pre-filled from it.
    pub fn begin_edit(&mut self, id: K, draft: D) -> CoreResult<()> {
        if self.is_submitting() {
            return Err(CoreError::SubmissionInProgress);
        }
        self.phase = FormPhase::Editing(id);
        self.draft = draft;
        Ok(())
    }

    /// Drops the selection and returns to an empty create form.
    pub fn cancel(&mut self) -> CoreResult<()> {
        if self.is_submitting() {
            return Err(CoreError::SubmissionInProgress);
        }
        self.reset();
        Ok(())
    }

    /// Validates the draft and moves to `Submitting`.
    ///
    /// A validation failure leaves the phase untouched.
    pub fn begin_submit<P, F>(&mut self, validate: F) -> CoreResult<Submission<K, P>>
    where
        F: FnOnce(&D) -> Result<P, ValidationError>,
    {
        let target = match self.phase {
            FormPhase::Submitting { .. } => return Err(CoreError::SubmissionInProgress),
            FormPhase::Editing(id) => Some(id),
            FormPhase::Idle => None,
        };

        let payload = validate(&self.draft)?;
        self.phase = FormPhase::Submitting { target };

        Ok(match target {
            Some(id) => Submission::Update(id, payload),
            None => Submission::Create(payload),
        })
    }

    /// Settles the outstanding submission.
    ///
    /// On success the form resets to create mode. On failure it returns to
    /// the phase the submit started from, keeping the draft for a retry.
    pub fn finish_submit(&mut self, succeeded: bool) -> CoreResult<()> {
        let FormPhase::Submitting { target } = self.phase else {
            return Err(CoreError::NoSubmission);
        };

        if succeeded {
            self.reset();
        } else {
            self.phase = match target {
                Some(id) => FormPhase::Editing(id),
                None => FormPhase::Idle,
            };
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.phase = FormPhase::Idle;
        self.draft = D::default();
    }
}
