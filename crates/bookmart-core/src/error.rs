//! # Error Types
//!
//! Domain-specific error types for bookmart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookmart-core errors (this file)                                      │
//! │  ├── CoreError        - Cart / form rule violations                    │
//! │  └── ValidationError  - Form input that cannot become a payload        │
//! │                                                                         │
//! │  bookmart-client errors (separate crate)                               │
//! │  └── ClientError      - Transport, backend, decode, session file       │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── UiError          - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │                        ClientError ─┴─► UiError → alert line           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::BookId;

// =============================================================================
// Core Error
// =============================================================================

/// Client-side rule violations.
///
/// None of these ever reach the backend: they are caught before a call is
/// issued.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Purchase or removal requested for a book with no cart entry.
    #[error("Book {0} is not in the cart")]
    NotInCart(BookId),

    /// A submission is already outstanding on this form.
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    /// `finish_submit` called while no submission was outstanding.
    #[error("No submission is in progress")]
    NoSubmission,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The only client-side validation is required-field presence plus parsing
/// numeric fields into their typed form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric field did not parse.
    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
