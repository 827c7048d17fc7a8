//! # UI Error Type
//!
//! What a failed action turns into before it reaches the user.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  buy 7                                                                  │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  View action                                                     │  │
//! │  │  Result<T, UiError>                                              │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Not in cart? ─── CoreError::NotInCart ──────────┐               │  │
//! │  │         │                                        │               │  │
//! │  │         ▼                                        ▼               │  │
//! │  │  Backend said no? ─── ClientError::Backend ── UiError ─► alert   │  │
//! │  │         │              (+ "Purchase failed" fallback)            │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────►    │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fetch failures never become a `UiError`: they are logged and the view
//! keeps what it had.

use std::fmt;

use thiserror::Error;
use tracing::error;

use bookmart_client::ClientError;
use bookmart_core::{CoreError, ValidationError};

/// Error returned from a view action. The shell prints `message` as the
/// alert line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct UiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for failed actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Entity not found locally or by the backend (404)
    NotFound,

    /// Form input could not become a payload
    ValidationError,

    /// Backend rejected the call
    BackendError,

    /// Backend unreachable
    NetworkError,

    /// Cart operation failed
    CartError,

    /// The form already has a call outstanding
    FormBusy,

    /// Anything else
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BackendError => "BACKEND_ERROR",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::CartError => "CART_ERROR",
            ErrorCode::FormBusy => "FORM_BUSY",
            ErrorCode::Internal => "INTERNAL",
        };
        f.write_str(code)
    }
}

/// Result type for view actions.
pub type UiResult<T> = Result<T, UiError>;

impl UiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        UiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        UiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        UiError::new(ErrorCode::ValidationError, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        UiError::new(ErrorCode::CartError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        UiError::new(ErrorCode::Internal, message)
    }

    /// Converts a failed backend call.
    ///
    /// The user sees the backend's `error` text when it sent one, otherwise
    /// `fallback`. Transport and decode details only go to the log.
    pub fn from_client(err: ClientError, fallback: &str) -> Self {
        let message = err.user_message(fallback);
        if err.is_not_found() {
            return UiError::new(ErrorCode::NotFound, message);
        }
        match &err {
            ClientError::Backend { .. } => UiError::new(ErrorCode::BackendError, message),
            ClientError::Transport(detail) => {
                error!("Backend unreachable: {}", detail);
                UiError::new(ErrorCode::NetworkError, message)
            }
            other => {
                error!("Backend call failed: {}", other);
                UiError::new(ErrorCode::Internal, message)
            }
        }
    }
}

/// Converts core errors to UI errors.
impl From<CoreError> for UiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotInCart(_) => UiError::cart(err.to_string()),
            CoreError::SubmissionInProgress => UiError::new(ErrorCode::FormBusy, err.to_string()),
            CoreError::NoSubmission => {
                error!("Form settled twice");
                UiError::internal(err.to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for UiError {
    fn from(err: ValidationError) -> Self {
        UiError::validation(err.to_string())
    }
}
