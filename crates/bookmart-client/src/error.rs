//! # Client Error Types
//!
//! Error types for backend calls, config loading and session persistence.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ClientError                                      │
//! │                                                                         │
//! │  Transport   ─ request never completed (connect refused, DNS, TLS)     │
//! │  Backend     ─ non-2xx response, optional `error` message from body    │
//! │  Decode      ─ 2xx response whose body is not the expected JSON        │
//! │  InvalidUrl  ─ base URL / path did not form a valid URL                │
//! │  InvalidConfig / ConfigLoadFailed ─ bad or unreadable config           │
//! │  Session     ─ saved-session file could not be read or written         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are retried. Callers decide whether to log (fetches) or
//! surface (mutations).

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Transport / Backend
    // =========================================================================
    /// The request never completed.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {}", message.as_deref().unwrap_or("no message"))]
    Backend { status: u16, message: Option<String> },

    /// The backend answered 2xx with a body we could not decode.
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// Could not build a request URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // =========================================================================
    // Configuration
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Session persistence
    // =========================================================================
    #[error("Session storage error: {0}")]
    Session(String),
}

impl ClientError {
    /// The message the backend put in its `error` field, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ClientError::Backend { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Backend message if present, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Backend { status: 404, .. })
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<hyper::Error> for ClientError {
    fn from(err: hyper::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl From<hyper::http::Error> for ClientError {
    fn from(err: hyper::http::Error) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}
