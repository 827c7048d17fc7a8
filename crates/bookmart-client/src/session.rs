//! # Session Persistence
//!
//! Saves the authenticated identity and its token across restarts.
//!
//! ## Stores
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SessionStore (trait: load / save / clear)                              │
//! │     │                                                                   │
//! │     ├── FileSessionStore    JSON file, e.g. ~/.local/share/.../session  │
//! │     └── MemorySessionStore  process-local, for tests                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The token is opaque here: no refresh, no expiry check.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

use bookmart_core::User;

use crate::api::AuthResponse;
use crate::error::{ClientError, ClientResult};

/// What survives a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

impl From<AuthResponse> for StoredSession {
    fn from(auth: AuthResponse) -> Self {
        StoredSession {
            token: auth.token,
            user: auth.user,
        }
    }
}

/// Persistence collaborator for the session holder.
pub trait SessionStore: Send + Sync {
    /// The saved session, `None` if nothing was saved.
    fn load(&self) -> ClientResult<Option<StoredSession>>;

    fn save(&self, session: &StoredSession) -> ClientResult<()>;

    /// Removes the saved session. Clearing an empty store is not an error.
    fn clear(&self) -> ClientResult<()>;
}

// =============================================================================
// File Store
// =============================================================================

/// Session saved as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSessionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ClientResult<Option<StoredSession>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "No saved session");
                return Ok(None);
            }
            Err(e) => return Err(ClientError::Session(e.to_string())),
        };

        let session = serde_json::from_str(&contents)
            .map_err(|e| ClientError::Session(format!("corrupt session file: {}", e)))?;
        Ok(Some(session))
    }

    fn save(&self, session: &StoredSession) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ClientError::Session(e.to_string()))?;
        }

        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, contents).map_err(|e| ClientError::Session(e.to_string()))?;

        info!(path = ?self.path, user_id = %session.user.id, "Session saved");
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = ?self.path, "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Session(e.to_string())),
        }
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// Session kept only for the life of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<StoredSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out holding `session`.
    pub fn with_session(session: StoredSession) -> Self {
        MemorySessionStore {
            slot: Mutex::new(Some(session)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<StoredSession>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ClientResult<Option<StoredSession>> {
        Ok(self.lock().clone())
    }

    fn save(&self, session: &StoredSession) -> ClientResult<()> {
        *self.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.lock() = None;
        Ok(())
    }
}
