//! # Client Configuration
//!
//! Where the backend lives and where the saved session goes.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Load order (later overrides earlier)                                   │
//! │                                                                         │
//! │  1. Defaults            base_url = http://localhost:8080                │
//! │  2. Config file         $BOOKMART_CONFIG or <config dir>/config.toml    │
//! │  3. Environment         BOOKMART_API_URL, BOOKMART_SESSION_PATH         │
//! │  4. validate()          base URL must be http(s)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "https://books.example.com"
//!
//! [session]
//! path = "/home/me/.local/share/bookmart/session.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// API Settings
// =============================================================================

/// Backend location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Scheme + host (+ optional path prefix). `/api/...` paths are joined
    /// onto it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
        }
    }
}

// =============================================================================
// Session Settings
// =============================================================================

/// Saved-session location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Explicit session file. Defaults to the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os("BOOKMART_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        self.base_url().map(|_| ())
    }

    /// The parsed backend base URL.
    pub fn base_url(&self) -> ClientResult<Url> {
        let url = Url::parse(&self.api.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ClientError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got scheme '{}'",
                other
            ))),
        }
    }

    /// Session file to use: configured path or the platform default.
    pub fn session_path(&self) -> Option<PathBuf> {
        self.session.path.clone().or_else(Self::default_session_path)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("BOOKMART_API_URL") {
            debug!(url = %url, "Overriding API base URL from environment");
            self.api.base_url = url;
        }

        if let Ok(path) = std::env::var("BOOKMART_SESSION_PATH") {
            debug!(path = %path, "Overriding session path from environment");
            self.session.path = Some(PathBuf::from(path));
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "bookmart", "storefront")
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn default_session_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("session.json"))
    }
}
