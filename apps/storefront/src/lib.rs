//! # Bookmart Storefront
//!
//! Terminal storefront for the Bookmart book marketplace.
//!
//! ## Module Organization
//! ```text
//! bookmart_storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── context.rs  ◄─── AppContext: API handle + session
//! │   └── session.rs  ◄─── SessionHolder, Screen gate
//! ├── views/
//! │   ├── mod.rs      ◄─── View exports, Confirm trait
//! │   ├── auth.rs     ◄─── Login / register form
//! │   ├── books.rs    ◄─── BookManager (list + create/edit form + delete)
//! │   ├── buyer.rs    ◄─── Available books, cart, purchase, own orders
//! │   └── seller.rs   ◄─── Own listings + sales
//! ├── render.rs       ◄─── Plain-text rendering
//! ├── shell.rs        ◄─── Command parsing and the stdin loop
//! └── error.rs        ◄─── UiError for failed actions
//! ```

pub mod error;
pub mod render;
pub mod shell;
pub mod state;
pub mod views;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bookmart_client::{
    ClientConfig, FileSessionStore, HttpMarketApi, MemorySessionStore, SessionStore,
};

use shell::Shell;
use state::AppContext;

/// Runs the storefront against the configured backend.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Config ──────────────────────────────────────────────────────► │
/// │     • defaults → config.toml → BOOKMART_* environment                   │
/// │     • unreadable or invalid: warn and use defaults                      │
/// │                                                                         │
/// │  2. Build HTTP Client ────────────────────────────────────────────────► │
/// │     • base URL validated (http/https)                                   │
/// │                                                                         │
/// │  3. Pick Session Store ───────────────────────────────────────────────► │
/// │     • Linux: ~/.local/share/storefront/session.json                     │
/// │     • no data dir: in-memory (session lost on exit)                     │
/// │                                                                         │
/// │  4. Shell ────────────────────────────────────────────────────────────► │
/// │     • restore saved session, show login or dashboard                    │
/// │     • read commands from stdin until quit / EOF                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> anyhow::Result<()> {
    info!("Starting Bookmart storefront");

    let config = ClientConfig::load_or_default(None);
    let api = HttpMarketApi::from_config(&config).context("building backend client")?;
    info!(base_url = %api.base_url(), "Backend configured");

    let store: Box<dyn SessionStore> = match config.session_path() {
        Some(path) => {
            info!(?path, "Session file");
            Box::new(FileSessionStore::new(path))
        }
        None => {
            warn!("No data directory; the session will not survive a restart");
            Box::new(MemorySessionStore::new())
        }
    };

    let ctx = AppContext::new(Arc::new(api), store);
    let mut shell = Shell::new(ctx);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    shell.run(stdin).await.context("reading commands")?;

    info!("Goodbye");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays a clean view.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bookmart=trace` - Show trace for bookmart crates only
/// - Default: `info,bookmart=debug`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bookmart=debug,hyper=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
