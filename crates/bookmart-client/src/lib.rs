//! # bookmart-client: Backend Access for the Bookmart Storefront
//!
//! Every network call and every file the storefront touches goes through
//! this crate.
//!
//! ## Module Organization
//! ```text
//! bookmart_client/
//! ├── api.rs      ◄─── MarketApi trait + typed request/response structs
//! ├── http.rs     ◄─── HttpMarketApi (hyper, JSON)
//! ├── session.rs  ◄─── SessionStore trait, file + memory stores
//! ├── config.rs   ◄─── ClientConfig (TOML + env)
//! └── error.rs    ◄─── ClientError
//! ```
//!
//! ## Quick Start
//! ```rust,no_run
//! use bookmart_client::{ClientConfig, HttpMarketApi, MarketApi};
//!
//! # async fn demo() -> bookmart_client::ClientResult<()> {
//! let config = ClientConfig::load(None)?;
//! let api = HttpMarketApi::from_config(&config)?;
//! let books = api.list_available_books().await?;
//! println!("{} books for sale", books.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use api::{AuthResponse, LoginRequest, MarketApi, PurchaseRequest, RegisterRequest};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpMarketApi;
pub use session::{FileSessionStore, MemorySessionStore, SessionStore, StoredSession};
