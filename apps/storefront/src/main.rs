//! # Bookmart Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookmart Storefront                              │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Terminal (stdin/stdout)                                         │  │
//! │  │   bookmart> login ada@example.com ********                       │  │
//! │  │   Ada@bookmart> add 7                                            │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  bookmart_storefront (shell, views, session)                     │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 ▼  HTTP/JSON                            │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Marketplace backend (/api/users, /api/books, /api/orders)       │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bookmart_storefront::init_tracing();
    bookmart_storefront::run().await
}
