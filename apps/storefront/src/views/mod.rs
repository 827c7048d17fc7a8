//! # Views
//!
//! One struct per screen. Each owns the lists it shows and talks to the
//! backend only through `&dyn MarketApi`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen::Login            ──► AuthForm                                 │
//! │  Screen::BuyerDashboard   ──► BuyerDashboard  (available books,        │
//! │                                                own orders, cart)        │
//! │  Screen::SellerDashboard  ──► SellerDashboard (BookManager::Seller,    │
//! │                                                sales)                   │
//! │  catalog (any signed-in)  ──► BookManager::All                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod books;
pub mod buyer;
pub mod seller;

use async_trait::async_trait;

pub use auth::{AuthForm, AuthMode};
pub use books::{BookManager, BookScope};
pub use buyer::BuyerDashboard;
pub use seller::SellerDashboard;

/// Asks the user to confirm a destructive action.
#[async_trait]
pub trait Confirm: Send {
    async fn confirm(&mut self, prompt: &str) -> bool;
}
