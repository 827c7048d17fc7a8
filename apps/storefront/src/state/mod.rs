//! # State Module
//!
//! Process-wide state: who is signed in and how to reach the backend.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  AppContext                                                     │   │
//! │  │  ┌──────────────────────┐   ┌──────────────────────────────┐    │   │
//! │  │  │ Arc<dyn MarketApi>   │◄──│ SessionHolder                │    │   │
//! │  │  │ (token mirrored in)  │   │  current: Option<{token,user}│    │   │
//! │  │  └──────────────────────┘   │  store: Box<dyn SessionStore>│    │   │
//! │  │                             └──────────────────────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │                              ▼  screen()                                │
//! │          Login  │  BuyerDashboard  │  SellerDashboard                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! View state (cart, lists, forms) lives in the views themselves and is
//! dropped on logout.

mod context;
mod session;

pub use context::AppContext;
pub use session::{Screen, SessionHolder};
