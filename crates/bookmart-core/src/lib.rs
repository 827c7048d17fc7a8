//! # bookmart-core: Pure Domain Logic for the Bookmart Storefront
//!
//! Everything the storefront decides on its own lives here as plain data and
//! pure functions. Persistence, authentication and business rules (stock,
//! order totals, status transitions) belong to the backend; this crate only
//! models what the client sees of them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Bookmart Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/storefront (terminal UI)                   │   │
//! │  │   Login ──► Buyer Dashboard / Seller Dashboard ──► Book Manager │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ bookmart-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌──────────┐          │   │
//! │  │   │  types  │  │  cart   │  │  form   │  │ refresh  │          │   │
//! │  │   │ Book    │  │ Cart    │  │ Entity  │  │ Mutation │          │   │
//! │  │   │ Order   │  │         │  │ Form    │  │ ListKind │          │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                bookmart-client (HTTP + session file)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Ids and entities (User, Book, Order) plus request payloads
//! - [`money`] - Integer-cent `Money` with decimal wire format
//! - [`cart`] - Client-local book → quantity staging map
//! - [`form`] - The create/edit/submit state machine shared by every form
//! - [`refresh`] - Which lists each mutation invalidates
//! - [`validation`] - Turning raw form input into typed payloads
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bookmart_core::cart::Cart;
//! use bookmart_core::types::BookId;
//!
//! let mut cart = Cart::new();
//! cart.add(BookId(7));
//! cart.add(BookId(7));
//! assert_eq!(cart.quantity(BookId(7)), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod form;
pub mod money;
pub mod refresh;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use form::{EntityForm, FormPhase, Submission};
pub use money::Money;
pub use refresh::{ListKind, Mutation};
pub use types::*;
