//! # Backend API Surface
//!
//! One typed request/response pair per endpoint, and the [`MarketApi`]
//! trait the storefront talks to.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method  Path                           Body             Response      │
//! │  ──────  ────                           ────             ────────      │
//! │  POST    /api/users/register            RegisterRequest  AuthResponse  │
//! │  POST    /api/users/login               LoginRequest     AuthResponse  │
//! │  GET     /api/books                     -                Vec<Book>     │
//! │  GET     /api/books/available           -                Vec<Book>     │
//! │  GET     /api/books/seller/{sellerId}   -                Vec<Book>     │
//! │  GET     /api/books/{id}                -                Book          │
//! │  POST    /api/books                     BookPayload      Book          │
//! │  PUT     /api/books/{id}                BookPayload      Book          │
//! │  DELETE  /api/books/{id}                -                -             │
//! │  POST    /api/orders/purchase           PurchaseRequest  Order         │
//! │  GET     /api/orders/buyer/{buyerId}    -                Vec<Order>    │
//! │  GET     /api/orders/seller/{sellerId}  -                Vec<Order>    │
//! │  GET     /api/orders/{id}               -                Order         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use bookmart_core::{Book, BookId, BookPayload, Order, OrderId, Role, User, UserId};

use crate::error::ClientResult;

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /api/users/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Body of `POST /api/users/login`. Only email and password are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/orders/purchase`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub buyer_id: UserId,
    pub book_id: BookId,
    pub quantity: u32,
}

// =============================================================================
// Responses
// =============================================================================

/// Response of login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Opaque credential; validity is the backend's concern.
    pub token: String,
    pub user: User,
}

/// Shape of every non-2xx body the backend produces.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

// =============================================================================
// API Trait
// =============================================================================

/// Everything the storefront can ask of the backend.
///
/// Implemented over HTTP by [`crate::HttpMarketApi`]; tests substitute an
/// in-memory fake.
#[async_trait]
pub trait MarketApi: Send + Sync {
    /// Installs (or clears) the credential sent with later calls.
    fn set_token(&self, token: Option<String>);

    async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse>;

    async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse>;

    async fn list_books(&self) -> ClientResult<Vec<Book>>;

    async fn list_available_books(&self) -> ClientResult<Vec<Book>>;

    async fn list_seller_books(&self, seller: UserId) -> ClientResult<Vec<Book>>;

    async fn get_book(&self, id: BookId) -> ClientResult<Book>;

    async fn create_book(&self, payload: &BookPayload) -> ClientResult<Book>;

    async fn update_book(&self, id: BookId, payload: &BookPayload) -> ClientResult<Book>;

    async fn delete_book(&self, id: BookId) -> ClientResult<()>;

    async fn purchase(&self, request: &PurchaseRequest) -> ClientResult<Order>;

    async fn buyer_orders(&self, buyer: UserId) -> ClientResult<Vec<Order>>;

    async fn seller_orders(&self, seller: UserId) -> ClientResult<Vec<Order>>;

    async fn get_order(&self, id: OrderId) -> ClientResult<Order>;
}
