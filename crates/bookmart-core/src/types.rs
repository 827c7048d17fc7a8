//! # Domain Types
//!
//! Entities as the storefront sees them. The backend owns all of them; the
//! client only ever holds a copy between fetches.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │      Book       │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UserId)    │   │  id (BookId)    │   │  id (OrderId)   │       │
//! │  │  name           │   │  title, author  │   │  buyer_id       │       │
//! │  │  email          │   │  isbn           │   │  book_id        │       │
//! │  │  role           │   │  price (Money)  │   │  quantity       │       │
//! │  └─────────────────┘   │  quantity       │   │  total_price    │       │
//! │                        │  seller_id      │   │  status         │       │
//! │  ┌─────────────────┐   │  status         │   │  order_date     │       │
//! │  │      Role       │   └─────────────────┘   └─────────────────┘       │
//! │  │  BUYER | SELLER │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names follow the backend's camelCase JSON via serde.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Identifiers
// =============================================================================

macro_rules! backend_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .trim_start_matches('#')
                    .parse::<i64>()
                    .map($name)
                    .map_err(|_| ValidationError::InvalidNumber {
                        field: stringify!($name).to_string(),
                        value: s.to_string(),
                    })
            }
        }
    };
}

backend_id!(
    /// Backend user key.
    UserId
);
backend_id!(
    /// Backend book key.
    BookId
);
backend_id!(
    /// Backend order key.
    OrderId
);

// =============================================================================
// User
// =============================================================================

/// The two marketplace roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Buyer,
    Seller,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Buyer => write!(f, "BUYER"),
            Role::Seller => write!(f, "SELLER"),
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec!["BUYER".to_string(), "SELLER".to_string()],
            }),
        }
    }
}

/// The authenticated identity, as returned by login/registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Display name. Some backend builds send `username` instead.
    #[serde(alias = "username")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub role: Role,
}

impl User {
    #[inline]
    pub fn is_seller(&self) -> bool {
        self.role == Role::Seller
    }
}

// =============================================================================
// Book
// =============================================================================

/// Listing status, derived by the backend from stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookStatus {
    #[default]
    Available,
    SoldOut,
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookStatus::Available => write!(f, "AVAILABLE"),
            BookStatus::SoldOut => write!(f, "SOLD_OUT"),
        }
    }
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A listing.
///
/// Generic catalog entries may carry no price or stock, either omitted or
/// sent as `null`; those decode as zero rather than failing the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Money,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
    #[serde(default)]
    pub seller_id: Option<UserId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: BookStatus,
}

impl Book {
    /// Price of `qty` copies, as shown on the "Buy" button.
    pub fn line_total(&self, qty: u32) -> Money {
        self.price * qty
    }
}

/// Body of `POST /api/books` and `PUT /api/books/{id}`.
///
/// Produced only by [`crate::validation`], never assembled from raw input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub isbn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<UserId>,
}

// =============================================================================
// Order
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Completed => write!(f, "COMPLETED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A completed purchase. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub buyer_id: UserId,
    pub book_id: BookId,
    #[serde(default)]
    pub seller_id: Option<UserId>,
    pub quantity: u32,
    pub total_price: Money,
    pub status: OrderStatus,
    /// Backend local time, no offset.
    pub order_date: NaiveDateTime,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_parsing() {
        assert_eq!("seller".parse::<Role>().unwrap(), Role::Seller);
        assert_eq!("BUYER".parse::<Role>().unwrap(), Role::Buyer);
        assert!("admin".parse::<Role>().is_err());
        assert_eq!(Role::default(), Role::Buyer);
    }

    #[test]
    fn test_id_parsing() {
        assert_eq!("7".parse::<BookId>().unwrap(), BookId(7));
        assert_eq!("#12".parse::<OrderId>().unwrap(), OrderId(12));
        assert!("seven".parse::<BookId>().is_err());
    }

    #[test]
    fn test_user_accepts_name_or_username() {
        let by_name: User =
            serde_json::from_value(json!({"id": 1, "name": "Ada", "role": "SELLER"})).unwrap();
        assert_eq!(by_name.name, "Ada");
        assert!(by_name.is_seller());

        let by_username: User = serde_json::from_value(
            json!({"id": 2, "username": "bob", "email": "b@x.io", "role": "BUYER"}),
        )
        .unwrap();
        assert_eq!(by_username.name, "bob");
        assert_eq!(by_username.email.as_deref(), Some("b@x.io"));
    }

    #[test]
    fn test_book_from_backend_json() {
        let book: Book = serde_json::from_value(json!({
            "id": 7,
            "title": "Dune",
            "author": "Frank Herbert",
            "isbn": "9780441013593",
            "price": 9.99,
            "quantity": 3,
            "sellerId": 2,
            "status": "AVAILABLE"
        }))
        .unwrap();
        assert_eq!(book.id, BookId(7));
        assert_eq!(book.price.cents(), 999);
        assert_eq!(book.seller_id, Some(UserId(2)));
        assert_eq!(book.line_total(2).cents(), 1998);
    }

    #[test]
    fn test_catalog_book_without_price() {
        let book: Book = serde_json::from_value(json!({
            "id": 1, "title": "T", "author": "A", "isbn": "I"
        }))
        .unwrap();
        assert!(book.price.is_zero());
        assert_eq!(book.quantity, 0);
        assert_eq!(book.status, BookStatus::Available);
    }

    #[test]
    fn test_null_price_does_not_sink_the_list() {
        let books: Vec<Book> = serde_json::from_value(json!([
            {"id": 1, "title": "T", "author": "A", "isbn": "I",
             "price": null, "quantity": null, "sellerId": null, "status": null},
            {"id": 7, "title": "Dune", "author": "Frank Herbert", "isbn": "9780441013593",
             "price": 9.99, "quantity": 3, "sellerId": 2, "status": "AVAILABLE"}
        ]))
        .unwrap();
        assert_eq!(books.len(), 2);
        assert!(books[0].price.is_zero());
        assert_eq!(books[0].quantity, 0);
        assert_eq!(books[0].seller_id, None);
        assert_eq!(books[1].price.cents(), 999);
    }

    #[test]
    fn test_order_from_backend_json() {
        let order: Order = serde_json::from_value(json!({
            "id": 3,
            "buyerId": 5,
            "bookId": 7,
            "sellerId": 2,
            "quantity": 2,
            "totalPrice": 19.98,
            "status": "COMPLETED",
            "orderDate": "2024-05-01T10:15:30.123456"
        }))
        .unwrap();
        assert_eq!(order.total_price.cents(), 1998);
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.order_date.date().to_string(), "2024-05-01");
    }

    #[test]
    fn test_payload_omits_absent_fields() {
        let payload = BookPayload {
            title: "T".into(),
            author: "A".into(),
            isbn: "I".into(),
            price: None,
            quantity: None,
            seller_id: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, json!({"title": "T", "author": "A", "isbn": "I"}));
    }
}
