//! # Validation Module
//!
//! Turns raw form input into typed request payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Raw form fields (strings)                                              │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  validate_book(draft, fields, seller) ← THIS MODULE                    │
//! │   • required fields present (trimmed, non-empty)                        │
//! │   • price parses as money, quantity as a whole number                   │
//! │   • neither is negative                                                 │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  BookPayload ──────► backend (which still owns every business rule)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookmart_core::validation::{validate_book, BookDraft, PriceFields};
//!
//! let draft = BookDraft {
//!     title: "Dune".into(),
//!     author: "Frank Herbert".into(),
//!     isbn: "9780441013593".into(),
//!     price: "9.99".into(),
//!     quantity: "3".into(),
//! };
//! let payload = validate_book(&draft, PriceFields::Required, None).unwrap();
//! assert_eq!(payload.quantity, Some(3));
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Book, BookPayload, UserId};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Book Form
// =============================================================================

/// Raw book form fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: String,
    pub quantity: String,
}

impl BookDraft {
    /// Pre-fills the form from an existing listing.
    pub fn from_book(book: &Book) -> Self {
        BookDraft {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            price: format!("{:.2}", book.price.as_decimal()),
            quantity: book.quantity.to_string(),
        }
    }

    /// Sets a field by its form name. Returns `false` for unknown names.
    pub fn set(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "title" => &mut self.title,
            "author" => &mut self.author,
            "isbn" => &mut self.isbn,
            "price" => &mut self.price,
            "quantity" | "qty" => &mut self.quantity,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}

/// Whether price and quantity must be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceFields {
    /// Seller listings: price and stock are mandatory.
    Required,
    /// Generic catalog entries: sent only if filled in.
    Optional,
}

/// Validates a book draft into a payload, attaching `seller` when given.
pub fn validate_book(
    draft: &BookDraft,
    fields: PriceFields,
    seller: Option<UserId>,
) -> ValidationResult<BookPayload> {
    let title = validate_required("title", &draft.title)?;
    let author = validate_required("author", &draft.author)?;
    let isbn = validate_required("isbn", &draft.isbn)?;

    let (price, quantity) = match fields {
        PriceFields::Required => (
            Some(validate_price(&validate_required("price", &draft.price)?)?),
            Some(validate_quantity(&validate_required("quantity", &draft.quantity)?)?),
        ),
        PriceFields::Optional => (
            optional(&draft.price).map(validate_price).transpose()?,
            optional(&draft.quantity).map(validate_quantity).transpose()?,
        ),
    };

    Ok(BookPayload {
        title,
        author,
        isbn,
        price,
        quantity,
        seller_id: seller,
    })
}

// =============================================================================
// Field Validators
// =============================================================================

/// Required-field presence. Returns the trimmed value.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(value.to_string())
}

/// Parses a non-negative price.
pub fn validate_price(value: &str) -> ValidationResult<Money> {
    let price: Money = value.parse()?;
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(price)
}

/// Parses a non-negative whole stock count.
pub fn validate_quantity(value: &str) -> ValidationResult<u32> {
    let value = value.trim();
    if matches!(value.parse::<i64>(), Ok(n) if n < 0) {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }
    value.parse::<u32>().map_err(|_| ValidationError::InvalidNumber {
        field: "quantity".to_string(),
        value: value.to_string(),
    })
}

fn optional(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

// =============================================================================
// Unit Tests
// =============================================================================
