//! # Cart
//!
//! Client-local staging area: book id → requested quantity.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Action              Before        After                               │
//! │  ──────              ──────        ─────                               │
//! │  add(7)              {}            {7: 1}                              │
//! │  add(7)              {7: 1}        {7: 2}                              │
//! │  remove(7)           {7: 2}        {7: 1}                              │
//! │  remove(7)           {7: 1}        {}          (entry deleted)         │
//! │  take(7) on purchase {7: 2, 9: 1}  {9: 1}      (only that book)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Every stored quantity is ≥ 1; an entry that would drop to zero is
//!   removed from the map
//! - The cart is never persisted and never talks to the backend

use std::collections::BTreeMap;

use crate::types::BookId;

/// The buyer's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: BTreeMap<BookId, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one copy of `book`, returning the new quantity.
    pub fn add(&mut self, book: BookId) -> u32 {
        let qty = self.items.entry(book).or_insert(0);
        *qty = qty.saturating_add(1);
        *qty
    }

    /// Removes one copy of `book`, returning the remaining quantity
    /// (0 when the entry was deleted), or `None` if it was not in the cart.
    pub fn remove(&mut self, book: BookId) -> Option<u32> {
        let qty = self.items.get_mut(&book)?;
        if *qty > 1 {
            *qty -= 1;
            Some(*qty)
        } else {
            self.items.remove(&book);
            Some(0)
        }
    }

    /// Drops the whole entry for `book`, returning what was staged.
    pub fn take(&mut self, book: BookId) -> Option<u32> {
        self.items.remove(&book)
    }

    /// Staged quantity for `book`, 0 if absent.
    pub fn quantity(&self, book: BookId) -> u32 {
        self.items.get(&book).copied().unwrap_or(0)
    }

    pub fn contains(&self, book: BookId) -> bool {
        self.items.contains_key(&book)
    }

    /// Entries in book-id order.
    pub fn entries(&self) -> impl Iterator<Item = (BookId, u32)> + '_ {
        self.items.iter().map(|(id, qty)| (*id, *qty))
    }

    /// Number of distinct books.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_quantity(&self) -> u32 {
        self.items.values().sum()
    }
}
