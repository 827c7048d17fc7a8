//! # List Invalidation
//!
//! Every mutating call declares which lists it makes stale. Views re-fetch
//! only the stale lists they actually hold.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Mutation        AllBooks  AvailableBooks  SellerBooks  Buyer  Seller   │
//! │                                                         Orders Orders   │
//! │  ────────        ────────  ──────────────  ───────────  ────── ──────   │
//! │  CreateBook         ✓            ✓              ✓                       │
//! │  UpdateBook         ✓            ✓              ✓                       │
//! │  DeleteBook         ✓            ✓              ✓                       │
//! │  Purchase           ✓            ✓              ✓          ✓      ✓     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

/// A collection a view can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    AllBooks,
    AvailableBooks,
    SellerBooks,
    BuyerOrders,
    SellerOrders,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ListKind::AllBooks => "all_books",
            ListKind::AvailableBooks => "available_books",
            ListKind::SellerBooks => "seller_books",
            ListKind::BuyerOrders => "buyer_orders",
            ListKind::SellerOrders => "seller_orders",
        };
        f.write_str(name)
    }
}

/// A call that changes backend state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CreateBook,
    UpdateBook,
    DeleteBook,
    Purchase,
}

const BOOK_LISTS: &[ListKind] = &[
    ListKind::AllBooks,
    ListKind::AvailableBooks,
    ListKind::SellerBooks,
];

const PURCHASE_LISTS: &[ListKind] = &[
    ListKind::AllBooks,
    ListKind::AvailableBooks,
    ListKind::SellerBooks,
    ListKind::BuyerOrders,
    ListKind::SellerOrders,
];

impl Mutation {
    /// Lists made stale by this mutation.
    pub fn invalidates(&self) -> &'static [ListKind] {
        match self {
            Mutation::CreateBook | Mutation::UpdateBook | Mutation::DeleteBook => BOOK_LISTS,
            Mutation::Purchase => PURCHASE_LISTS,
        }
    }

    /// The subset of `held` that must be re-fetched, in `held` order.
    pub fn stale_among(&self, held: &[ListKind]) -> Vec<ListKind> {
        let stale = self.invalidates();
        held.iter().copied().filter(|k| stale.contains(k)).collect()
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mutation::CreateBook => "create_book",
            Mutation::UpdateBook => "update_book",
            Mutation::DeleteBook => "delete_book",
            Mutation::Purchase => "purchase",
        };
        f.write_str(name)
    }
}
