//! # Buyer Dashboard
//!
//! Available books, a client-local cart, and the buyer's own orders.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart: {7: 2, 9: 1}                                                     │
//! │                                                                         │
//! │  purchase(7) ──► POST /api/orders/purchase {buyerId, bookId: 7, qty: 2} │
//! │                    │                                                    │
//! │                    ├── ok  ──► cart {9: 1}, re-fetch books + orders     │
//! │                    └── err ──► cart untouched, alert                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each purchase is one book, one call. There is no checkout-all.

use tracing::{debug, info, warn};

use bookmart_client::{MarketApi, PurchaseRequest};
use bookmart_core::{Book, BookId, Cart, CoreError, ListKind, Money, Mutation, Order, UserId};

use crate::error::{UiError, UiResult};

const PURCHASE_FAILED: &str = "Purchase failed";

const HELD_LISTS: &[ListKind] = &[ListKind::AvailableBooks, ListKind::BuyerOrders];

pub struct BuyerDashboard {
    buyer: UserId,
    books: Vec<Book>,
    orders: Vec<Order>,
    cart: Cart,
}

impl BuyerDashboard {
    pub fn new(buyer: UserId) -> Self {
        BuyerDashboard {
            buyer,
            books: Vec::new(),
            orders: Vec::new(),
            cart: Cart::new(),
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Price of the staged quantity of `id`, if it is in the cart and listed.
    pub fn line_total(&self, id: BookId) -> Option<Money> {
        let qty = self.cart.quantity(id);
        if qty == 0 {
            return None;
        }
        self.book(id).map(|b| b.line_total(qty))
    }

    pub async fn load(&mut self, api: &dyn MarketApi) {
        self.load_books(api).await;
        self.load_orders(api).await;
    }

    pub async fn load_books(&mut self, api: &dyn MarketApi) {
        match api.list_available_books().await {
            Ok(books) => {
                debug!(count = books.len(), "Available books loaded");
                self.books = books;
            }
            Err(e) => warn!("Error fetching books: {}", e),
        }
    }

    pub async fn load_orders(&mut self, api: &dyn MarketApi) {
        match api.buyer_orders(self.buyer).await {
            Ok(orders) => {
                debug!(count = orders.len(), "Buyer orders loaded");
                self.orders = orders;
            }
            Err(e) => warn!("Error fetching orders: {}", e),
        }
    }

    /// Re-fetches the lists `mutation` made stale.
    pub async fn refresh_after(&mut self, api: &dyn MarketApi, mutation: Mutation) {
        for list in mutation.stale_among(HELD_LISTS) {
            match list {
                ListKind::AvailableBooks => self.load_books(api).await,
                ListKind::BuyerOrders => self.load_orders(api).await,
                _ => {}
            }
        }
    }

    /// Stages one more copy of a listed book. Returns the new quantity.
    pub fn add(&mut self, id: BookId) -> UiResult<u32> {
        if self.book(id).is_none() {
            return Err(UiError::not_found("Book", id));
        }
        Ok(self.cart.add(id))
    }

    /// Removes one staged copy. Returns what is left (0 means the entry is gone).
    pub fn remove(&mut self, id: BookId) -> UiResult<u32> {
        self.cart
            .remove(id)
            .ok_or_else(|| CoreError::NotInCart(id).into())
    }

    /// Buys the staged quantity of one book.
    ///
    /// Only that book's cart entry is cleared, and only on success.
    pub async fn purchase(&mut self, api: &dyn MarketApi, id: BookId) -> UiResult<Order> {
        let quantity = self.cart.quantity(id);
        if quantity == 0 {
            return Err(CoreError::NotInCart(id).into());
        }

        let request = PurchaseRequest {
            buyer_id: self.buyer,
            book_id: id,
            quantity,
        };
        debug!(book_id = %id, quantity, "Purchasing");

        let order = api
            .purchase(&request)
            .await
            .map_err(|e| UiError::from_client(e, PURCHASE_FAILED))?;

        self.cart.take(id);
        info!(order_id = %order.id, book_id = %id, quantity, total = %order.total_price, "Purchase successful");

        self.refresh_after(api, Mutation::Purchase).await;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookmart_client::ClientError;

    use crate::error::ErrorCode;
    use crate::testing::{Call, FakeMarket};

    const BUYER: UserId = UserId(5);

    fn market() -> FakeMarket {
        FakeMarket::new()
            .with_book(7, "Dune", 1099, 3, 2)
            .with_book(9, "Emma", 550, 5, 2)
            .with_book(4, "Gone", 800, 0, 2)
    }

    async fn loaded(market: &FakeMarket) -> BuyerDashboard {
        let mut dashboard = BuyerDashboard::new(BUYER);
        dashboard.load(market).await;
        market.clear_calls();
        dashboard
    }

    fn entries(dashboard: &BuyerDashboard) -> Vec<(BookId, u32)> {
        dashboard.cart().entries().collect()
    }

    #[tokio::test]
    async fn test_load_shows_only_available_books() {
        let market = market();
        let dashboard = loaded(&market).await;
        assert_eq!(dashboard.books().len(), 2);
        assert!(dashboard.book(BookId(4)).is_none());
    }

    #[tokio::test]
    async fn test_cart_scenario() {
        let market = market();
        let mut dashboard = loaded(&market).await;

        assert!(dashboard.cart().is_empty());
        assert_eq!(dashboard.add(BookId(7)).unwrap(), 1);
        assert_eq!(dashboard.add(BookId(7)).unwrap(), 2);
        assert_eq!(dashboard.line_total(BookId(7)), Some(Money::from_cents(2198)));
        assert_eq!(dashboard.remove(BookId(7)).unwrap(), 1);
        assert_eq!(dashboard.remove(BookId(7)).unwrap(), 0);
        assert!(dashboard.cart().is_empty());

        // Cart changes never reach the backend.
        assert!(market.calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_unlisted_book() {
        let market = market();
        let mut dashboard = loaded(&market).await;
        let err = dashboard.add(BookId(4)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(dashboard.cart().is_empty());
    }

    #[tokio::test]
    async fn test_remove_absent_entry() {
        let market = market();
        let mut dashboard = loaded(&market).await;
        let err = dashboard.remove(BookId(7)).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[tokio::test]
    async fn test_purchase_clears_only_that_entry() {
        let market = market();
        let mut dashboard = loaded(&market).await;
        dashboard.add(BookId(7)).unwrap();
        dashboard.add(BookId(7)).unwrap();
        dashboard.add(BookId(9)).unwrap();

        let order = dashboard.purchase(&market, BookId(7)).await.unwrap();

        assert_eq!(order.quantity, 2);
        assert_eq!(order.total_price, Money::from_cents(2198));
        assert_eq!(entries(&dashboard), vec![(BookId(9), 1)]);
        assert_eq!(
            market.calls(),
            vec![
                Call::Purchase(PurchaseRequest {
                    buyer_id: BUYER,
                    book_id: BookId(7),
                    quantity: 2,
                }),
                Call::ListAvailableBooks,
                Call::BuyerOrders(BUYER),
            ]
        );
        assert_eq!(dashboard.orders().len(), 1);
        assert_eq!(dashboard.book(BookId(7)).unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn test_sold_out_book_leaves_available_list() {
        let market = market();
        let mut dashboard = loaded(&market).await;
        for _ in 0..3 {
            dashboard.add(BookId(7)).unwrap();
        }

        dashboard.purchase(&market, BookId(7)).await.unwrap();

        assert!(dashboard.book(BookId(7)).is_none());
    }

    #[tokio::test]
    async fn test_failed_purchase_keeps_cart() {
        let market = market();
        let mut dashboard = loaded(&market).await;
        dashboard.add(BookId(9)).unwrap();
        dashboard.add(BookId(7)).unwrap();
        for _ in 0..3 {
            dashboard.add(BookId(7)).unwrap();
        }

        let err = dashboard.purchase(&market, BookId(7)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::BackendError);
        assert_eq!(err.message, "Insufficient stock");
        assert_eq!(entries(&dashboard), vec![(BookId(7), 4), (BookId(9), 1)]);
        assert_eq!(market.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_purchase_without_message_uses_fallback() {
        let market = market();
        let mut dashboard = loaded(&market).await;
        dashboard.add(BookId(9)).unwrap();
        market.fail_next(ClientError::Transport("connection reset".into()));

        let err = dashboard.purchase(&market, BookId(9)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::NetworkError);
        assert_eq!(err.message, "Purchase failed");
        assert_eq!(dashboard.cart().quantity(BookId(9)), 1);
    }

    #[tokio::test]
    async fn test_purchase_outside_cart_is_local_error() {
        let market = market();
        let mut dashboard = loaded(&market).await;

        let err = dashboard.purchase(&market, BookId(7)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::CartError);
        assert!(market.calls().is_empty());
    }
}
