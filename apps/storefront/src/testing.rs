//! In-memory backend for view tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use bookmart_client::{
    AuthResponse, ClientError, ClientResult, LoginRequest, MarketApi, PurchaseRequest,
    RegisterRequest,
};
use bookmart_core::{
    Book, BookId, BookPayload, BookStatus, Money, Order, OrderId, OrderStatus, Role, User, UserId,
};

use crate::views::Confirm;

/// Every call the fake received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Register(String),
    Login(String),
    ListBooks,
    ListAvailableBooks,
    ListSellerBooks(UserId),
    GetBook(BookId),
    CreateBook(BookPayload),
    UpdateBook(BookId, BookPayload),
    DeleteBook(BookId),
    Purchase(PurchaseRequest),
    BuyerOrders(UserId),
    SellerOrders(UserId),
    GetOrder(OrderId),
}

#[derive(Default)]
struct Market {
    users: Vec<(User, String)>,
    books: Vec<Book>,
    orders: Vec<Order>,
    calls: Vec<Call>,
    token: Option<String>,
    fail_next: Option<ClientError>,
    next_id: i64,
}

impl Market {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn book_mut(&mut self, id: BookId) -> ClientResult<&mut Book> {
        self.books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| rejected(404, "Book not found"))
    }
}

fn rejected(status: u16, message: &str) -> ClientError {
    ClientError::Backend {
        status,
        message: Some(message.to_string()),
    }
}

/// A backend that keeps everything in memory and records each call.
#[derive(Default)]
pub struct FakeMarket {
    market: Mutex<Market>,
}

impl FakeMarket {
    pub fn new() -> Self {
        FakeMarket {
            market: Mutex::new(Market {
                next_id: 100,
                ..Market::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Market> {
        self.market.lock().unwrap()
    }

    /// Records `call`, then fails it if a failure was queued.
    fn enter(&self, call: Call) -> ClientResult<MutexGuard<'_, Market>> {
        let mut market = self.lock();
        market.calls.push(call);
        match market.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(market),
        }
    }

    pub fn with_user(self, id: i64, name: &str, email: &str, password: &str, role: Role) -> Self {
        self.lock().users.push((
            User {
                id: UserId(id),
                name: name.to_string(),
                email: Some(email.to_string()),
                role,
            },
            password.to_string(),
        ));
        self
    }

    pub fn with_book(self, id: i64, title: &str, cents: i64, quantity: u32, seller: i64) -> Self {
        self.lock().books.push(Book {
            id: BookId(id),
            title: title.to_string(),
            author: format!("Author of {}", title),
            isbn: format!("isbn-{}", id),
            price: Money::from_cents(cents),
            quantity,
            seller_id: Some(UserId(seller)),
            status: if quantity == 0 {
                BookStatus::SoldOut
            } else {
                BookStatus::Available
            },
        });
        self
    }

    /// Makes the next call fail with `err`.
    pub fn fail_next(&self, err: ClientError) {
        self.lock().fail_next = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    pub fn book(&self, id: BookId) -> Option<Book> {
        self.lock().books.iter().find(|b| b.id == id).cloned()
    }
}

fn store_payload(book: &mut Book, payload: &BookPayload) {
    book.title = payload.title.clone();
    book.author = payload.author.clone();
    book.isbn = payload.isbn.clone();
    book.price = payload.price.unwrap_or_default();
    book.quantity = payload.quantity.unwrap_or_default();
    book.seller_id = payload.seller_id;
    book.status = if book.quantity == 0 {
        BookStatus::SoldOut
    } else {
        BookStatus::Available
    };
}

#[async_trait]
impl MarketApi for FakeMarket {
    fn set_token(&self, token: Option<String>) {
        self.lock().token = token;
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        let mut market = self.enter(Call::Register(request.email.clone()))?;
        if market
            .users
            .iter()
            .any(|(u, _)| u.email.as_deref() == Some(request.email.as_str()))
        {
            return Err(rejected(400, "Email already registered"));
        }

        let user = User {
            id: UserId(market.next_id()),
            name: request.name.clone(),
            email: Some(request.email.clone()),
            role: request.role,
        };
        market.users.push((user.clone(), request.password.clone()));
        Ok(AuthResponse {
            token: format!("token-{}", user.id),
            user,
        })
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        let market = self.enter(Call::Login(request.email.clone()))?;
        market
            .users
            .iter()
            .find(|(u, pw)| {
                u.email.as_deref() == Some(request.email.as_str()) && *pw == request.password
            })
            .map(|(user, _)| AuthResponse {
                token: format!("token-{}", user.id),
                user: user.clone(),
            })
            .ok_or_else(|| rejected(400, "Invalid credentials"))
    }

    async fn list_books(&self) -> ClientResult<Vec<Book>> {
        Ok(self.enter(Call::ListBooks)?.books.clone())
    }

    async fn list_available_books(&self) -> ClientResult<Vec<Book>> {
        let market = self.enter(Call::ListAvailableBooks)?;
        Ok(market
            .books
            .iter()
            .filter(|b| b.status == BookStatus::Available)
            .cloned()
            .collect())
    }

    async fn list_seller_books(&self, seller: UserId) -> ClientResult<Vec<Book>> {
        let market = self.enter(Call::ListSellerBooks(seller))?;
        Ok(market
            .books
            .iter()
            .filter(|b| b.seller_id == Some(seller))
            .cloned()
            .collect())
    }

    async fn get_book(&self, id: BookId) -> ClientResult<Book> {
        let mut market = self.enter(Call::GetBook(id))?;
        market.book_mut(id).map(|b| b.clone())
    }

    async fn create_book(&self, payload: &BookPayload) -> ClientResult<Book> {
        let mut market = self.enter(Call::CreateBook(payload.clone()))?;
        let mut book = Book {
            id: BookId(market.next_id()),
            title: String::new(),
            author: String::new(),
            isbn: String::new(),
            price: Money::zero(),
            quantity: 0,
            seller_id: None,
            status: BookStatus::Available,
        };
        store_payload(&mut book, payload);
        market.books.push(book.clone());
        Ok(book)
    }

    async fn update_book(&self, id: BookId, payload: &BookPayload) -> ClientResult<Book> {
        let mut market = self.enter(Call::UpdateBook(id, payload.clone()))?;
        let book = market.book_mut(id)?;
        store_payload(book, payload);
        Ok(book.clone())
    }

    async fn delete_book(&self, id: BookId) -> ClientResult<()> {
        let mut market = self.enter(Call::DeleteBook(id))?;
        let before = market.books.len();
        market.books.retain(|b| b.id != id);
        if market.books.len() == before {
            return Err(rejected(404, "Book not found"));
        }
        Ok(())
    }

    async fn purchase(&self, request: &PurchaseRequest) -> ClientResult<Order> {
        let mut market = self.enter(Call::Purchase(*request))?;
        let order_id = OrderId(market.next_id());

        let book = market.book_mut(request.book_id)?;
        if book.quantity < request.quantity {
            return Err(rejected(400, "Insufficient stock"));
        }
        book.quantity -= request.quantity;
        if book.quantity == 0 {
            book.status = BookStatus::SoldOut;
        }

        let order = Order {
            id: order_id,
            buyer_id: request.buyer_id,
            book_id: request.book_id,
            seller_id: book.seller_id,
            quantity: request.quantity,
            total_price: book.line_total(request.quantity),
            status: OrderStatus::Completed,
            order_date: NaiveDate::from_ymd_opt(2024, 5, 1)
                .and_then(|d| d.and_hms_opt(10, 15, 30))
                .unwrap(),
        };
        market.orders.push(order.clone());
        Ok(order)
    }

    async fn buyer_orders(&self, buyer: UserId) -> ClientResult<Vec<Order>> {
        let market = self.enter(Call::BuyerOrders(buyer))?;
        Ok(market
            .orders
            .iter()
            .filter(|o| o.buyer_id == buyer)
            .cloned()
            .collect())
    }

    async fn seller_orders(&self, seller: UserId) -> ClientResult<Vec<Order>> {
        let market = self.enter(Call::SellerOrders(seller))?;
        Ok(market
            .orders
            .iter()
            .filter(|o| o.seller_id == Some(seller))
            .cloned()
            .collect())
    }

    async fn get_order(&self, id: OrderId) -> ClientResult<Order> {
        let market = self.enter(Call::GetOrder(id))?;
        market
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| rejected(404, "Order not found"))
    }
}

/// Answers every confirmation the same way and remembers the prompts.
pub struct Answer {
    pub yes: bool,
    pub prompts: Vec<String>,
}

impl Answer {
    pub fn yes() -> Self {
        Answer {
            yes: true,
            prompts: Vec::new(),
        }
    }

    pub fn no() -> Self {
        Answer {
            yes: false,
            prompts: Vec::new(),
        }
    }
}

#[async_trait]
impl Confirm for Answer {
    async fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.yes
    }
}
