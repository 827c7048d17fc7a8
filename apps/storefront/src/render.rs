//! Plain-text rendering of the views. Pure functions, no I/O.

use std::fmt::Write;

use bookmart_core::{Book, FormPhase, Order, User};

use crate::views::{AuthForm, AuthMode, BookManager, BookScope, BuyerDashboard, SellerDashboard};

pub fn user(user: &User) -> String {
    match &user.email {
        Some(email) => format!("{} <{}> #{} ({})", user.name, email, user.id, user.role),
        None => format!("{} #{} ({})", user.name, user.id, user.role),
    }
}

pub fn auth_form(form: &AuthForm) -> String {
    match form.mode() {
        AuthMode::Login => "Login\n  login <email> <password>\n  register <full name> <email> <password> [buyer|seller]".to_string(),
        AuthMode::Register => "Register\n  register <full name> <email> <password> [buyer|seller]\n  login <email> <password>".to_string(),
    }
}

fn book_line(book: &Book) -> String {
    format!(
        "#{:<5} {:<30} {:<20} ISBN {:<14} {:>9}  x{:<4} {}",
        book.id, book.title, book.author, book.isbn, book.price.to_string(), book.quantity, book.status
    )
}

pub fn books(heading: &str, books: &[Book]) -> String {
    let mut out = format!("{} ({})\n", heading, books.len());
    if books.is_empty() {
        out.push_str("  (none)\n");
    }
    for book in books {
        let _ = writeln!(out, "  {}", book_line(book));
    }
    out
}

/// One book, field per line.
pub fn book_detail(book: &Book) -> String {
    let seller = book
        .seller_id
        .map(|id| format!("#{}", id))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "Book #{}\n  title:    {}\n  author:   {}\n  isbn:     {}\n  price:    {}\n  quantity: {}\n  seller:   {}\n  status:   {}\n",
        book.id, book.title, book.author, book.isbn, book.price, book.quantity, seller, book.status
    )
}

pub fn order_detail(order: &Order) -> String {
    format!(
        "Order #{}\n  book:     #{}\n  quantity: {}\n  total:    {}\n  status:   {}\n  date:     {}\n",
        order.id,
        order.book_id,
        order.quantity,
        order.total_price,
        order.status,
        order.order_date.format("%Y-%m-%d %H:%M"),
    )
}

pub fn orders(heading: &str, orders: &[Order]) -> String {
    let mut out = format!("{} ({})\n", heading, orders.len());
    if orders.is_empty() {
        out.push_str("  (none)\n");
    }
    for order in orders {
        let _ = writeln!(
            out,
            "  Order #{:<5} book #{:<5} x{:<3} {:>9}  {:<9}  {}",
            order.id,
            order.book_id,
            order.quantity,
            order.total_price.to_string(),
            order.status,
            order.order_date.format("%Y-%m-%d"),
        );
    }
    out
}

/// Cart entries with the price each "Buy" would charge.
pub fn cart(dashboard: &BuyerDashboard) -> String {
    let cart = dashboard.cart();
    if cart.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = format!("Cart ({} items)\n", cart.total_quantity());
    for (id, qty) in cart.entries() {
        let title = dashboard
            .book(id)
            .map(|b| b.title.as_str())
            .unwrap_or("(no longer listed)");
        match dashboard.line_total(id) {
            Some(total) => {
                let _ = writeln!(out, "  #{:<5} {:<30} x{:<3} Buy {}", id, title, qty, total);
            }
            None => {
                let _ = writeln!(out, "  #{:<5} {:<30} x{:<3}", id, title, qty);
            }
        }
    }
    out
}

pub fn book_form(manager: &BookManager) -> String {
    let draft = manager.draft();
    let heading = match manager.phase() {
        FormPhase::Editing(id) => format!("Edit Book #{}", id),
        FormPhase::Submitting { target: Some(id) } => format!("Saving Book #{}...", id),
        FormPhase::Submitting { target: None } => "Saving...".to_string(),
        FormPhase::Idle => match manager.scope() {
            BookScope::All => "Add New Book".to_string(),
            BookScope::Seller(_) => "List New Book".to_string(),
        },
    };

    let mut out = format!("{}\n", heading);
    let _ = writeln!(out, "  title:    {}", draft.title);
    let _ = writeln!(out, "  author:   {}", draft.author);
    let _ = writeln!(out, "  isbn:     {}", draft.isbn);
    let _ = writeln!(out, "  price:    {}", draft.price);
    let _ = writeln!(out, "  quantity: {}", draft.quantity);
    out
}

pub fn buyer_dashboard(dashboard: &BuyerDashboard) -> String {
    format!(
        "{}\n{}\n{}",
        books("Available Books", dashboard.books()),
        cart(dashboard),
        orders("My Orders", dashboard.orders())
    )
}

pub fn seller_dashboard(dashboard: &SellerDashboard) -> String {
    format!(
        "{}\n{}\n{}",
        books("My Books", dashboard.manager().books()),
        book_form(dashboard.manager()),
        orders("My Sales", dashboard.sales())
    )
}

pub fn catalog(manager: &BookManager) -> String {
    format!(
        "{}\n{}",
        books("Book Management", manager.books()),
        book_form(manager)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookmart_core::{BookId, BookStatus, Money, OrderId, OrderStatus, Role, UserId};
    use chrono::NaiveDate;

    fn order() -> Order {
        Order {
            id: OrderId(11),
            buyer_id: UserId(5),
            book_id: BookId(7),
            seller_id: Some(UserId(2)),
            quantity: 2,
            total_price: Money::from_cents(2198),
            status: OrderStatus::Completed,
            order_date: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(10, 15, 30)
                .unwrap(),
        }
    }

    #[test]
    fn test_order_shows_date_only() {
        let text = orders("My Orders", &[order()]);
        assert!(text.starts_with("My Orders (1)"));
        assert!(text.contains("$21.98"));
        assert!(text.contains("COMPLETED"));
        assert!(text.contains("2024-05-01"));
        assert!(!text.contains("10:15"));
    }

    #[test]
    fn test_empty_lists() {
        assert!(books("My Books", &[]).contains("(none)"));
        assert!(orders("My Sales", &[]).contains("(none)"));
    }

    #[test]
    fn test_book_line() {
        let book = Book {
            id: BookId(7),
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            isbn: "9780441013593".into(),
            price: Money::from_cents(1099),
            quantity: 3,
            seller_id: Some(UserId(2)),
            status: BookStatus::Available,
        };
        let line = book_line(&book);
        assert!(line.starts_with("#7"));
        assert!(line.contains("$10.99"));
        assert!(line.ends_with("AVAILABLE"));
    }

    #[test]
    fn test_order_detail() {
        let text = order_detail(&order());
        assert!(text.starts_with("Order #11"));
        assert!(text.contains("book:     #7"));
        assert!(text.contains("2024-05-01 10:15"));
    }

    #[test]
    fn test_user_line() {
        let ada = User {
            id: UserId(3),
            name: "Ada".into(),
            email: None,
            role: Role::Seller,
        };
        assert_eq!(user(&ada), "Ada #3 (SELLER)");
    }

    #[test]
    fn test_form_heading_follows_phase() {
        let manager = BookManager::catalog();
        assert!(book_form(&manager).starts_with("Add New Book"));
        let seller = BookManager::for_seller(UserId(2));
        assert!(book_form(&seller).starts_with("List New Book"));
    }
}
