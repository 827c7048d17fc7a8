//! # Book Manager
//!
//! List + one create/edit form + delete, over either the whole catalog or a
//! single seller's listings.
//!
//! ## Submit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit()                                                               │
//! │    │                                                                    │
//! │    ├── validate draft ──✗──► VALIDATION_ERROR (no call, phase kept)    │
//! │    │                                                                    │
//! │    ├── Editing(id) ──► PUT  /api/books/{id}                             │
//! │    └── Idle        ──► POST /api/books                                  │
//! │            │                                                            │
//! │            ├── ok  ──► draft reset, create mode, re-fetch stale list    │
//! │            └── err ──► previous phase, draft kept, alert                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info, warn};

use bookmart_client::MarketApi;
use bookmart_core::validation::{validate_book, BookDraft, PriceFields};
use bookmart_core::{
    Book, BookId, CoreError, EntityForm, FormPhase, ListKind, Mutation, Submission, UserId,
};

use crate::error::{UiError, UiResult};

use super::Confirm;

const SAVE_FAILED: &str = "Failed to save book";
const DELETE_FAILED: &str = "Failed to delete book";

const FORM_FIELDS: &[&str] = &["title", "author", "isbn", "price", "quantity"];

/// Which books the manager lists and how strict its form is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookScope {
    /// Every book; price and quantity optional.
    All,
    /// One seller's listings; every field required, seller attached.
    Seller(UserId),
}

impl BookScope {
    fn list(&self) -> ListKind {
        match self {
            BookScope::All => ListKind::AllBooks,
            BookScope::Seller(_) => ListKind::SellerBooks,
        }
    }

    fn delete_prompt(&self) -> &'static str {
        match self {
            BookScope::All => "Are you sure you want to delete this book?",
            BookScope::Seller(_) => "Delete this book?",
        }
    }
}

pub struct BookManager {
    scope: BookScope,
    books: Vec<Book>,
    form: EntityForm<BookId, BookDraft>,
}

impl BookManager {
    pub fn new(scope: BookScope) -> Self {
        BookManager {
            scope,
            books: Vec::new(),
            form: EntityForm::new(),
        }
    }

    pub fn catalog() -> Self {
        Self::new(BookScope::All)
    }

    pub fn for_seller(seller: UserId) -> Self {
        Self::new(BookScope::Seller(seller))
    }

    pub fn scope(&self) -> BookScope {
        self.scope
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn draft(&self) -> &BookDraft {
        self.form.draft()
    }

    pub fn phase(&self) -> FormPhase<BookId> {
        self.form.phase()
    }

    pub fn editing(&self) -> Option<BookId> {
        self.form.selected()
    }

    /// Re-fetches the list. A failed fetch keeps the previous list.
    pub async fn load(&mut self, api: &dyn MarketApi) {
        let result = match self.scope {
            BookScope::All => api.list_books().await,
            BookScope::Seller(seller) => api.list_seller_books(seller).await,
        };

        match result {
            Ok(books) => {
                debug!(list = %self.scope.list(), count = books.len(), "Books loaded");
                self.books = books;
            }
            Err(e) => warn!(list = %self.scope.list(), "Error fetching books: {}", e),
        }
    }

    /// Re-fetches the list if `mutation` made it stale.
    pub async fn refresh_after(&mut self, api: &dyn MarketApi, mutation: Mutation) {
        if !mutation.stale_among(&[self.scope.list()]).is_empty() {
            self.load(api).await;
        }
    }

    /// Selects a listed book for editing, pre-filling the form from it.
    pub fn select(&mut self, id: BookId) -> UiResult<()> {
        let book = self
            .books
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| UiError::not_found("Book", id))?;

        self.form.begin_edit(id, BookDraft::from_book(book))?;
        Ok(())
    }

    /// Seller of the book being edited, if it has one.
    fn selected_owner(&self) -> Option<UserId> {
        let id = self.form.selected()?;
        self.books.iter().find(|b| b.id == id)?.seller_id
    }

    /// Back to an empty create form.
    pub fn cancel(&mut self) -> UiResult<()> {
        self.form.cancel()?;
        Ok(())
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> UiResult<()> {
        if self.form.is_submitting() {
            return Err(CoreError::SubmissionInProgress.into());
        }
        if !self.form.draft_mut().set(field, value) {
            return Err(UiError::validation(format!(
                "unknown field '{}', expected one of: {}",
                field,
                FORM_FIELDS.join(", ")
            )));
        }
        Ok(())
    }

    /// Saves the draft: an update in edit mode, a create otherwise.
    pub async fn submit(&mut self, api: &dyn MarketApi) -> UiResult<Book> {
        // PUT replaces the whole book, so a catalog edit resends the owner.
        let (fields, seller) = match self.scope {
            BookScope::All => (PriceFields::Optional, self.selected_owner()),
            BookScope::Seller(seller) => (PriceFields::Required, Some(seller)),
        };

        let submission = self
            .form
            .begin_submit(|draft| validate_book(draft, fields, seller))?;

        let (mutation, result) = match &submission {
            Submission::Update(id, payload) => {
                debug!(book_id = %id, "Updating book");
                (Mutation::UpdateBook, api.update_book(*id, payload).await)
            }
            Submission::Create(payload) => {
                debug!(title = %payload.title, "Creating book");
                (Mutation::CreateBook, api.create_book(payload).await)
            }
        };

        match result {
            Ok(book) => {
                self.form.finish_submit(true)?;
                info!(book_id = %book.id, %mutation, "Book saved");
                self.refresh_after(api, mutation).await;
                Ok(book)
            }
            Err(e) => {
                self.form.finish_submit(false)?;
                Err(UiError::from_client(e, SAVE_FAILED))
            }
        }
    }

    /// Deletes a book after confirmation. Returns `false` if declined.
    pub async fn delete(
        &mut self,
        api: &dyn MarketApi,
        id: BookId,
        confirm: &mut dyn Confirm,
    ) -> UiResult<bool> {
        if !confirm.confirm(self.scope.delete_prompt()).await {
            debug!(book_id = %id, "Delete declined");
            return Ok(false);
        }

        api.delete_book(id)
            .await
            .map_err(|e| UiError::from_client(e, DELETE_FAILED))?;
        info!(book_id = %id, "Book deleted");

        if self.form.selected() == Some(id) && !self.form.is_submitting() {
            self.form.cancel()?;
        }
        self.refresh_after(api, Mutation::DeleteBook).await;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookmart_client::ClientError;
    use bookmart_core::Money;

    use crate::error::ErrorCode;
    use crate::testing::{Answer, Call, FakeMarket};

    const SELLER: UserId = UserId(2);

    fn market() -> FakeMarket {
        FakeMarket::new()
            .with_book(7, "Dune", 1099, 3, 2)
            .with_book(8, "Emma", 550, 1, 9)
    }

    fn fill(manager: &mut BookManager) {
        manager.set_field("title", "Neuromancer").unwrap();
        manager.set_field("author", "William Gibson").unwrap();
        manager.set_field("isbn", "9780441569595").unwrap();
        manager.set_field("price", "12.50").unwrap();
        manager.set_field("quantity", "4").unwrap();
    }

    #[tokio::test]
    async fn test_seller_scope_lists_own_books() {
        let market = market();
        let mut manager = BookManager::for_seller(SELLER);
        manager.load(&market).await;

        assert_eq!(manager.books().len(), 1);
        assert_eq!(manager.books()[0].id, BookId(7));
        assert_eq!(market.calls(), vec![Call::ListSellerBooks(SELLER)]);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_list() {
        let market = market();
        let mut manager = BookManager::catalog();
        manager.load(&market).await;
        assert_eq!(manager.books().len(), 2);

        market.fail_next(ClientError::Transport("down".into()));
        manager.load(&market).await;
        assert_eq!(manager.books().len(), 2);
    }

    #[tokio::test]
    async fn test_create_attaches_seller_and_refreshes() {
        let market = market();
        let mut manager = BookManager::for_seller(SELLER);
        fill(&mut manager);

        let book = manager.submit(&market).await.unwrap();

        assert_eq!(book.seller_id, Some(SELLER));
        assert_eq!(book.price, Money::from_cents(1250));
        assert_eq!(manager.phase(), FormPhase::Idle);
        assert_eq!(manager.draft(), &BookDraft::default());

        let calls = market.calls();
        assert!(matches!(&calls[0], Call::CreateBook(p) if p.seller_id == Some(SELLER)));
        assert_eq!(calls[1], Call::ListSellerBooks(SELLER));
        assert_eq!(manager.books().len(), 2);
    }

    #[tokio::test]
    async fn test_edit_mode_submits_update_never_create() {
        let market = market();
        let mut manager = BookManager::for_seller(SELLER);
        manager.load(&market).await;
        market.clear_calls();

        manager.select(BookId(7)).unwrap();
        assert_eq!(manager.draft().price, "10.99");
        manager.set_field("price", "8").unwrap();

        manager.submit(&market).await.unwrap();

        let calls = market.calls();
        assert!(matches!(&calls[0], Call::UpdateBook(BookId(7), p) if p.price == Some(Money::from_cents(800))));
        assert!(!calls.iter().any(|c| matches!(c, Call::CreateBook(_))));
        assert_eq!(manager.phase(), FormPhase::Idle);
        assert_eq!(market.book(BookId(7)).unwrap().price, Money::from_cents(800));
    }

    #[tokio::test]
    async fn test_edit_then_cancel_restores_create_mode() {
        let market = market();
        let mut manager = BookManager::catalog();
        manager.load(&market).await;

        manager.select(BookId(8)).unwrap();
        assert_eq!(manager.phase(), FormPhase::Editing(BookId(8)));
        assert_eq!(manager.draft().title, "Emma");

        manager.cancel().unwrap();
        assert_eq!(manager.phase(), FormPhase::Idle);
        assert_eq!(manager.draft(), &BookDraft::default());
    }

    #[tokio::test]
    async fn test_select_unknown_book() {
        let mut manager = BookManager::catalog();
        let err = manager.select(BookId(42)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_invalid_draft_issues_no_call() {
        let market = market();
        let mut manager = BookManager::for_seller(SELLER);
        fill(&mut manager);
        manager.set_field("quantity", "-1").unwrap();

        let err = manager.submit(&market).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(market.calls().is_empty());
        assert_eq!(manager.draft().title, "Neuromancer");
    }

    #[tokio::test]
    async fn test_catalog_scope_allows_missing_price() {
        let market = market();
        let mut manager = BookManager::catalog();
        manager.set_field("title", "Beowulf").unwrap();
        manager.set_field("author", "Unknown").unwrap();
        manager.set_field("isbn", "0000").unwrap();

        manager.submit(&market).await.unwrap();

        let calls = market.calls();
        assert!(matches!(&calls[0], Call::CreateBook(p) if p.price.is_none() && p.seller_id.is_none()));
        assert_eq!(calls[1], Call::ListBooks);
    }

    #[tokio::test]
    async fn test_catalog_edit_keeps_seller() {
        let market = market();
        let mut manager = BookManager::catalog();
        manager.load(&market).await;
        market.clear_calls();

        manager.select(BookId(7)).unwrap();
        manager.set_field("title", "Dune Messiah").unwrap();
        manager.submit(&market).await.unwrap();

        let calls = market.calls();
        assert!(matches!(&calls[0], Call::UpdateBook(BookId(7), p) if p.seller_id == Some(SELLER)));
        assert_eq!(market.book(BookId(7)).unwrap().seller_id, Some(SELLER));
    }

    #[tokio::test]
    async fn test_failed_update_returns_to_editing() {
        let market = market();
        let mut manager = BookManager::for_seller(SELLER);
        manager.load(&market).await;
        manager.select(BookId(7)).unwrap();
        manager.set_field("title", "Dune Messiah").unwrap();

        market.fail_next(ClientError::Backend {
            status: 500,
            message: None,
        });
        let err = manager.submit(&market).await.unwrap_err();

        assert_eq!(err.message, "Failed to save book");
        assert_eq!(manager.phase(), FormPhase::Editing(BookId(7)));
        assert_eq!(manager.draft().title, "Dune Messiah");
    }

    #[tokio::test]
    async fn test_declined_delete_issues_no_call() {
        let market = market();
        let mut manager = BookManager::for_seller(SELLER);
        let mut answer = Answer::no();

        let deleted = manager.delete(&market, BookId(7), &mut answer).await.unwrap();

        assert!(!deleted);
        assert!(market.calls().is_empty());
        assert_eq!(answer.prompts, vec!["Delete this book?".to_string()]);
    }

    #[tokio::test]
    async fn test_confirmed_delete_refreshes() {
        let market = market();
        let mut manager = BookManager::catalog();
        manager.load(&market).await;
        manager.select(BookId(8)).unwrap();
        market.clear_calls();
        let mut answer = Answer::yes();

        let deleted = manager.delete(&market, BookId(8), &mut answer).await.unwrap();

        assert!(deleted);
        assert_eq!(
            market.calls(),
            vec![Call::DeleteBook(BookId(8)), Call::ListBooks]
        );
        assert_eq!(manager.books().len(), 1);
        assert_eq!(manager.phase(), FormPhase::Idle);
        assert_eq!(
            answer.prompts,
            vec!["Are you sure you want to delete this book?".to_string()]
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut manager = BookManager::catalog();
        let err = manager.set_field("colour", "red").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
