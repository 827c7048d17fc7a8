//! Session holder: the authenticated identity and its token.

use tracing::{info, warn};

use bookmart_client::{AuthResponse, SessionStore, StoredSession};
use bookmart_core::{Role, User};

/// Which top-level view the current identity gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    BuyerDashboard,
    SellerDashboard,
}

/// Holds the current identity and keeps its persisted copy in step.
///
/// Persistence failures are logged, never fatal: the in-memory session
/// stays authoritative for the life of the process.
pub struct SessionHolder {
    store: Box<dyn SessionStore>,
    current: Option<StoredSession>,
}

impl SessionHolder {
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        SessionHolder {
            store,
            current: None,
        }
    }

    /// Loads a previously saved session, if any.
    pub fn restore(&mut self) -> Option<&User> {
        self.current = match self.store.load() {
            Ok(saved) => saved,
            Err(e) => {
                warn!("Ignoring saved session: {}", e);
                None
            }
        };

        if let Some(session) = &self.current {
            info!(user_id = %session.user.id, role = %session.user.role, "Session restored");
        }
        self.user()
    }

    /// Records a fresh login or registration.
    pub fn establish(&mut self, auth: AuthResponse) -> &User {
        let session = StoredSession::from(auth);
        if let Err(e) = self.store.save(&session) {
            warn!("Session not persisted: {}", e);
        }
        info!(user_id = %session.user.id, role = %session.user.role, "Signed in");

        &self.current.insert(session).user
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.current.take() {
            info!(user_id = %session.user.id, "Signed out");
        }
        if let Err(e) = self.store.clear() {
            warn!("Saved session not cleared: {}", e);
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn screen(&self) -> Screen {
        match self.user().map(|u| u.role) {
            None => Screen::Login,
            Some(Role::Seller) => Screen::SellerDashboard,
            Some(Role::Buyer) => Screen::BuyerDashboard,
        }
    }
}
