//! Application context shared by every view.

use std::sync::Arc;

use bookmart_client::{AuthResponse, MarketApi, SessionStore};
use bookmart_core::User;

use super::session::{Screen, SessionHolder};

/// The backend handle plus the session gating which view is shown.
///
/// The API client always carries the token of the session held here.
pub struct AppContext {
    api: Arc<dyn MarketApi>,
    session: SessionHolder,
}

impl AppContext {
    pub fn new(api: Arc<dyn MarketApi>, store: Box<dyn SessionStore>) -> Self {
        AppContext {
            api,
            session: SessionHolder::new(store),
        }
    }

    pub fn api(&self) -> &dyn MarketApi {
        self.api.as_ref()
    }

    /// Startup: pick up a saved session so the login screen is skipped.
    pub fn restore(&mut self) -> Option<User> {
        let user = self.session.restore().cloned();
        self.api.set_token(self.session.token().map(str::to_string));
        user
    }

    pub fn establish(&mut self, auth: AuthResponse) -> User {
        self.api.set_token(Some(auth.token.clone()));
        self.session.establish(auth).clone()
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.api.set_token(None);
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn screen(&self) -> Screen {
        self.session.screen()
    }
}
