//! Login / registration form.

use tracing::{debug, info};

use bookmart_client::{LoginRequest, RegisterRequest};
use bookmart_core::validation::validate_required;
use bookmart_core::{Role, User};

use crate::error::{UiError, UiResult};
use crate::state::AppContext;

const AUTH_FAILED: &str = "Authentication failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// One form for both login and registration.
///
/// Switching modes keeps whatever was typed. Login sends only email and
/// password.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl AuthForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
    }

    pub fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
    }

    /// Submits to the endpoint for the current mode and signs in on success.
    ///
    /// On failure the session is left unset and the typed values are kept.
    pub async fn submit(&mut self, ctx: &mut AppContext) -> UiResult<User> {
        let email = validate_required("email", &self.email)?;
        let password = validate_required("password", &self.password)?;

        let result = match self.mode {
            AuthMode::Login => {
                debug!(email = %email, "Logging in");
                ctx.api()
                    .login(&LoginRequest { email, password })
                    .await
            }
            AuthMode::Register => {
                let name = validate_required("name", &self.name)?;
                debug!(email = %email, role = %self.role, "Registering");
                ctx.api()
                    .register(&RegisterRequest {
                        name,
                        email,
                        password,
                        role: self.role,
                    })
                    .await
            }
        };

        let auth = result.map_err(|e| UiError::from_client(e, AUTH_FAILED))?;
        let user = ctx.establish(auth);
        info!(user_id = %user.id, role = %user.role, "Authenticated");

        *self = AuthForm::new();
        Ok(user)
    }
}
