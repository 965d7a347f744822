//! Mock authentication service.
//!
//! This is a demo: there is no user database and no password hashing.
//! The configured admin credentials yield the admin role; any other
//! well-formed email with a non-empty password logs in as a regular user.

mod error;

pub use error::AuthError;

use secrecy::ExposeSecret;

use padauk_core::Email;

use crate::config::StorefrontConfig;
use crate::models::{CurrentUser, Role};

/// Authentication service.
///
/// Holds the demo admin credentials from configuration.
pub struct AuthService<'a> {
    config: &'a StorefrontConfig,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(config: &'a StorefrontConfig) -> Self {
        Self { config }
    }

    /// Login with email and password.
    ///
    /// The configured admin email/password pair logs in with
    /// [`Role::Admin`]; any other structurally valid email with a
    /// non-empty password logs in with [`Role::User`].
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is malformed and
    /// `AuthError::EmptyPassword` if the password is blank.
    pub fn login(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email.trim())?;

        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        let role = if email.as_str() == self.config.admin_email
            && password == self.config.admin_password.expose_secret()
        {
            Role::Admin
        } else {
            Role::User
        };

        tracing::info!(email = %email, role = ?role, "login");

        Ok(CurrentUser { email, role })
    }
}
