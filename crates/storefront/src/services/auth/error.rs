//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] padauk_core::EmailError),

    /// Empty password.
    #[error("password cannot be empty")]
    EmptyPassword,
}
