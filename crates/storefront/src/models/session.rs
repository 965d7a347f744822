//! Session-related types.
//!
//! Types stored in the session for authentication state. The cart and
//! filter logic never read the session; identity is passed explicitly to
//! the views that gate on it.

use serde::{Deserialize, Serialize};

use padauk_core::Email;

/// The role attached to a logged-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May use the admin product management view.
    Admin,
    /// Regular shopper.
    User,
}

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's email address.
    pub email: Email,
    /// User's role.
    pub role: Role,
}

impl CurrentUser {
    /// Whether this user may access the admin view.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Session keys for stored state.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the session's cart id.
    pub const CART_ID: &str = "cart_id";
}
