//! Service layer for storefront.

pub mod auth;

pub use auth::{AuthError, AuthService};
