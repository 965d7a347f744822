//! Middleware for storefront.

pub mod auth;
pub mod session;

pub use auth::{OptionalUser, RequireAdmin};
pub use session::create_session_layer;
