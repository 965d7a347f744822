//! Domain models for storefront.

pub mod session;

pub use session::{CurrentUser, Role, keys as session_keys};
