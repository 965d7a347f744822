//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Shop page (search + category + grid)
//! GET  /health                 - Health check
//! GET  /shop/grid              - Product grid fragment (HTMX)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart sidebar items fragment
//! POST /cart/add               - Add to cart (returns count, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Display-only order summary (cart unchanged)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! POST /auth/logout            - Logout action
//!
//! # Admin (requires admin role)
//! GET  /manage                 - Product management table
//! POST /manage/products        - Create product
//! POST /manage/products/{id}   - Update product
//! POST /manage/products/{id}/delete - Delete product
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod shop;

use axum::{
    Router,
    routing::{get, post},
};

use padauk_core::Price;

use crate::models::CurrentUser;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::sidebar))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the admin product management router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::index))
        .route("/products", post(admin::create))
        .route("/products/{id}", post(admin::update))
        .route("/products/{id}/delete", post(admin::delete))
}

/// Create the complete application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shop::index))
        .route("/shop/grid", get(shop::grid))
        .route("/checkout", get(cart::checkout))
        .nest("/cart", cart_routes())
        .nest("/auth", auth_routes())
        .nest("/manage", admin_routes())
}

/// User display data for the navigation bar.
#[derive(Clone)]
pub struct UserView {
    pub email: String,
    pub is_admin: bool,
}

impl From<&CurrentUser> for UserView {
    fn from(user: &CurrentUser) -> Self {
        Self {
            email: user.email.to_string(),
            is_admin: user.is_admin(),
        }
    }
}

/// Format a price in minor units as a kyat string, e.g. "12,500 Ks".
#[must_use]
pub fn format_kyat(price: Price) -> String {
    let digits = price.minor_units().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped} Ks")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kyat(minor_units: i64) -> String {
        format_kyat(Price::from_minor(minor_units).expect("valid price"))
    }

    #[test]
    fn test_format_kyat_grouping() {
        assert_eq!(kyat(0), "0 Ks");
        assert_eq!(kyat(500), "500 Ks");
        assert_eq!(kyat(1500), "1,500 Ks");
        assert_eq!(kyat(12_500), "12,500 Ks");
        assert_eq!(kyat(1_234_567), "1,234,567 Ks");
    }
}
