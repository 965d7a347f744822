//! Shop page route handlers.
//!
//! The shop page renders the filtered product grid with search and
//! category controls, summary stats, and the cart badge. Searching swaps
//! just the grid fragment via HTMX.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use padauk_core::{Price, Product, ProductId, filter};

use crate::filters;
use crate::middleware::OptionalUser;
use crate::routes::{UserView, cart::get_cart_id, format_kyat};
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub original_price: Option<String>,
    pub discount_percent: Option<u8>,
    pub stock: u32,
    pub stars: String,
    pub reviews: u32,
    pub image: String,
    pub is_new: bool,
    pub in_stock: bool,
    pub in_cart: bool,
}

impl ProductCardView {
    fn new(product: &Product, in_cart: bool) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: format_kyat(product.price),
            original_price: product.original_price.map(format_kyat),
            discount_percent: product.discount_percent,
            stock: product.stock,
            stars: star_row(product.rating),
            reviews: product.reviews,
            image: product.image.clone(),
            is_new: product.is_new,
            in_stock: product.in_stock(),
            in_cart,
        }
    }
}

/// Render a five-star row for a rating, e.g. "★★★★☆".
fn star_row(rating: f32) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = (rating.floor().clamp(0.0, 5.0)) as usize;
    let mut row = "★".repeat(filled);
    row.push_str(&"☆".repeat(5 - filled));
    row
}

/// Shop page query parameters.
#[derive(Debug, Deserialize)]
pub struct ShopQuery {
    #[serde(default)]
    pub q: String,
    pub category: Option<String>,
}

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopTemplate {
    pub products: Vec<ProductCardView>,
    pub categories: Vec<String>,
    pub query: String,
    pub category: String,
    pub filtered_count: usize,
    pub cart_count: u32,
    pub cart_total: String,
    pub user: Option<UserView>,
}

/// Product grid fragment template (for HTMX search).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub products: Vec<ProductCardView>,
    pub query: String,
    pub filtered_count: usize,
}

/// Compute the visible cards for a query/category pair, flagging products
/// already in the session's cart.
fn visible_cards(
    state: &AppState,
    in_cart: &[ProductId],
    query: &str,
    category: &str,
) -> Vec<ProductCardView> {
    let snapshot = state.catalog().snapshot();
    filter::apply(&snapshot, query, category)
        .into_iter()
        .map(|product| ProductCardView::new(product, in_cart.contains(&product.id)))
        .collect()
}

/// Read the cart badge data and in-cart product ids for the session.
async fn cart_context(state: &AppState, session: &Session) -> (u32, Price, Vec<ProductId>) {
    match get_cart_id(session).await {
        Some(cart_id) => state.carts().read(&cart_id, |cart| {
            (
                cart.total_item_count(),
                cart.total_price(),
                cart.line_items()
                    .iter()
                    .map(|line| line.product_id)
                    .collect(),
            )
        }),
        None => (0, Price::ZERO, Vec::new()),
    }
}

/// Display the shop page.
#[instrument(skip(state, session, user))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    OptionalUser(user): OptionalUser,
    Query(query): Query<ShopQuery>,
) -> impl IntoResponse {
    let category = query
        .category
        .unwrap_or_else(|| filter::CATEGORY_ALL.to_owned());
    let (cart_count, cart_total, in_cart) = cart_context(&state, &session).await;
    let products = visible_cards(&state, &in_cart, &query.q, &category);

    ShopTemplate {
        filtered_count: products.len(),
        products,
        categories: filter::distinct_categories(&state.catalog().snapshot()),
        query: query.q,
        category,
        cart_count,
        cart_total: format_kyat(cart_total),
        user: user.as_ref().map(UserView::from),
    }
}

/// Product grid fragment for live search (HTMX).
#[instrument(skip(state, session))]
pub async fn grid(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ShopQuery>,
) -> impl IntoResponse {
    let category = query
        .category
        .unwrap_or_else(|| filter::CATEGORY_ALL.to_owned());
    let (_, _, in_cart) = cart_context(&state, &session).await;
    let products = visible_cards(&state, &in_cart, &query.q, &category);

    ProductGridTemplate {
        filtered_count: products.len(),
        products,
        query: query.q,
    }
}
