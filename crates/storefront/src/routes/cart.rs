//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The session stores a cart id mapped to an in-memory cart; every cart
//! mutation returns a `CartEvent`, and handlers translate a changed event
//! into an `HX-Trigger: cart-updated` header so subscribed page elements
//! redraw. That header is the entire coupling between cart state and the
//! rendered page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use padauk_core::{Cart, CartEvent, ProductId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::session_keys;
use crate::routes::{UserView, format_kyat};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::new())
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .line_items()
                .iter()
                .map(|line| CartItemView {
                    product_id: line.product_id.as_i32(),
                    name: line.snapshot.name.clone(),
                    image: line.snapshot.image.clone(),
                    quantity: line.quantity,
                    unit_price: format_kyat(line.snapshot.unit_price),
                    line_price: format_kyat(line.line_price()),
                })
                .collect(),
            subtotal: format_kyat(cart.total_price()),
            item_count: cart.total_item_count(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart id from the session.
pub(crate) async fn get_cart_id(session: &Session) -> Option<String> {
    session
        .get::<String>(session_keys::CART_ID)
        .await
        .ok()
        .flatten()
}

/// Get the session's cart id, creating and storing one if absent.
async fn ensure_cart_id(session: &Session) -> Result<String> {
    if let Some(cart_id) = get_cart_id(session).await {
        return Ok(cart_id);
    }
    let cart_id = uuid::Uuid::new_v4().to_string();
    session
        .insert(session_keys::CART_ID, &cart_id)
        .await
        .map_err(|e| AppError::Internal(format!("failed to save cart id: {e}")))?;
    Ok(cart_id)
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Checkout summary page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/checkout.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub user: Option<UserView>,
}

/// Wrap a fragment response with the cart-updated trigger when the
/// mutation actually changed the cart.
fn with_change_trigger(event: CartEvent, fragment: impl IntoResponse) -> Response {
    if event.changed() {
        (AppendHeaders([("HX-Trigger", "cart-updated")]), fragment).into_response()
    } else {
        fragment.into_response()
    }
}

/// Cart sidebar items fragment (HTMX).
#[instrument(skip(state, session))]
pub async fn sidebar(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = match get_cart_id(&session).await {
        Some(cart_id) => state.carts().read(&cart_id, |cart| CartView::from(cart)),
        None => CartView::empty(),
    };

    CartItemsTemplate { cart }
}

/// Add one unit of a product to the cart (HTMX).
///
/// Creates the session's cart on first use. Returns the cart count badge
/// with an HTMX trigger so other cart elements refresh.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product_id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .get(product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let cart_id = ensure_cart_id(&session).await?;
    let (event, count) = state.carts().mutate(&cart_id, |cart| {
        let event = cart.add_item(&product);
        (event, cart.total_item_count())
    });

    tracing::debug!(?event, count, "cart add");

    Ok(with_change_trigger(event, CartCountTemplate { count }))
}

/// Update a cart line's quantity (HTMX).
///
/// Quantity 0 removes the line; unknown products are a no-op.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let Some(cart_id) = get_cart_id(&session).await else {
        return CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response();
    };

    let (event, cart) = state.carts().mutate(&cart_id, |cart| {
        let event = cart.set_quantity(ProductId::new(form.product_id), form.quantity);
        (event, CartView::from(&*cart))
    });

    tracing::debug!(?event, "cart update");

    with_change_trigger(event, CartItemsTemplate { cart })
}

/// Remove a line from the cart (HTMX). No-op if absent.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let Some(cart_id) = get_cart_id(&session).await else {
        return CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response();
    };

    let (event, cart) = state.carts().mutate(&cart_id, |cart| {
        let event = cart.remove_item(ProductId::new(form.product_id));
        (event, CartView::from(&*cart))
    });

    tracing::debug!(?event, "cart remove");

    with_change_trigger(event, CartItemsTemplate { cart })
}

/// Cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let count = match get_cart_id(&session).await {
        Some(cart_id) => state.carts().read(&cart_id, Cart::total_item_count),
        None => 0,
    };

    CartCountTemplate { count }
}

/// Display-only checkout summary.
///
/// There is no order pipeline: this page renders the cart totals and
/// leaves the cart untouched.
#[instrument(skip(state, session))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    crate::middleware::OptionalUser(user): crate::middleware::OptionalUser,
) -> impl IntoResponse {
    let cart = match get_cart_id(&session).await {
        Some(cart_id) => state.carts().read(&cart_id, |cart| CartView::from(cart)),
        None => CartView::empty(),
    };

    CheckoutTemplate {
        cart,
        user: user.as_ref().map(UserView::from),
    }
}
