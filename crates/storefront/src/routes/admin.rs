//! Admin product management route handlers.
//!
//! A role-gated table over the catalog with create/update/delete. The
//! `RequireAdmin` extractor does the gating; these handlers only see
//! authenticated admins.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use padauk_core::{Price, Product, ProductId, filter};

use crate::catalog::ProductDraft;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::routes::{UserView, format_kyat};
use crate::state::AppState;

/// Table row display data for templates.
#[derive(Clone)]
pub struct AdminRowView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub original_price: Option<String>,
    pub stock: u32,
    pub in_stock: bool,
    pub image: String,
}

impl From<&Product> for AdminRowView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: format_kyat(product.price),
            original_price: product.original_price.map(format_kyat),
            stock: product.stock,
            in_stock: product.in_stock(),
            image: product.image.clone(),
        }
    }
}

/// Admin table query parameters.
#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    #[serde(default)]
    pub q: String,
}

/// Product management page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/products.html")]
pub struct AdminProductsTemplate {
    pub products: Vec<AdminRowView>,
    pub query: String,
    pub user: Option<UserView>,
}

/// Product create/update form data.
///
/// Numeric fields arrive as strings so empty optional inputs can be
/// treated as absent instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    #[serde(default)]
    pub original_price: String,
    #[serde(default)]
    pub discount_percent: String,
    pub stock: String,
    #[serde(default)]
    pub image: String,
}

fn parse_price(field: &str, value: &str) -> Result<Price> {
    let minor_units = value
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("{field} must be a whole number")))?;
    Price::from_minor(minor_units).map_err(|e| AppError::BadRequest(e.to_string()))
}

fn parse_draft(form: ProductForm) -> Result<ProductDraft> {
    let price = parse_price("price", &form.price)?;

    let original_price = match form.original_price.trim() {
        "" => None,
        value => Some(parse_price("original price", value)?),
    };

    let discount_percent = match form.discount_percent.trim() {
        "" => None,
        value => Some(value.parse::<u8>().map_err(|_| {
            AppError::BadRequest("discount percent must be between 0 and 100".to_owned())
        })?),
    };

    let stock = form
        .stock
        .trim()
        .parse::<u32>()
        .map_err(|_| AppError::BadRequest("stock must be a non-negative whole number".to_owned()))?;

    Ok(ProductDraft {
        name: form.name,
        description: form.description,
        category: form.category,
        price,
        original_price,
        discount_percent,
        stock,
        image: form.image,
    })
}

/// Display the product management table.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<AdminQuery>,
) -> impl IntoResponse {
    let snapshot = state.catalog().snapshot();
    // Same substring match as the shop search, no category restriction.
    let products = filter::apply(&snapshot, &query.q, filter::CATEGORY_ALL)
        .into_iter()
        .map(AdminRowView::from)
        .collect();

    AdminProductsTemplate {
        products,
        query: query.q,
        user: Some(UserView::from(&admin)),
    }
}

/// Create a product from the admin form.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let draft = parse_draft(form)?;
    let product = state.catalog().create(draft)?;
    tracing::info!(id = %product.id, name = %product.name, "product created");
    Ok(Redirect::to("/manage"))
}

/// Update a product from the admin form.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let draft = parse_draft(form)?;
    let product = state.catalog().update(ProductId::new(id), draft)?;
    tracing::info!(id = %product.id, "product updated");
    Ok(Redirect::to("/manage"))
}

/// Delete a product.
///
/// The confirmation dialog is the view layer's job; this endpoint just
/// deletes.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    state.catalog().delete(ProductId::new(id))?;
    tracing::info!(id, "product deleted");
    Ok(Redirect::to("/manage"))
}
