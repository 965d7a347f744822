//! Storefront flows across the catalog, cart store, and auth service.
//!
//! These exercise the same sequences the HTTP handlers run, without a
//! server: session-scoped carts against a shared catalog, admin edits
//! flowing into the shop view, and role assignment at login.

use padauk_core::{Cart, Price, ProductId, filter};
use padauk_storefront::carts::CartStore;
use padauk_storefront::catalog::{CatalogError, ProductCatalog, ProductDraft};
use padauk_storefront::config::StorefrontConfig;
use padauk_storefront::models::Role;
use padauk_storefront::services::AuthService;

fn draft(name: &str, category: &str, minor_units: i64) -> ProductDraft {
    ProductDraft {
        name: name.to_owned(),
        description: format!("{name} description"),
        category: category.to_owned(),
        price: Price::from_minor(minor_units).expect("valid price"),
        original_price: None,
        discount_percent: None,
        stock: 10,
        image: "/static/images/new.jpg".to_owned(),
    }
}

#[test]
fn test_created_product_shows_up_in_shop_filter() {
    let catalog = ProductCatalog::seeded();

    let created = catalog
        .create(draft("Bamboo Hat", "clothing", 9_000))
        .expect("valid draft");

    let snapshot = catalog.snapshot();
    let visible = filter::apply(&snapshot, "bamboo", filter::CATEGORY_ALL);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible.first().map(|p| p.id), Some(created.id));

    // The new category is offered in the dropdown.
    assert!(filter::distinct_categories(&snapshot).contains(&"clothing".to_owned()));
}

#[test]
fn test_cart_keeps_price_across_catalog_update() {
    let catalog = ProductCatalog::seeded();
    let carts = CartStore::new();
    let original = catalog.get(ProductId::new(1)).expect("seeded product");

    carts.mutate("session-a", |cart| cart.add_item(&original));

    // Admin raises the price after the shopper added the item.
    let mut updated = draft("Cotton Longyi", "clothing", 99_000);
    updated.image.clone_from(&original.image);
    catalog.update(original.id, updated).expect("valid update");

    let total = carts.read("session-a", Cart::total_price);
    assert_eq!(total, original.price);
}

#[test]
fn test_cart_line_survives_product_deletion() {
    let catalog = ProductCatalog::seeded();
    let carts = CartStore::new();
    let product = catalog.get(ProductId::new(2)).expect("seeded product");

    carts.mutate("session-a", |cart| cart.add_item(&product));
    catalog.delete(product.id).expect("seeded product");

    // The snapshot taken at add time still renders the cart line.
    carts.read("session-a", |cart| {
        let line = cart.line_items().first().expect("one line");
        assert_eq!(line.snapshot.name, product.name);
        assert_eq!(line.line_price(), product.price);
    });
    assert!(catalog.get(product.id).is_none());
}

#[test]
fn test_sessions_do_not_share_carts() {
    let catalog = ProductCatalog::seeded();
    let carts = CartStore::new();
    let product = catalog.get(ProductId::new(3)).expect("seeded product");

    carts.mutate("session-a", |cart| cart.add_item(&product));

    assert_eq!(carts.read("session-a", Cart::total_item_count), 1);
    assert_eq!(carts.read("session-b", Cart::total_item_count), 0);
}

#[test]
fn test_admin_search_narrows_management_table() {
    let catalog = ProductCatalog::seeded();
    let snapshot = catalog.snapshot();

    let hits = filter::apply(&snapshot, "tea", filter::CATEGORY_ALL);

    assert!(!hits.is_empty());
    assert!(hits.len() < snapshot.len());
    for product in hits {
        let haystack = format!(
            "{} {} {}",
            product.name, product.description, product.category
        )
        .to_lowercase();
        assert!(haystack.contains("tea"));
    }
}

#[test]
fn test_update_validation_guards_catalog() {
    let catalog = ProductCatalog::seeded();
    let before = catalog.get(ProductId::new(1)).expect("seeded product");

    let result = catalog.update(before.id, draft("", "clothing", 1_000));

    assert!(matches!(result, Err(CatalogError::Invalid(_))));
    assert_eq!(catalog.get(before.id), Some(before));
}

#[test]
fn test_login_roles_gate_admin_access() {
    let config = StorefrontConfig::from_env().expect("defaults should load");
    let auth = AuthService::new(&config);

    let admin = auth.login("admin@example.com", "admin123").expect("login");
    let shopper = auth.login("maya@example.com", "secret").expect("login");

    assert_eq!(admin.role, Role::Admin);
    assert!(admin.is_admin());
    assert_eq!(shopper.role, Role::User);
    assert!(!shopper.is_admin());
}
