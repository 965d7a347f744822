//! Catalog search and category filtering.
//!
//! Pure functions over a catalog snapshot. Both predicates of [`apply`]
//! are AND-combined and the catalog order is always preserved, so the
//! same snapshot, query, and category deterministically yield the same
//! visible subset.

use crate::types::Product;

/// Sentinel category meaning "no category restriction".
pub const CATEGORY_ALL: &str = "all";

/// Compute the visible product subset for a query and category selection.
///
/// A product is kept when:
/// - `category` is [`CATEGORY_ALL`] or equals the product's category, AND
/// - `query` is empty or appears as a case-insensitive substring of the
///   product's name, description, or category.
///
/// A stale category selection that no longer exists in the snapshot yields
/// an empty result, not an error.
#[must_use]
pub fn apply<'a>(catalog: &'a [Product], query: &str, category: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    catalog
        .iter()
        .filter(|product| matches_category(product, category) && matches_query(product, &needle))
        .collect()
}

/// The category labels observed in the catalog, deduplicated and sorted.
///
/// The [`CATEGORY_ALL`] sentinel is not included; callers prepend it when
/// building a selector.
#[must_use]
pub fn distinct_categories(catalog: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = catalog
        .iter()
        .map(|product| product.category.clone())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

fn matches_category(product: &Product, category: &str) -> bool {
    category == CATEGORY_ALL || product.category == category
}

fn matches_query(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
}
