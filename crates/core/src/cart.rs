//! The shopping cart state machine.
//!
//! A [`Cart`] is an ordered sequence of line items for one shopping
//! session: created empty, mutated by user actions, discarded at session
//! end. Totals are always derived from the line items, never stored.
//!
//! # Invariants
//!
//! - At most one line item per product id.
//! - Every line item has quantity >= 1; a transition to quantity 0 removes
//!   the line entirely.
//! - Insertion order is preserved: the first add determines a line's
//!   position, and later adds of the same product never reorder it.
//! - A line's display snapshot (name, unit price, image) is captured on
//!   first add and never updated by later increments, so catalog price
//!   changes do not retroactively alter existing lines.
//!
//! # Change notification
//!
//! Every mutation returns a [`CartEvent`] describing what happened. The
//! view layer subscribes by inspecting the event and re-rendering; the
//! cart itself knows nothing about rendering.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// Display data captured from a product when it first enters the cart.
///
/// The unit price here is fixed at first-add time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    /// Product display name at add time.
    pub name: String,
    /// Unit price at add time, in minor currency units.
    pub unit_price: Price,
    /// Image URL or path at add time.
    pub image: String,
}

impl From<&Product> for ItemSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
        }
    }
}

/// One row in the cart: a product reference and its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Number of units. Always >= 1.
    pub quantity: u32,
    /// Display data captured on first add.
    pub snapshot: ItemSnapshot,
}

impl LineItem {
    /// The line's total price: captured unit price times quantity.
    #[must_use]
    pub const fn line_price(&self) -> Price {
        self.snapshot.unit_price.times(self.quantity)
    }
}

/// What a cart mutation did, for change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line item was appended.
    LineAdded(ProductId),
    /// An existing line's quantity changed to the given value.
    QuantityChanged(ProductId, u32),
    /// A line item was removed.
    LineRemoved(ProductId),
    /// The mutation was a no-op; the cart did not change.
    Unchanged,
}

impl CartEvent {
    /// Whether the cart actually changed.
    #[must_use]
    pub const fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// A session-scoped shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of a product.
    ///
    /// If the product is not yet in the cart, appends a new line with
    /// quantity 1, capturing the product's display snapshot at this
    /// instant. If a line already exists, increments its quantity by 1
    /// and leaves the captured snapshot (including price) unchanged.
    ///
    /// Always succeeds; no stock bound is enforced here.
    pub fn add_item(&mut self, product: &Product) -> CartEvent {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return CartEvent::QuantityChanged(product.id, line.quantity);
        }
        self.lines.push(LineItem {
            product_id: product.id,
            quantity: 1,
            snapshot: ItemSnapshot::from(product),
        });
        CartEvent::LineAdded(product.id)
    }

    /// Remove the line item for a product. No-op if absent.
    pub fn remove_item(&mut self, product_id: ProductId) -> CartEvent {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        if self.lines.len() == before {
            CartEvent::Unchanged
        } else {
            CartEvent::LineRemoved(product_id)
        }
    }

    /// Replace the quantity for a product's line item.
    ///
    /// A quantity of 0 behaves exactly like [`Self::remove_item`]. Setting
    /// a quantity for a product that was never added is a no-op. No upper
    /// bound is enforced against stock; that is a policy layer above this
    /// contract.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> CartEvent {
        if quantity == 0 {
            return self.remove_item(product_id);
        }
        match self.line_mut(product_id) {
            Some(line) if line.quantity == quantity => CartEvent::Unchanged,
            Some(line) => {
                line.quantity = quantity;
                CartEvent::QuantityChanged(product_id, quantity)
            }
            None => CartEvent::Unchanged,
        }
    }

    /// Sum of all line quantities. 0 for an empty cart.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |total, line| total.saturating_add(line.quantity))
    }

    /// Sum over lines of captured unit price times quantity.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines
            .iter()
            .fold(Price::ZERO, |total, line| total.plus(line.line_price()))
    }

    /// Whether a line item exists for the given product.
    #[must_use]
    pub fn is_in_cart(&self, product_id: ProductId) -> bool {
        self.lines.iter().any(|line| line.product_id == product_id)
    }

    /// The ordered line items, as a read-only view.
    #[must_use]
    pub fn line_items(&self) -> &[LineItem] {
        &self.lines
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut LineItem> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i32, name: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: format!("{name} description"),
            category: "general".to_owned(),
            price: Price::from_minor(price).expect("valid price"),
            original_price: None,
            discount_percent: None,
            stock: 10,
            rating: 4.0,
            reviews: 1,
            image: format!("/images/{id}.jpg"),
            is_new: false,
        }
    }

    #[test]
    fn test_add_first_item() {
        let mut cart = Cart::new();
        let p1 = product(1, "p1", 1000);

        let event = cart.add_item(&p1);

        assert_eq!(event, CartEvent::LineAdded(p1.id));
        assert_eq!(cart.total_item_count(), 1);
        assert_eq!(cart.total_price().minor_units(), 1000);
        assert!(cart.is_in_cart(p1.id));
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let mut cart = Cart::new();
        let p1 = product(1, "p1", 1000);

        cart.add_item(&p1);
        let event = cart.add_item(&p1);

        assert_eq!(event, CartEvent::QuantityChanged(p1.id, 2));
        assert_eq!(cart.line_items().len(), 1);
        assert_eq!(cart.total_item_count(), 2);
        assert_eq!(cart.total_price().minor_units(), 2000);
    }

    #[test]
    fn test_quantity_monotonic_under_repeated_add() {
        let mut cart = Cart::new();
        let p1 = product(1, "p1", 250);

        for _ in 0..5 {
            cart.add_item(&p1);
        }

        assert_eq!(cart.line_items().len(), 1);
        let line = cart.line_items().first().expect("one line");
        assert_eq!(line.quantity, 5);
    }

    #[test]
    fn test_price_fixed_at_first_add() {
        let mut cart = Cart::new();
        let mut p1 = product(1, "p1", 1000);
        cart.add_item(&p1);

        // Catalog price changes; later increments keep the captured price.
        p1.price = Price::from_minor(9999).expect("valid price");
        cart.add_item(&p1);

        assert_eq!(cart.total_price().minor_units(), 2000);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        let p1 = product(1, "p1", 1000);
        let p2 = product(2, "p2", 500);
        cart.add_item(&p1);
        cart.add_item(&p2);

        let event = cart.remove_item(p1.id);

        assert_eq!(event, CartEvent::LineRemoved(p1.id));
        assert_eq!(cart.line_items().len(), 1);
        assert_eq!(cart.total_price().minor_units(), 500);
        assert!(!cart.is_in_cart(p1.id));
        assert!(cart.is_in_cart(p2.id));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "p1", 1000));

        let event = cart.remove_item(ProductId::new(42));

        assert_eq!(event, CartEvent::Unchanged);
        assert_eq!(cart.total_item_count(), 1);
    }

    #[test]
    fn test_add_then_remove_restores_prior_state() {
        let mut cart = Cart::new();
        let p1 = product(1, "p1", 1000);
        let p2 = product(2, "p2", 500);
        cart.add_item(&p1);
        let before = cart.clone();

        cart.add_item(&p2);
        cart.remove_item(p2.id);

        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        let p1 = product(1, "p1", 1000);
        cart.add_item(&p1);

        let event = cart.set_quantity(p1.id, 5);

        assert_eq!(event, CartEvent::QuantityChanged(p1.id, 5));
        assert_eq!(cart.total_item_count(), 5);
        assert_eq!(cart.total_price().minor_units(), 5000);
    }

    #[test]
    fn test_set_quantity_zero_collapses_line() {
        let mut cart = Cart::new();
        let p1 = product(1, "p1", 1000);
        cart.add_item(&p1);
        cart.add_item(&p1);

        let event = cart.set_quantity(p1.id, 0);

        assert_eq!(event, CartEvent::LineRemoved(p1.id));
        assert!(!cart.is_in_cart(p1.id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_on_absent_product_is_noop() {
        let mut cart = Cart::new();

        let event = cart.set_quantity(ProductId::new(1), 3);

        assert_eq!(event, CartEvent::Unchanged);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_same_quantity_is_unchanged() {
        let mut cart = Cart::new();
        let p1 = product(1, "p1", 1000);
        cart.add_item(&p1);

        assert_eq!(cart.set_quantity(p1.id, 1), CartEvent::Unchanged);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        let p1 = product(1, "p1", 100);
        let p2 = product(2, "p2", 200);
        let p3 = product(3, "p3", 300);
        cart.add_item(&p1);
        cart.add_item(&p2);
        cart.add_item(&p3);

        // Re-adding p1 must not move it to the back.
        cart.add_item(&p1);

        let order: Vec<i32> = cart
            .line_items()
            .iter()
            .map(|line| line.product_id.as_i32())
            .collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_aggregates_consistent_with_lines() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "p1", 1000));
        cart.add_item(&product(2, "p2", 500));
        cart.set_quantity(ProductId::new(2), 4);

        let count: u32 = cart.line_items().iter().map(|line| line.quantity).sum();
        let price: i64 = cart
            .line_items()
            .iter()
            .map(|line| line.line_price().minor_units())
            .sum();

        assert_eq!(cart.total_item_count(), count);
        assert_eq!(cart.total_price().minor_units(), price);
    }

    #[test]
    fn test_empty_cart_aggregates() {
        let cart = Cart::new();
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_price(), Price::ZERO);
        assert!(cart.is_empty());
        assert!(cart.line_items().is_empty());
    }

    #[test]
    fn test_every_item_removable_back_to_empty() {
        let mut cart = Cart::new();
        let p1 = product(1, "p1", 1000);
        let p2 = product(2, "p2", 500);
        cart.add_item(&p1);
        cart.add_item(&p2);

        cart.remove_item(p1.id);
        cart.set_quantity(p2.id, 0);

        assert_eq!(cart, Cart::new());
    }
}
