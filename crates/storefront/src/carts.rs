//! Session-keyed cart storage.
//!
//! Each browser session owns at most one [`Cart`], looked up by the cart
//! id stored in the session. Cart mutations are read-modify-write and not
//! atomic by construction, so every access runs under the store lock;
//! handlers never hold the lock across an await point.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use padauk_core::Cart;

/// In-memory store of per-session carts.
///
/// Carts are created empty on first access and discarded with the process;
/// there is no cross-session persistence.
#[derive(Default)]
pub struct CartStore {
    carts: Mutex<HashMap<String, Cart>>,
}

impl CartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a mutation against the cart for `cart_id`, creating it empty if
    /// it does not exist yet.
    pub fn mutate<T>(&self, cart_id: &str, f: impl FnOnce(&mut Cart) -> T) -> T {
        let mut carts = self.lock();
        let cart = carts.entry(cart_id.to_owned()).or_default();
        f(cart)
    }

    /// Run a read-only closure against the cart for `cart_id`.
    ///
    /// An unknown id reads as an empty cart; nothing is inserted.
    pub fn read<T>(&self, cart_id: &str, f: impl FnOnce(&Cart) -> T) -> T {
        let carts = self.lock();
        match carts.get(cart_id) {
            Some(cart) => f(cart),
            None => f(&Cart::new()),
        }
    }

    /// Number of carts currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no carts are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Cart>> {
        self.carts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padauk_core::{Price, Product, ProductId};

    fn product(id: i32, minor_units: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("p{id}"),
            description: String::new(),
            category: "general".to_owned(),
            price: Price::from_minor(minor_units).expect("valid price"),
            original_price: None,
            discount_percent: None,
            stock: 10,
            rating: 4.0,
            reviews: 1,
            image: String::new(),
            is_new: false,
        }
    }

    #[test]
    fn test_mutate_creates_cart() {
        let store = CartStore::new();
        let p1 = product(1, 1000);

        let count = store.mutate("cart-a", |cart| {
            cart.add_item(&p1);
            cart.total_item_count()
        });

        assert_eq!(count, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_read_unknown_is_empty_without_insert() {
        let store = CartStore::new();

        let count = store.read("missing", Cart::total_item_count);

        assert_eq!(count, 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_carts_are_isolated_by_id() {
        let store = CartStore::new();
        let p1 = product(1, 1000);

        store.mutate("cart-a", |cart| cart.add_item(&p1));
        store.mutate("cart-b", |cart| {
            cart.add_item(&p1);
            cart.add_item(&p1)
        });

        assert_eq!(store.read("cart-a", Cart::total_item_count), 1);
        assert_eq!(store.read("cart-b", Cart::total_item_count), 2);
    }
}
