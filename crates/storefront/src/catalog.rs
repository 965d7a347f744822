//! In-memory product catalog.
//!
//! Stands in for the external product source: an ordered sequence of
//! validated product records plus the create/update/delete operations the
//! admin view needs. Records are validated here, at the catalog boundary,
//! so everything downstream can assume well-formed products.
//!
//! No persistence: the catalog lives for the process lifetime only.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use padauk_core::{Price, Product, ProductError, ProductId};

/// Errors from catalog operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The product record failed boundary validation.
    #[error("invalid product: {0}")]
    Invalid(#[from] ProductError),

    /// No product exists with the given id.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// A product with this id already exists in the snapshot.
    #[error("product {0} already exists")]
    DuplicateId(ProductId),
}

/// Fields accepted when creating or updating a product.
///
/// The catalog assigns ids and keeps rating/review data; the admin form
/// only edits these.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Price,
    pub original_price: Option<Price>,
    pub discount_percent: Option<u8>,
    pub stock: u32,
    pub image: String,
}

struct CatalogInner {
    products: Vec<Product>,
    next_id: i32,
}

/// The in-memory product source.
///
/// Interior mutability behind a `Mutex`; all operations are synchronous
/// and short. Lock poisoning is recovered from since the data is plain
/// values that cannot be left in a torn state.
pub struct ProductCatalog {
    inner: Mutex<CatalogInner>,
}

impl ProductCatalog {
    /// Create a catalog from an initial product list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Invalid` if any record fails validation, or
    /// `CatalogError::DuplicateId` if two records share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut max_id = 0;
        for product in &products {
            product.validate()?;
            if products.iter().filter(|p| p.id == product.id).count() > 1 {
                return Err(CatalogError::DuplicateId(product.id));
            }
            max_id = max_id.max(product.id.as_i32());
        }
        Ok(Self {
            inner: Mutex::new(CatalogInner {
                products,
                next_id: max_id.saturating_add(1),
            }),
        })
    }

    /// Create a catalog seeded with the demo product set.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed_products()).unwrap_or_else(|_| Self {
            inner: Mutex::new(CatalogInner {
                products: Vec::new(),
                next_id: 1,
            }),
        })
    }

    /// The current catalog snapshot, in catalog order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    /// Look up a single product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.lock().products.iter().find(|p| p.id == id).cloned()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().products.is_empty()
    }

    /// Add a new product from a draft, assigning the next id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Invalid` if the draft fails validation.
    pub fn create(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        let mut inner = self.lock();
        let product = Product {
            id: ProductId::new(inner.next_id),
            name: draft.name,
            description: draft.description,
            category: draft.category,
            price: draft.price,
            original_price: draft.original_price,
            discount_percent: draft.discount_percent,
            stock: draft.stock,
            rating: 0.0,
            reviews: 0,
            image: draft.image,
            is_new: true,
        };
        product.validate()?;
        inner.next_id = inner.next_id.saturating_add(1);
        inner.products.push(product.clone());
        Ok(product)
    }

    /// Replace an existing product's editable fields with a draft.
    ///
    /// Rating, review count, and the "new" badge are kept.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the id is unknown, or
    /// `CatalogError::Invalid` if the updated record fails validation.
    pub fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, CatalogError> {
        let mut inner = self.lock();
        let existing = inner
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))?;

        let updated = Product {
            id,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            price: draft.price,
            original_price: draft.original_price,
            discount_percent: draft.discount_percent,
            stock: draft.stock,
            rating: existing.rating,
            reviews: existing.reviews,
            image: draft.image,
            is_new: existing.is_new,
        };
        updated.validate()?;
        *existing = updated.clone();
        Ok(updated)
    }

    /// Remove a product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the id is unknown.
    pub fn delete(&self, id: ProductId) -> Result<(), CatalogError> {
        let mut inner = self.lock();
        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        if inner.products.len() == before {
            return Err(CatalogError::NotFound(id));
        }
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CatalogInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Build a price from minor units that are known-valid at compile time.
fn price(minor_units: i64) -> Price {
    Price::from_minor(minor_units).unwrap_or(Price::ZERO)
}

/// The demo product set shown on the shop page.
fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(1),
            name: "Cotton Longyi".to_owned(),
            description: "Handwoven cotton longyi with traditional pattern".to_owned(),
            category: "clothing".to_owned(),
            price: price(15_000),
            original_price: Some(price(20_000)),
            discount_percent: Some(25),
            stock: 12,
            rating: 4.5,
            reviews: 38,
            image: "/static/images/longyi.jpg".to_owned(),
            is_new: false,
        },
        Product {
            id: ProductId::new(2),
            name: "Lacquerware Bowl".to_owned(),
            description: "Hand-painted bagan lacquerware bowl".to_owned(),
            category: "kitchen".to_owned(),
            price: price(32_000),
            original_price: None,
            discount_percent: None,
            stock: 5,
            rating: 4.8,
            reviews: 21,
            image: "/static/images/lacquer-bowl.jpg".to_owned(),
            is_new: true,
        },
        Product {
            id: ProductId::new(3),
            name: "Shan Tea Sampler".to_owned(),
            description: "Green and fermented tea leaves from Shan hills".to_owned(),
            category: "food".to_owned(),
            price: price(8_500),
            original_price: None,
            discount_percent: None,
            stock: 40,
            rating: 4.2,
            reviews: 77,
            image: "/static/images/shan-tea.jpg".to_owned(),
            is_new: false,
        },
        Product {
            id: ProductId::new(4),
            name: "Teak Serving Tray".to_owned(),
            description: "Solid teak tray with carved handles".to_owned(),
            category: "kitchen".to_owned(),
            price: price(27_000),
            original_price: Some(price(30_000)),
            discount_percent: Some(10),
            stock: 0,
            rating: 4.0,
            reviews: 9,
            image: "/static/images/teak-tray.jpg".to_owned(),
            is_new: false,
        },
        Product {
            id: ProductId::new(5),
            name: "Silk Scarf".to_owned(),
            description: "Inle lake silk scarf, naturally dyed".to_owned(),
            category: "clothing".to_owned(),
            price: price(22_500),
            original_price: None,
            discount_percent: None,
            stock: 18,
            rating: 4.7,
            reviews: 54,
            image: "/static/images/silk-scarf.jpg".to_owned(),
            is_new: true,
        },
        Product {
            id: ProductId::new(6),
            name: "Thanaka Powder".to_owned(),
            description: "Ground thanaka bark powder, 200g jar".to_owned(),
            category: "beauty".to_owned(),
            price: price(6_000),
            original_price: None,
            discount_percent: None,
            stock: 60,
            rating: 4.4,
            reviews: 132,
            image: "/static/images/thanaka.jpg".to_owned(),
            is_new: false,
        },
    ]
}
