//! The catalog product record.
//!
//! Products are an explicit, validated schema rather than loosely-shaped
//! records: validation happens once at the catalog boundary, so the cart
//! and filter logic can assume every `Product` they see is well-formed.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Validation errors for a [`Product`] record.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The display name is empty or whitespace.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The category label is empty or whitespace.
    #[error("product category cannot be empty")]
    EmptyCategory,
    /// The discount percentage is above 100.
    #[error("discount percent must be at most 100, got {0}")]
    DiscountOutOfRange(u8),
    /// The original price is below the current price.
    #[error("original price must not be below the current price")]
    OriginalPriceBelowCurrent,
}

/// A product as supplied by the catalog.
///
/// Read-only to the cart and filter logic. Identifier uniqueness within a
/// catalog snapshot is the catalog's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable identifier within a catalog snapshot.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short description shown on cards and in the admin table.
    pub description: String,
    /// Category label used for filtering.
    pub category: String,
    /// Unit price in minor currency units.
    pub price: Price,
    /// Pre-discount price, if the product is discounted.
    pub original_price: Option<Price>,
    /// Discount percentage for badge display.
    pub discount_percent: Option<u8>,
    /// Units available for sale.
    pub stock: u32,
    /// Average review rating out of 5.
    pub rating: f32,
    /// Number of reviews behind the rating.
    pub reviews: u32,
    /// Image URL or path.
    pub image: String,
    /// Whether to show the "new" badge.
    pub is_new: bool,
}

impl Product {
    /// Validate the record's internal consistency.
    ///
    /// Called at the catalog boundary when products enter the system; the
    /// cart never re-validates.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] describing the first violated constraint.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }
        if self.category.trim().is_empty() {
            return Err(ProductError::EmptyCategory);
        }
        if let Some(percent) = self.discount_percent {
            if percent > 100 {
                return Err(ProductError::DiscountOutOfRange(percent));
            }
        }
        if let Some(original) = self.original_price {
            if original < self.price {
                return Err(ProductError::OriginalPriceBelowCurrent);
            }
        }
        Ok(())
    }

    /// Whether the product has any units in stock.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Red Shirt".to_owned(),
            description: "A red shirt".to_owned(),
            category: "clothing".to_owned(),
            price: Price::from_minor(1000).expect("valid price"),
            original_price: None,
            discount_percent: None,
            stock: 5,
            rating: 4.5,
            reviews: 12,
            image: "/images/red-shirt.jpg".to_owned(),
            is_new: false,
        }
    }

    #[test]
    fn test_valid_product() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut product = sample();
        product.name = "   ".to_owned();
        assert_eq!(product.validate(), Err(ProductError::EmptyName));
    }

    #[test]
    fn test_empty_category_rejected() {
        let mut product = sample();
        product.category = String::new();
        assert_eq!(product.validate(), Err(ProductError::EmptyCategory));
    }

    #[test]
    fn test_discount_out_of_range_rejected() {
        let mut product = sample();
        product.discount_percent = Some(101);
        assert_eq!(product.validate(), Err(ProductError::DiscountOutOfRange(101)));

        product.discount_percent = Some(100);
        assert_eq!(product.validate(), Ok(()));
    }

    #[test]
    fn test_original_price_below_current_rejected() {
        let mut product = sample();
        product.original_price = Some(Price::from_minor(500).expect("valid price"));
        assert_eq!(
            product.validate(),
            Err(ProductError::OriginalPriceBelowCurrent)
        );
    }

    #[test]
    fn test_in_stock() {
        let mut product = sample();
        assert!(product.in_stock());
        product.stock = 0;
        assert!(!product.in_stock());
    }
}
