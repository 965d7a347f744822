//! Type-safe price representation in integer minor currency units.
//!
//! All money in the system is a whole number of the smallest currency unit
//! (kyat for the demo catalog). Aggregate arithmetic saturates rather than
//! wrapping so derived totals can never panic or go negative.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price cannot be negative: {0}")]
    Negative(i64),
}

/// A price in integer minor currency units.
///
/// Non-negative by construction: [`Price::from_minor`] rejects negative
/// amounts, so every `Price` in the system is a valid amount.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from an amount in minor units.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `minor_units` is negative.
    pub const fn from_minor(minor_units: i64) -> Result<Self, PriceError> {
        if minor_units < 0 {
            return Err(PriceError::Negative(minor_units));
        }
        Ok(Self(minor_units))
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Multiply by a quantity, saturating at `i64::MAX`.
    #[must_use]
    #[allow(clippy::cast_lossless)] // i64::from is not const
    pub const fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as i64))
    }

    /// Add another price, saturating at `i64::MAX`.
    #[must_use]
    pub const fn plus(&self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor_rejects_negative() {
        assert_eq!(Price::from_minor(-1), Err(PriceError::Negative(-1)));
        assert!(Price::from_minor(0).is_ok());
        assert!(Price::from_minor(1000).is_ok());
    }

    #[test]
    fn test_times_and_plus() {
        let unit = Price::from_minor(1000).expect("valid price");
        assert_eq!(unit.times(3).minor_units(), 3000);
        assert_eq!(unit.plus(Price::ZERO), unit);
        assert_eq!(
            unit.plus(Price::from_minor(500).expect("valid price"))
                .minor_units(),
            1500
        );
    }

    #[test]
    fn test_saturating_arithmetic() {
        let huge = Price::from_minor(i64::MAX).expect("valid price");
        assert_eq!(huge.times(2).minor_units(), i64::MAX);
        assert_eq!(huge.plus(huge).minor_units(), i64::MAX);
    }
}
