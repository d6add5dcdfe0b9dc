//! # Money Module
//!
//! Provides the `Amount` type for handling rupee values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The catalog carries fractional rupee prices, and the gateway charges  │
//! │  in paise. Truncating ₹100.005 to 10000 paise systematically           │
//! │  undercharges; float summation drifts.                                 │
//! │                                                                         │
//! │  OUR SOLUTION: exact decimal arithmetic                                 │
//! │    Cart math is exact; rounding happens ONCE, at the minor-unit        │
//! │    boundary, half away from zero: ₹100.005 → 10001 paise               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Amount;
//!
//! let price = Amount::from_rupees_str("499").unwrap();   // ₹499.00
//! let line = price * 2;                                  // ₹998.00
//! assert_eq!(line.to_minor_units().unwrap(), 99800);     // paise
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Amount Type
// =============================================================================

/// A rupee amount with exact decimal precision.
///
/// ## Design Decisions
/// - **Decimal (not f64)**: cart totals must be exact at every read
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
/// - **Rounding only at the boundary**: [`Amount::to_minor_units`] is the
///   single place fractions collapse to integer paise
///
/// ## Where Amount is Used
/// ```text
/// Product.price ──► CartLine.unit_price ──► CartLine.line_total()
///                                                │
///                          Cart.total_amount() ◄─┘
///                                │
///                                ▼
///                  OrderIntent.amount_minor (paise, rounded)
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Amount(#[ts(type = "string")] Decimal);

impl Amount {
    /// Creates an amount from a decimal rupee value.
    #[inline]
    pub const fn from_rupees(rupees: Decimal) -> Self {
        Amount(rupees)
    }

    /// Parses an amount from a decimal string (e.g., `"100.005"`).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Amount;
    ///
    /// let price = Amount::from_rupees_str("10.99").unwrap();
    /// assert_eq!(price.to_minor_units().unwrap(), 1099);
    /// assert!(Amount::from_rupees_str("ten rupees").is_err());
    /// ```
    pub fn from_rupees_str(s: &str) -> CoreResult<Self> {
        Decimal::from_str(s)
            .map(Amount)
            .map_err(|e| CoreError::InvalidAmount {
                reason: format!("'{}' is not a numeric amount: {}", s, e),
            })
    }

    /// Creates an amount from integer minor units (paise).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Amount;
    ///
    /// let amount = Amount::from_minor_units(49900); // ₹499.00
    /// assert_eq!(amount.to_string(), "₹499.00");
    /// ```
    #[inline]
    pub fn from_minor_units(paise: i64) -> Self {
        Amount(Decimal::new(paise, 2))
    }

    /// Returns the underlying decimal rupee value.
    #[inline]
    pub const fn rupees(&self) -> Decimal {
        self.0
    }

    /// Converts to the gateway's minor unit (paise).
    ///
    /// ## Rounding Policy
    /// Multiplies by 100 and rounds **half away from zero**. Rounding (not
    /// truncation) is the contract: ₹100.005 must become 10001 paise, never
    /// 10000. Truncation would systematically undercharge.
    ///
    /// ## Errors
    /// Returns [`CoreError::InvalidAmount`] if the result does not fit in
    /// an `i64` (not reachable with catalog-scale prices).
    pub fn to_minor_units(&self) -> CoreResult<i64> {
        let paise = (self.0 * Decimal::from(100))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        paise.to_i64().ok_or_else(|| CoreError::InvalidAmount {
            reason: format!("amount {} overflows minor units", self.0),
        })
    }

    /// Zero amount.
    #[inline]
    pub fn zero() -> Self {
        Amount(Decimal::ZERO)
    }

    /// Checks if the amount is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the amount is greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the amount is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows the amount in a human-readable format.
///
/// ## Note
/// This is for logs and receipts. The frontend formats for display to
/// handle localization properly.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0.round_dp(2))
    }
}

/// Default amount is zero.
impl Default for Amount {
    fn default() -> Self {
        Amount::zero()
    }
}

impl FromStr for Amount {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::from_rupees_str(s)
    }
}

/// Addition of two amounts.
impl Add for Amount {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Amount(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Amount {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two amounts.
impl Sub for Amount {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Amount(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Amount {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity (for line totals).
impl Mul<u32> for Amount {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Amount(self.0 * Decimal::from(qty))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_minor_units() {
        let amount = Amount::from_rupees_str("10.99").unwrap();
        assert_eq!(amount.to_minor_units().unwrap(), 1099);

        let whole = Amount::from_rupees_str("499").unwrap();
        assert_eq!(whole.to_minor_units().unwrap(), 49900);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(Amount::from_rupees_str("ten rupees").is_err());
        assert!(Amount::from_rupees_str("").is_err());
    }

    /// ₹100.005 must round UP to 10001 paise. Truncation to 10000 would
    /// systematically undercharge.
    #[test]
    fn test_minor_units_rounds_not_truncates() {
        let amount = Amount::from_rupees_str("100.005").unwrap();
        assert_eq!(amount.to_minor_units().unwrap(), 10001);

        // Below the midpoint rounds down
        let amount = Amount::from_rupees_str("100.004").unwrap();
        assert_eq!(amount.to_minor_units().unwrap(), 10000);
    }

    #[test]
    fn test_from_minor_units_roundtrip() {
        let amount = Amount::from_minor_units(1099);
        assert_eq!(amount.to_minor_units().unwrap(), 1099);
        assert_eq!(format!("{}", amount), "₹10.99");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Amount::from_minor_units(49900)), "₹499.00");
        assert_eq!(format!("{}", Amount::zero()), "₹0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Amount::from_rupees_str("10.50").unwrap();
        let b = Amount::from_rupees_str("0.25").unwrap();

        assert_eq!((a + b).to_minor_units().unwrap(), 1075);
        assert_eq!((a - b).to_minor_units().unwrap(), 1025);
        assert_eq!((a * 3).to_minor_units().unwrap(), 3150);
    }

    #[test]
    fn test_exact_fraction_sum() {
        // 0.1 + 0.2 == 0.3 exactly (the float counterexample)
        let a = Amount::from_rupees_str("0.1").unwrap();
        let b = Amount::from_rupees_str("0.2").unwrap();
        assert_eq!(a + b, Amount::from_rupees_str("0.3").unwrap());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Amount::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Amount::from_minor_units(100);
        assert!(positive.is_positive());

        let negative = Amount::from_minor_units(-100);
        assert!(negative.is_negative());
    }
}
