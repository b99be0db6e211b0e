//! # Money Module
//!
//! Provides the `Money` type for cart prices and subtotals.
//!
//! Amounts are integers in the smallest unit of whatever currency the
//! catalog prices in (paisa, cents, ...). The cart never converts between
//! currencies and never touches floating point: a line total is
//! `price × quantity` and a subtotal is a plain sum.
//!
//! ## Usage
//! ```rust
//! use rxcart_core::money::Money;
//!
//! let price = Money::from_minor(1099);
//! let line_total = price.times(3);
//! assert_eq!(line_total.minor(), 3297);
//! assert_eq!(line_total.to_string(), "32.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in minor units.
///
/// Serialized as a bare integer so the persisted cart stays a flat JSON
/// array the storefront can read directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates an amount from minor units.
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the amount in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a line quantity, saturating instead of wrapping.
    ///
    /// ## Example
    /// ```rust
    /// use rxcart_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(299).times(3).minor(), 897);
    /// ```
    #[inline]
    pub fn times(&self, quantity: u32) -> Self {
        Money(self.0.saturating_mul(i64::from(quantity)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders `major.minor` with two decimals and no currency symbol; the
/// storefront owns localisation.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
