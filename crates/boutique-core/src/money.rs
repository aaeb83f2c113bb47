//! # Money Module
//!
//! Integer-only monetary values.
//!
//! ## Why Integer Money?
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  In floating point:  0.1 + 0.2 = 0.30000000000000004   ❌          │
//! │                                                                    │
//! │  Here: every amount is a whole number of minor units (i64).        │
//! │  The boutique trades in Ugandan shillings, which have no           │
//! │  sub-unit in practice, so Money(15000) simply IS "UGX 15,000".     │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Receipt totals and line subtotals all flow through this type, so the
//! invariant `total == Σ subtotal` is exact integer arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A monetary amount in currency minor units.
///
/// Signed so that arithmetic intermediates (refund math, differences) are
/// representable, even though persisted prices are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a value from minor units.
    ///
    /// ```rust
    /// use boutique_core::Money;
    ///
    /// let price = Money::from_minor(15_000);
    /// assert_eq!(price.minor(), 15_000);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the raw minor-unit value.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly positive. Catalog prices must be.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Line subtotal: unit price × quantity.
    ///
    /// ```rust
    /// use boutique_core::Money;
    ///
    /// let unit = Money::from_minor(15_000);
    /// assert_eq!(unit.times(5).minor(), 75_000);
    /// ```
    #[inline]
    pub const fn times(&self, quantity: i64) -> Self {
        Money(self.0 * quantity)
    }
}

/// Formats as `UGX 15,000` with thousands separators, matching the printed
/// invoice. Display only; never parsed back.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let negative = self.0 < 0;
        let digits = self.0.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if negative {
            write!(f, "-UGX {grouped}")
        } else {
            write!(f, "UGX {grouped}")
        }
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, quantity: i64) -> Self {
        Money(self.0 * quantity)
    }
}

/// Receipt totals are sums of line subtotals.
impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}
