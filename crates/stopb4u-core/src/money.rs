//! # Money Module
//!
//! Provides the `Money` type for prices observed at retailers.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Comparing 19.99 against 20.00 in f64 works until it doesn't:          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1999 < 2000, spread = 1 cent, exactly                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stopb4u_core::money::Money;
//!
//! let cheap = Money::from_cents(2000);
//! let pricey = Money::from_cents(2500);
//!
//! assert_eq!((pricey - cheap).cents(), 500);
//! assert_eq!(cheap.savings_bps(pricey), 2000); // 20.00% below
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money is Used
/// ```text
/// listings.price_cents ──► Offer.price ──┬──► PriceComparison.cheapest
///                                        ├──► PriceComparison.spread
///                                        └──► Displayed as "$10.99"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use stopb4u_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// How far below `reference` this price is, in basis points of
    /// `reference` (10000 = 100%).
    ///
    /// Rounded half up with integer math: `(diff * 10000 + ref / 2) / ref`.
    /// A non-positive reference yields 0, as does a price at or above it.
    ///
    /// ## Example
    /// ```rust
    /// use stopb4u_core::money::Money;
    ///
    /// let price = Money::from_cents(750);
    /// assert_eq!(price.savings_bps(Money::from_cents(1000)), 2500);
    /// assert_eq!(price.savings_bps(Money::from_cents(500)), 0);
    /// ```
    pub fn savings_bps(&self, reference: Money) -> u32 {
        if reference.0 <= 0 || self.0 >= reference.0 {
            return 0;
        }

        let diff = (reference.0 - self.0) as i128;
        let reference = reference.0 as i128;
        let bps = (diff * 10_000 + reference / 2) / reference;

        bps.min(10_000) as u32
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$12.34`.
///
/// ## Note
/// The frontend does its own locale-aware formatting; this is for logs and
/// tests.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let mut a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        a -= b;
        assert_eq!(a.cents(), 500);
        a += b;
        assert_eq!(a.cents(), 1000);
    }

    #[test]
    fn test_savings_rounds_half_up() {
        // 1 cent below $3.00 = 33.33 bps → 33
        assert_eq!(Money::from_cents(299).savings_bps(Money::from_cents(300)), 33);
        // 1 cent below $2.00 = 50 bps exactly
        assert_eq!(Money::from_cents(199).savings_bps(Money::from_cents(200)), 50);
        // 1 cent below $0.08 = 1250 bps
        assert_eq!(Money::from_cents(7).savings_bps(Money::from_cents(8)), 1250);
    }

    #[test]
    fn test_savings_edge_cases() {
        let price = Money::from_cents(500);
        assert_eq!(price.savings_bps(Money::zero()), 0);
        assert_eq!(price.savings_bps(price), 0);
        assert_eq!(Money::zero().savings_bps(price), 10_000);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::from_cents(-1).is_negative());
        assert_eq!(Money::default(), Money::zero());
    }
}
