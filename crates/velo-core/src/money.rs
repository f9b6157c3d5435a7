//! # Money Module
//!
//! Monetary values as integer cents.
//!
//! ## Why Integer Money?
//! ```text
//! In floating point: 0.1 + 0.2 = 0.30000000000000004
//!
//! Catalog prices like 72.99 are exact in cents (7299), and the only
//! multiplication in the engine is price x integer quantity, so every
//! amount the system ever stores is already rounded to currency
//! precision. Rounding to 2 decimal places is a property of the
//! representation, not a step that can be forgotten.
//! ```
//!
//! ## Usage
//! ```rust
//! use velo_core::money::Money;
//!
//! let base = Money::from_major_minor(72, 99); // $72.99
//! let option = Money::from_cents(1100);       // $11.00
//! let unit = base + option;
//! assert_eq!((unit * 2).cents(), 16_798);     // $167.98
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: room for refund-style negative amounts
/// - **Single-field tuple struct**: zero-cost abstraction over i64
/// - **`#[serde(transparent)]`**: serializes as a bare integer of cents
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use velo_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// ```rust
    /// use velo_core::money::Money;
    ///
    /// let unit = Money::from_cents(8399); // $83.99
    /// assert_eq!(unit.times(2).cents(), 16_798);
    /// ```
    #[inline]
    pub const fn times(&self, quantity: i64) -> Self {
        Money(self.0 * quantity)
    }
}

/// Debug-friendly `$X.YY` rendering. UI layers format for locale themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
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

/// Summing line totals into a cart total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
