//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                     │
//! │                                                                 │
//! │  In floating point:                                             │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                   │
//! │                                                                 │
//! │  OUR SOLUTION: Integer Paise                                    │
//! │    Rs. 10.99 is stored as 1099                                  │
//! │    unit price × quantity and cart totals are exact integers,    │
//! │    so 2-decimal currency rounding never loses a paisa           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kirana_core::money::Money;
//!
//! let price = Money::from_paise(1099); // Rs. 10.99
//! let line: Money = price * 3;         // Rs. 32.97
//! assert_eq!(line.to_decimal_string(), "32.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction must not panic mid-calculation
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serde as plain integer**: persisted tables store paise, never floats
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ```rust
    /// use kirana_core::money::Money;
    ///
    /// let price = Money::from_paise(1099); // Rs. 10.99
    /// assert_eq!(price.paise(), 1099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from rupees and paise parts.
    ///
    /// For negative amounts only the rupee part carries the sign:
    /// `from_rupees(-5, 50)` is Rs. -5.50.
    #[inline]
    pub const fn from_rupees(rupees: i64, paise: i64) -> Self {
        if rupees < 0 {
            Money(rupees * 100 - paise)
        } else {
            Money(rupees * 100 + paise)
        }
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies by a quantity (line totals).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Renders the amount as a bare 2-decimal string, e.g. `"30.00"`.
    ///
    /// This is the exact form required by the UPI `am=` parameter and by
    /// persisted invoice totals. No currency symbol, no grouping.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }

    /// Parses an operator-entered decimal amount, e.g. `"10"`, `"10.5"`,
    /// `"10.99"`. At most two decimal places are accepted; anything else
    /// (including negatives) returns `None`.
    pub fn parse_rupees(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let (whole, frac) = match input.split_once('.') {
            Some((w, f)) => (w, f),
            None => (input, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let rupees: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let paise: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().ok()? * 10,
            _ => frac.parse().ok()?,
        };

        Some(Money::from_rupees(rupees, paise))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `Rs. 10.99` for cart, inventory, and invoice display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rs. {}.{:02}", sign, self.rupees().abs(), self.paise_part())
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

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_from_rupees() {
        assert_eq!(Money::from_rupees(10, 99).paise(), 1099);
        assert_eq!(Money::from_rupees(-5, 50).paise(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(1099)), "Rs. 10.99");
        assert_eq!(format!("{}", Money::from_paise(500)), "Rs. 5.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-Rs. 5.50");
        assert_eq!(format!("{}", Money::from_paise(0)), "Rs. 0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_paise(3000).to_decimal_string(), "30.00");
        assert_eq!(Money::from_paise(105).to_decimal_string(), "1.05");
        assert_eq!(Money::zero().to_decimal_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((a * 3).paise(), 3000);
        assert_eq!(a.multiply_quantity(4).paise(), 4000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 50].iter().map(|&p| Money::from_paise(p)).sum();
        assert_eq!(total.paise(), 400);
    }

    #[test]
    fn test_parse_rupees() {
        assert_eq!(Money::parse_rupees("10.99"), Some(Money::from_paise(1099)));
        assert_eq!(Money::parse_rupees("10.5"), Some(Money::from_paise(1050)));
        assert_eq!(Money::parse_rupees("10"), Some(Money::from_paise(1000)));
        assert_eq!(Money::parse_rupees(".50"), Some(Money::from_paise(50)));
        assert_eq!(Money::parse_rupees(" 3.00 "), Some(Money::from_paise(300)));

        assert_eq!(Money::parse_rupees(""), None);
        assert_eq!(Money::parse_rupees("."), None);
        assert_eq!(Money::parse_rupees("-1"), None);
        assert_eq!(Money::parse_rupees("10.999"), None);
        assert_eq!(Money::parse_rupees("ten"), None);
    }
}
