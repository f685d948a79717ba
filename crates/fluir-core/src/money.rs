//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The dashboard promises sum(product revenue) == total revenue.          │
//! │  Summing floats in a different order breaks that promise.               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every sale total, product total and period total is an exact i64.    │
//! │    Only percentages and display ratios become f64.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fluir_core::money::Money;
//!
//! let price: Money = "49.90".parse().unwrap();
//! assert_eq!(price.cents(), 4990);
//!
//! let total = price.checked_multiply_quantity(3).unwrap();
//! assert_eq!(total.cents(), 14970);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Number of minor units in one major unit.
pub const MINOR_UNITS: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: a goal gap is computed as `target - current` before
///   clamping, so intermediate values may be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Sale.unit_price ──► Sale.total ──┬──► Metrics.total_revenue            │
/// │                                   ├──► ProductSummary.total_revenue     │
/// │                                   └──► Metrics.monthly/annual_revenue   │
/// │                                                                         │
/// │  GoalTargets.monthly ──► GoalState.revenue_gap ──► sales needed         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use fluir_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole major units.
    ///
    /// ```rust
    /// use fluir_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(10_000).cents(), 1_000_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_UNITS)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_UNITS
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_UNITS).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use fluir_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.checked_multiply_quantity(3), Some(Money::from_cents(897)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns `self - other`, floored at zero.
    ///
    /// This is the goal "gap" operation: a shortfall never goes negative.
    #[inline]
    pub fn shortfall_from(&self, achieved: Money) -> Money {
        Money((self.0 - achieved.0).max(0))
    }

    /// Divides by a count, rounding half away from zero to the nearest cent.
    ///
    /// Returns zero when `count` is zero.
    ///
    /// ```rust
    /// use fluir_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1000).div_round(3), Money::from_cents(333));
    /// assert_eq!(Money::from_cents(1001).div_round(2), Money::from_cents(501));
    /// assert_eq!(Money::from_cents(1000).div_round(0), Money::zero());
    /// ```
    pub fn div_round(&self, count: i64) -> Money {
        if count == 0 {
            return Money::zero();
        }
        let value = self.0 as i128;
        let count = count as i128;
        let sign = value.signum() * count.signum();
        let magnitude = (value.abs() * 2 + count.abs()) / (count.abs() * 2);
        Money((sign * magnitude) as i64)
    }

    /// Adds two amounts, returning `None` on overflow.
    ///
    /// ```rust
    /// use fluir_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(150).checked_add(Money::from_cents(50)), Some(Money::from_cents(200)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    /// ```
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

/// Returns `ceil(numerator / denominator)` for non-negative numerator and
/// positive denominator, using 128-bit intermediates.
///
/// Used by the goal simulator to count whole sales or units needed without
/// ever going through floating point.
pub(crate) fn ceil_div(numerator: i128, denominator: i128) -> i64 {
    debug_assert!(denominator > 0);
    if numerator <= 0 {
        return 0;
    }
    ((numerator + denominator - 1) / denominator) as i64
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses decimal text entered by a user (`"12"`, `"12.5"`, `"12.50"`, `"12,50"`).
///
/// ## Rules
/// - Optional leading `-`
/// - `.` or `,` as decimal separator
/// - At most two fraction digits (the currency has cent precision)
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, frac) = match digits.find(|c| c == '.' || c == ',') {
            Some(idx) => (&digits[..idx], &digits[idx + 1..]),
            None => (digits, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("must be a decimal number"));
        }
        if frac.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let overflow = || ValidationError::Overflow {
            field: "price".to_string(),
        };

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let frac_value: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| overflow())? * 10,
            _ => frac.parse().map_err(|_| overflow())?,
        };

        let cents = whole_value
            .checked_mul(MINOR_UNITS)
            .and_then(|c| c.checked_add(frac_value))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering (`1234.50`, `-5.00`).
///
/// ## Note
/// Currency symbols are a presentation concern handled by the dashboard.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_decimal_text() {
        assert_eq!("12".parse::<Money>().unwrap(), Money::from_cents(1200));
        assert_eq!("12.5".parse::<Money>().unwrap(), Money::from_cents(1250));
        assert_eq!("12,50".parse::<Money>().unwrap(), Money::from_cents(1250));
        assert_eq!(" 0.99 ".parse::<Money>().unwrap(), Money::from_cents(99));
        assert_eq!(".5".parse::<Money>().unwrap(), Money::from_cents(50));
        assert_eq!("-3.10".parse::<Money>().unwrap(), Money::from_cents(-310));
    }

    #[test]
    fn test_parse_rejects_bad_text() {
        assert!(matches!(
            "".parse::<Money>(),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            "12.345".parse::<Money>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            "abc".parse::<Money>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            ".".parse::<Money>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            "99999999999999999999".parse::<Money>(),
            Err(ValidationError::Overflow { .. })
        ));
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_shortfall_never_negative() {
        let target = Money::from_major(10_000);
        assert_eq!(target.shortfall_from(Money::from_major(6_500)), Money::from_major(3_500));
        assert_eq!(target.shortfall_from(Money::from_major(12_000)), Money::zero());
    }

    #[test]
    fn test_div_round() {
        assert_eq!(Money::from_cents(1000).div_round(4), Money::from_cents(250));
        assert_eq!(Money::from_cents(5).div_round(2), Money::from_cents(3));
        assert_eq!(Money::from_cents(-5).div_round(2), Money::from_cents(-3));
        assert_eq!(Money::from_cents(7).div_round(0), Money::zero());
    }

    #[test]
    fn test_ceil_div() {
        assert_eq!(ceil_div(350_000, 25_000), 14);
        assert_eq!(ceil_div(350_001, 25_000), 15);
        assert_eq!(ceil_div(0, 3), 0);
    }
}
