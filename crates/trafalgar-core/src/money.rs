//! # Money Module
//!
//! Provides the `Money` type for handling catalog prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The catalog endpoint sends prices as JSON decimals: 2.5, 1.8, 12.99   │
//! │                                                                         │
//! │  0.1 + 0.2 = 0.30000000000000004   (f64)                               │
//! │  10 + 20   = 30                    (cents, i64)                        │
//! │                                                                         │
//! │  Decimals are converted ONCE, at the payload boundary, to cents.       │
//! │  A price finer than a cent (1.999) is rejected, never rounded.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use trafalgar_core::money::Money;
//!
//! let price = Money::from_cents(250);
//! assert_eq!(price.to_string(), "$2.50");
//!
//! let parsed = Money::from_decimal(1.8).unwrap();
//! assert_eq!(parsed.cents(), 180);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Largest magnitude (in major units) that still fits in i64 cents.
const MAX_DECIMAL: f64 = (i64::MAX / 100) as f64;

/// Slack allowed between `amount * 100` and the nearest integer, absorbing
/// binary float error such as `12.99 * 100 = 1298.9999999999998`.
const CENT_TOLERANCE: f64 = 1e-6;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// The storefront is single-currency, so no currency code is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount in major units to cents.
    ///
    /// Returns `None` for NaN, infinities, values too large to represent and
    /// amounts that are not a whole number of cents.
    ///
    /// ## Example
    /// ```rust
    /// use trafalgar_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(2.5).unwrap().cents(), 250);
    /// assert_eq!(Money::from_decimal(12.99).unwrap().cents(), 1299);
    /// assert!(Money::from_decimal(1.999).is_none());
    /// assert!(Money::from_decimal(f64::NAN).is_none());
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount.abs() > MAX_DECIMAL {
            return None;
        }

        let scaled = amount * 100.0;
        let cents = scaled.round();
        let tolerance = CENT_TOLERANCE.max(scaled.abs() * f64::EPSILON * 4.0);
        if (scaled - cents).abs() > tolerance {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the amount in major units (for display and JSON output only).
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$12.34`.
///
/// ## Note
/// This is for logs and the terminal view. A localized web view should
/// format from `cents()` itself.
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

// =============================================================================
// Decimal Serde Adapter
// =============================================================================

/// Serde adapter for fields carried as decimal numbers on the wire.
///
/// ## Usage
/// ```rust,ignore
/// #[serde(with = "crate::money::decimal")]
/// pub price: Money,
/// ```
pub mod decimal {
    use super::Money;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount).ok_or_else(|| {
            D::Error::custom(format!("price {} is not a whole number of cents", amount))
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_whole_cents() {
        assert_eq!(Money::from_decimal(2.5).unwrap().cents(), 250);
        assert_eq!(Money::from_decimal(1.8).unwrap().cents(), 180);
        assert_eq!(Money::from_decimal(12.99).unwrap().cents(), 1299);
        assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_decimal(0.0).unwrap(), Money::from_cents(0));
        assert_eq!(Money::from_decimal(123456.78).unwrap().cents(), 12345678);
    }

    #[test]
    fn test_from_decimal_rejects_sub_cent_amounts() {
        assert!(Money::from_decimal(1.999).is_none());
        assert!(Money::from_decimal(0.004).is_none());
        assert!(Money::from_decimal(2.505).is_none());
    }

    #[test]
    fn test_from_decimal_rejects_non_finite() {
        assert!(Money::from_decimal(f64::NAN).is_none());
        assert!(Money::from_decimal(f64::INFINITY).is_none());
        assert!(Money::from_decimal(1e300).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1234).to_string(), "$12.34");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
    }

    #[test]
    fn test_decimal_adapter() {
        #[derive(Debug, serde::Serialize, serde::Deserialize)]
        struct Priced {
            #[serde(with = "decimal")]
            price: Money,
        }

        let parsed: Priced = serde_json::from_str(r#"{"price": 12.99}"#).unwrap();
        assert_eq!(parsed.price.cents(), 1299);

        let integer: Priced = serde_json::from_str(r#"{"price": 3}"#).unwrap();
        assert_eq!(integer.price.cents(), 300);

        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, r#"{"price":12.99}"#);

        assert!(serde_json::from_str::<Priced>(r#"{"price": "free"}"#).is_err());

        let err = serde_json::from_str::<Priced>(r#"{"price": 0.004}"#).unwrap_err();
        assert!(err.to_string().contains("not a whole number of cents"));
    }
}
