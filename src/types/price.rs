//! Fixed-point offer prices.
//!
//! ## Overview
//!
//! Offer prices are keys in an ordered map, so equality and ordering have to be
//! exact. A price is stored as an `i64` count of 10^-8 units; decimal strings
//! are parsed through `rust_decimal` and never pass through floating point.
//!
//! ## Scale Factor
//!
//! We use a scale factor of 10^8 (100,000,000), providing 8 decimal places.
//! Inputs with more fractional digits are rejected rather than rounded, since
//! rounding would let two distinct inputs collide on the same key.
//!
//! ## Examples
//!
//! ```
//! use offer_index::types::Price;
//!
//! let price: Price = "50000.12345678".parse().unwrap();
//! assert_eq!(price.raw(), 5_000_012_345_678);
//! assert_eq!(price.to_string(), "50000.12345678");
//!
//! // Trailing zeros do not change the key
//! assert_eq!("10".parse::<Price>().unwrap(), "10.00".parse::<Price>().unwrap());
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::error::PriceError;

/// Scaling factor for fixed-point prices: 10^8
pub const SCALE: i64 = 100_000_000;

/// Number of fractional digits a price can carry
pub const DECIMALS: u32 = 8;

/// A fixed-point price with 8 decimal places.
///
/// Ordering and equality compare the raw scaled integer, so `10.0` and
/// `10.00000000` are the same price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(i64);

impl Price {
    /// Price of zero
    pub const ZERO: Price = Price(0);

    /// Smallest representable price
    pub const MIN: Price = Price(i64::MIN);

    /// Largest representable price
    pub const MAX: Price = Price(i64::MAX);

    /// Create a price from its raw scaled representation
    ///
    /// # Example
    ///
    /// ```
    /// use offer_index::types::Price;
    ///
    /// assert_eq!(Price::from_raw(150_000_000).to_string(), "1.50000000");
    /// ```
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Price(raw)
    }

    /// Create a price from a whole number of units
    ///
    /// # Returns
    ///
    /// * `Some(Price)` - The scaled price
    /// * `None` - If scaling overflows `i64`
    pub fn from_units(units: i64) -> Option<Self> {
        units.checked_mul(SCALE).map(Price)
    }

    /// Convert a Decimal to a price
    ///
    /// # Errors
    ///
    /// * `PriceError::TooPrecise` - More than 8 significant fractional digits
    /// * `PriceError::OutOfRange` - Scaled value does not fit in `i64`
    pub fn from_decimal(d: Decimal) -> Result<Self, PriceError> {
        if d.normalize().scale() > DECIMALS {
            return Err(PriceError::TooPrecise(d.to_string()));
        }

        d.checked_mul(Decimal::from(SCALE))
            .and_then(|scaled| scaled.to_i64())
            .map(Price)
            .ok_or_else(|| PriceError::OutOfRange(d.to_string()))
    }

    /// Raw scaled value
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Convert to an exact Decimal
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, DECIMALS)
    }

    /// Render without trailing zeros
    ///
    /// ```
    /// use offer_index::types::Price;
    ///
    /// assert_eq!(Price::from_raw(100_000_000).to_string_trimmed(), "1");
    /// assert_eq!(Price::from_raw(150_000_000).to_string_trimmed(), "1.5");
    /// assert_eq!(Price::from_raw(123_456_789).to_string_trimmed(), "1.23456789");
    /// ```
    pub fn to_string_trimmed(self) -> String {
        self.to_decimal().normalize().to_string()
    }

    /// Big-endian bytes of the raw value, used for hashing
    #[inline]
    pub(crate) fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let literal = canonical_literal(s)?;
        let decimal = Decimal::from_str_exact(&literal)
            .map_err(|_| PriceError::Invalid(s.to_string()))?;
        Price::from_decimal(decimal)
    }
}

/// Most integer digits a price can have: i64::MAX / SCALE = 92233720368
const MAX_INTEGER_DIGITS: usize = 11;

/// Validate `[+-]digits[.digits]` and strip leading integer zeros and
/// trailing fractional zeros.
///
/// Digit counts are checked here, on the text, because `Decimal` parsing
/// rounds anything past its 28-digit precision before we could see it.
fn canonical_literal(s: &str) -> Result<String, PriceError> {
    let body = s.trim();
    let (sign, unsigned) = match body.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", body.strip_prefix('+').unwrap_or(body)),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty())
        || !all_digits(int_part)
        || !all_digits(frac_part)
    {
        return Err(PriceError::Invalid(s.to_string()));
    }

    let int_part = int_part.trim_start_matches('0');
    let frac_part = frac_part.trim_end_matches('0');

    if frac_part.len() > DECIMALS as usize {
        return Err(PriceError::TooPrecise(body.to_string()));
    }
    if int_part.len() > MAX_INTEGER_DIGITS {
        return Err(PriceError::OutOfRange(body.to_string()));
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    Ok(if frac_part.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    })
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(d: Decimal) -> Result<Self, Self::Error> {
        Price::from_decimal(d)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.to_decimal()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.8}", self.to_decimal())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
