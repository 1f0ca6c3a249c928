//! Money type for representing expense amounts
//!
//! Amounts keep every digit they were typed or stored with. Rounding to two
//! decimal places happens only when an amount is shown to the user, so
//! totals of fractional amounts stay exact. The type is currency-agnostic;
//! symbols are applied at display time.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places shown to the user and padded to in the store
const DISPLAY_PLACES: u32 = 2;

/// Largest scale a `Decimal` can carry
const MAX_SCALE: i64 = 28;

/// A monetary amount with exact decimal precision
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(1250); // 12.50
    /// assert_eq!(amount.to_decimal_string(), "12.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    pub const fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Amount as a floating point value, for chart scaling only
    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Add two amounts, `None` if the result does not fit
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Sum amounts, `None` if any partial sum does not fit
    pub fn checked_sum<'a, I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Money>,
    {
        amounts
            .into_iter()
            .try_fold(Self::zero(), |acc, amount| acc.checked_add(*amount))
    }

    /// Parse a money amount from a string
    ///
    /// Accepts plain decimals ("12.50", "12.5", "12", ".5", "-3") and the
    /// exponent form Python writes for very small or large floats ("1e-05",
    /// "2.5E+3"). All digits are kept. Currency symbols are not accepted
    /// here; see [`Money::parse_with_symbol`].
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());
        let out_of_range = || MoneyParseError::OutOfRange(trimmed.to_string());

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (mantissa, exponent) = match unsigned.split_once(|c: char| c == 'e' || c == 'E') {
            Some((mantissa, exponent)) => {
                (mantissa, parse_exponent(exponent).ok_or_else(invalid)?)
            }
            None => (unsigned, 0),
        };

        let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let digits = format!("{}{}", whole, frac);
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Self::zero());
        }
        let mut value: i128 = digits.parse().map_err(|_| out_of_range())?;

        let mut scale = (frac.len() as i64)
            .checked_sub(exponent)
            .ok_or_else(out_of_range)?;
        if scale < 0 {
            let shift = u32::try_from(-scale)
                .ok()
                .and_then(|places| 10_i128.checked_pow(places))
                .ok_or_else(out_of_range)?;
            value = value.checked_mul(shift).ok_or_else(out_of_range)?;
            scale = 0;
        }
        while scale > MAX_SCALE && value % 10 == 0 {
            value /= 10;
            scale -= 1;
        }
        if scale > MAX_SCALE {
            return Err(out_of_range());
        }

        if negative {
            value = -value;
        }
        Decimal::try_from_i128_with_scale(value, scale as u32)
            .map(Self)
            .map_err(|_| out_of_range())
    }

    /// Parse an amount that may carry `symbol` after an optional sign
    ///
    /// Only the given symbol is stripped; any other prefix is rejected.
    pub fn parse_with_symbol(s: &str, symbol: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        if symbol.is_empty() {
            return Self::parse(trimmed);
        }

        let (sign, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        match unsigned.strip_prefix(symbol) {
            Some(rest) => Self::parse(&format!("{}{}", sign, rest.trim_start())).map_err(|e| {
                match e {
                    MoneyParseError::InvalidFormat(_) => {
                        MoneyParseError::InvalidFormat(trimmed.to_string())
                    }
                    MoneyParseError::OutOfRange(_) => {
                        MoneyParseError::OutOfRange(trimmed.to_string())
                    }
                }
            }),
            None => Self::parse(trimmed),
        }
    }

    /// The amount rounded half away from zero to two places
    pub fn rounded(&self) -> Decimal {
        let mut value = self
            .0
            .round_dp_with_strategy(DISPLAY_PLACES, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(DISPLAY_PLACES);
        value
    }

    /// Decimal text as written to the store
    ///
    /// At least two places, more when the amount has them.
    pub fn to_decimal_string(&self) -> String {
        let mut value = self.0;
        if value.scale() < DISPLAY_PLACES {
            value.rescale(DISPLAY_PLACES);
        }
        value.to_string()
    }

    /// Format rounded to two places with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.rounded();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{}{}", symbol, rounded.abs())
        } else {
            format!("{}{}", symbol, rounded.abs())
        }
    }
}

fn parse_exponent(s: &str) -> Option<i64> {
    let digits = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: '{}'", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
