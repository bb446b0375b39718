//! Money helpers
//!
//! Amounts are stored as an integer number of minor units (cents) in an
//! `INT` column. Form input arrives as decimal text and is parsed as an exact
//! [`Decimal`], then scaled and rounded half away from zero, so `1.005`
//! becomes `101` and `0.12499999999999999999` stays `12`.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::MoneyError;

/// Number of minor units in one major unit
pub const MINOR_UNITS_PER_MAJOR: Decimal = Decimal::ONE_HUNDRED;

/// Coerce decimal text to minor units.
///
/// Leading and trailing whitespace is ignored. Plain decimals (`"15.5"`,
/// `".5"`, `"-2"`) and scientific notation (`"1e3"`) are numbers; NaN and
/// infinities are not.
///
/// # Example
/// ```
/// use acme_types::parse_minor_units;
///
/// assert_eq!(parse_minor_units("15.5"), Ok(1550));
/// assert_eq!(parse_minor_units("1.005"), Ok(101));
/// assert!(parse_minor_units("abc").is_err());
/// ```
pub fn parse_minor_units(input: &str) -> Result<i32, MoneyError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MoneyError::Empty);
    }

    to_minor_units(parse_decimal(trimmed)?)
}

/// Convert a major-unit amount to minor units, rounding half away from zero.
pub fn to_minor_units(amount: Decimal) -> Result<i32, MoneyError> {
    amount
        .checked_mul(MINOR_UNITS_PER_MAJOR)
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_i32())
        .ok_or_else(|| MoneyError::OutOfRange(amount.to_string()))
}

fn parse_decimal(text: &str) -> Result<Decimal, MoneyError> {
    // `.5` and `-.5` are numbers too
    let normalized = match text.as_bytes() {
        [b'.', ..] => format!("0{text}"),
        [sign @ (b'-' | b'+'), b'.', ..] => format!("{}0{}", char::from(*sign), &text[1..]),
        _ => text.to_string(),
    };

    if let Ok(value) = Decimal::from_str(&normalized) {
        return Ok(value);
    }
    if normalized.contains(['e', 'E']) {
        if let Ok(value) = Decimal::from_scientific(&normalized) {
            return Ok(value);
        }
    }

    // Classify what `Decimal` cannot represent
    match text.parse::<f64>() {
        Ok(value) if !value.is_finite() => Err(MoneyError::NotFinite),
        Ok(_) => Err(MoneyError::OutOfRange(text.to_string())),
        Err(_) => Err(MoneyError::NotANumber(text.to_string())),
    }
}
