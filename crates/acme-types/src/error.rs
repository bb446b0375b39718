//! Common error types

use thiserror::Error;

/// Errors converting user-supplied money into minor units
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// No amount was given
    #[error("amount is required")]
    Empty,

    /// The input does not coerce to a number
    #[error("amount is not a number: {0:?}")]
    NotANumber(String),

    /// NaN or infinite values
    #[error("amount must be a finite number")]
    NotFinite,

    /// The minor-unit value does not fit the storage column
    #[error("amount out of range: {0}")]
    OutOfRange(String),
}

/// Error parsing an invoice status string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid invoice status: {0:?} (expected \"paid\" or \"pending\")")]
pub struct ParseStatusError(pub String);
