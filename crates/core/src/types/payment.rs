//! Payment method and payment reference types.
//!
//! UPI orders carry a caller-supplied UTR (Unique Transaction Reference)
//! number. The UTR is recorded verbatim, never verified against a payment
//! processor, so the only guarantee worth encoding is its shape: exactly
//! twelve ASCII digits. `UtrNumber` follows the parse-don't-validate pattern;
//! once constructed it is known to be well-formed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How an order is paid.
///
/// Only `upi` and `cod` carry special rules (UTR validation and the delivery
/// surcharge respectively). Any other method string is accepted and stored
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    /// Unified Payments Interface; requires a 12-digit UTR number.
    Upi,
    /// Cash on delivery; incurs a fixed surcharge line item.
    Cod,
    /// Any other method, passed through untouched.
    Other(String),
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        match value.as_str() {
            "upi" => Self::Upi,
            "cod" => Self::Cod,
            _ => Self::Other(value),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Upi => "upi".to_owned(),
            PaymentMethod::Cod => "cod".to_owned(),
            PaymentMethod::Other(value) => value,
        }
    }
}

impl PaymentMethod {
    /// The wire representation of this method.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Upi => "upi",
            Self::Cod => "cod",
            Self::Other(value) => value,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a UTR number fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UtrError {
    /// The UTR was not exactly 12 characters long.
    #[error("UTR number must be exactly 12 digits")]
    WrongLength,
    /// The UTR contained a non-digit character.
    #[error("UTR number must be exactly 12 digits")]
    NonDigit,
}

/// A validated 12-digit UPI transaction reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtrNumber(String);

impl UtrNumber {
    /// Required number of digits.
    pub const LENGTH: usize = 12;

    /// Parse and validate a UTR number.
    ///
    /// # Errors
    ///
    /// Returns `UtrError` unless the input is exactly 12 ASCII digits.
    pub fn parse(input: &str) -> Result<Self, UtrError> {
        if input.len() != Self::LENGTH {
            return Err(UtrError::WrongLength);
        }
        if !input.chars().all(|c| c.is_ascii_digit()) {
            return Err(UtrError::NonDigit);
        }
        Ok(Self(input.to_owned()))
    }

    /// The validated digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UtrNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
