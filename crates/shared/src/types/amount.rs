//! Monetary amount with trust-account bounds.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` and enforces the posting bounds
//! at construction, so downstream code never re-checks them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest amount a transaction may carry (0.01).
pub const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest amount a transaction may carry (999,999,999.99).
// 99_999_999_999 cents split into the lo/mid 32-bit words from_parts expects.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_215_752_191, 23, 0, false, 2);

/// Errors raised when constructing an [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Value is outside the accepted [0.01, 999999999.99] range.
    #[error("Amount {0} is outside the accepted range [{MIN_AMOUNT}, {MAX_AMOUNT}]")]
    OutOfRange(Decimal),

    /// Value carries more than two fractional digits.
    #[error("Amount {0} has more than two decimal places")]
    TooPrecise(Decimal),
}

/// A validated positive monetary amount with at most two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Validates and wraps a decimal value.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError`] if the value is out of range or carries more
    /// than two fractional digits.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value.normalize().scale() > 2 {
            return Err(AmountError::TooPrecise(value));
        }
        if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&value) {
            return Err(AmountError::OutOfRange(value));
        }
        // Stored rescaled so Display and equality behave uniformly.
        let mut value = value;
        value.rescale(2);
        Ok(Self(value))
    }

    /// Returns the inner decimal value.
    #[must_use]
    pub const fn into_inner(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_accepts_bounds() {
        assert!(Amount::new(dec!(0.01)).is_ok());
        assert!(Amount::new(dec!(999999999.99)).is_ok());
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(0.00))]
    #[case(dec!(-5.00))]
    #[case(dec!(1000000000.00))]
    fn test_rejects_out_of_range(#[case] value: Decimal) {
        assert_eq!(Amount::new(value), Err(AmountError::OutOfRange(value)));
    }

    #[test]
    fn test_rejects_sub_cent_precision() {
        assert_eq!(
            Amount::new(dec!(10.005)),
            Err(AmountError::TooPrecise(dec!(10.005)))
        );
    }

    #[test]
    fn test_trailing_zeros_are_not_precision() {
        // 10.0100 normalizes to 10.01
        assert_eq!(
            Amount::new(dec!(10.0100)).unwrap().into_inner(),
            dec!(10.01)
        );
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Amount::new(dec!(250)).unwrap().to_string(), "250.00");
    }
}
