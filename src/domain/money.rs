use crate::error::{CheckoutError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minor units per major unit in every currency the providers accept.
const MINOR_UNITS: Decimal = Decimal::ONE_HUNDRED;

/// A non-negative, currency-agnostic monetary value.
///
/// Wraps `rust_decimal::Decimal` so cart totals never go through floating point.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            Err(CheckoutError::ValidationError(
                "Price must not be negative".to_string(),
            ))
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Converts to the provider's minor-unit representation.
    ///
    /// Rounds half away from zero, so `10.005` becomes `1001`.
    pub fn to_minor_units(&self) -> Result<u64> {
        let scaled = self
            .0
            .checked_mul(MINOR_UNITS)
            .ok_or_else(|| CheckoutError::ValidationError("Price overflow".to_string()))?;
        scaled
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .ok_or_else(|| {
                CheckoutError::ValidationError("Price does not fit in minor units".to_string())
            })
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or_else(|| CheckoutError::ValidationError("Price overflow".to_string()))
    }

    /// Renders the price with exactly two decimal places.
    ///
    /// Values too large to carry a scale of two are rejected.
    pub fn to_fixed_2(&self) -> Result<String> {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        if rounded.scale() != 2 {
            return Err(CheckoutError::ValidationError(format!(
                "Price {} cannot be written with two decimals",
                self.0
            )));
        }
        Ok(rounded.to_string())
    }
}

impl TryFrom<Decimal> for Price {
    type Error = CheckoutError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
