//! Exact decimal prices.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;

/// Prices must stay below this bound (`NUMERIC(10, 2)`).
const PRICE_LIMIT: i64 = 100_000_000;

/// Reasons a price string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("price '{0}' is not a decimal number")]
    NotANumber(String),
    #[error("price must not be negative")]
    Negative,
    #[error("price must have at most two decimal places")]
    TooPrecise,
    #[error("price is too large")]
    TooLarge,
}

/// A non-negative amount with exactly two decimal places.
///
/// # Examples
/// ```
/// use menuboard::domain::Price;
///
/// let price: Price = "12.5".parse().unwrap();
/// assert_eq!(price.to_string(), "12.50");
/// assert!("-1".parse::<Price>().is_err());
/// assert!("3.999".parse::<Price>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price(BigDecimal);

impl Price {
    /// Validate a decimal amount.
    pub fn new(amount: BigDecimal) -> Result<Self, PriceError> {
        if amount < BigDecimal::from(0_i64) {
            return Err(PriceError::Negative);
        }
        if amount >= BigDecimal::from(PRICE_LIMIT) {
            return Err(PriceError::TooLarge);
        }
        let normalised = amount.normalized();
        let (_, scale) = normalised.as_bigint_and_exponent();
        if scale > 2 {
            return Err(PriceError::TooPrecise);
        }
        Ok(Self(normalised.with_scale(2)))
    }

    /// Underlying decimal, scaled to two places.
    pub fn amount(&self) -> &BigDecimal {
        &self.0
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let amount =
            BigDecimal::from_str(trimmed).map_err(|_| PriceError::NotANumber(trimmed.to_owned()))?;
        Self::new(amount)
    }
}

impl fmt::Display for Price {
    /// Always two decimal places. `BigDecimal` drops the scale of zero, so
    /// the digits are laid out by hand.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (cents, _) = self.0.with_scale(2).as_bigint_and_exponent();
        let digits = format!("{cents:03}");
        let (units, fraction) = digits.split_at(digits.len() - 2);
        write!(f, "{units}.{fraction}")
    }
}
