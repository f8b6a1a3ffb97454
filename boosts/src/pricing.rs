use crate::form::BoostHours;
use serde::Deserialize;
use thiserror::Error;

/// Pricing section of the application settings.
#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    pub tokens_per_currency_unit: f64,
    /// Price of one boost hour in currency units.
    pub boost_price_per_hour: f64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("tokens per currency unit must be a finite positive number, got {0}")]
    InvalidTokenRate(f64),
    #[error("boost price per hour must be a finite non-negative number, got {0}")]
    InvalidBoostPrice(f64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{required} tokens are required but only {available} are available")]
pub struct InsufficientTokens {
    pub required: u64,
    pub available: u64,
}

/// Exchange rate between the currency unit and tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenRate(f64);

impl TryFrom<f64> for TokenRate {
    type Error = PricingError;

    fn try_from(tokens_per_currency_unit: f64) -> Result<Self, Self::Error> {
        if tokens_per_currency_unit.is_finite() && tokens_per_currency_unit > 0.0 {
            Ok(TokenRate(tokens_per_currency_unit))
        } else {
            Err(PricingError::InvalidTokenRate(tokens_per_currency_unit))
        }
    }
}

impl TokenRate {
    /// Negative and non-finite amounts convert to zero tokens.
    pub fn currency_to_tokens(&self, amount: f64) -> u64 {
        if !amount.is_finite() || amount < 0.0 {
            return 0;
        }
        (amount * self.0).round() as u64
    }

    /// Negative and non-finite token amounts convert to zero.
    pub fn tokens_to_currency(&self, tokens: f64) -> f64 {
        if !tokens.is_finite() || tokens < 0.0 {
            return 0.0;
        }
        tokens / self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    rate: TokenRate,
    boost_price_per_hour_tokens: u64,
}

impl TryFrom<&PricingSettings> for Pricing {
    type Error = PricingError;

    fn try_from(settings: &PricingSettings) -> Result<Self, Self::Error> {
        let rate = TokenRate::try_from(settings.tokens_per_currency_unit)?;
        let price = settings.boost_price_per_hour;
        if !price.is_finite() || price < 0.0 {
            return Err(PricingError::InvalidBoostPrice(price));
        }
        let boost_price_per_hour_tokens = rate.currency_to_tokens(price);
        // The longest boost must still be priceable.
        if boost_price_per_hour_tokens
            .checked_mul(u64::from(BoostHours::MAX))
            .is_none()
        {
            return Err(PricingError::InvalidBoostPrice(price));
        }
        Ok(Pricing {
            rate,
            boost_price_per_hour_tokens,
        })
    }
}

impl Pricing {
    pub fn rate(&self) -> TokenRate {
        self.rate
    }

    pub fn boost_price_per_hour_tokens(&self) -> u64 {
        self.boost_price_per_hour_tokens
    }

    pub fn boost_cost(&self, hours: BoostHours) -> u64 {
        u64::from(hours.get()) * self.boost_price_per_hour_tokens
    }
}

pub fn ensure_affordable(cost: u64, balance: u64) -> Result<(), InsufficientTokens> {
    if balance < cost {
        return Err(InsufficientTokens {
            required: cost,
            available: balance,
        });
    }
    Ok(())
}
