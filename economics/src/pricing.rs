//! Exchange rates against the reference currency

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::coins::validate_denom;
use crate::error::{EconomicsError, Result};

/// Source of exchange rates, expressed as reference-currency units per one
/// unit of `denom`.
pub trait ExchangeRateOracle {
    fn exchange_rate(&self, denom: &str) -> Option<Decimal>;
}

/// Exact decimal form of a raw amount, `None` past the 96-bit mantissa.
pub fn to_decimal(amount: u128) -> Option<Decimal> {
    Decimal::from_u128(amount)
}

/// In-memory rate table, filled by whoever reports prices for a block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceTable {
    rates: BTreeMap<String, Decimal>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_exchange_rate(&mut self, denom: &str, rate: Decimal) -> Result<()> {
        validate_denom(denom)?;
        if rate <= Decimal::ZERO {
            return Err(EconomicsError::InvalidExchangeRate {
                denom: denom.to_string(),
                rate: rate.to_string(),
            });
        }
        self.rates.insert(denom.to_string(), rate);
        Ok(())
    }

    pub fn remove_exchange_rate(&mut self, denom: &str) -> Option<Decimal> {
        self.rates.remove(denom)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl ExchangeRateOracle for PriceTable {
    fn exchange_rate(&self, denom: &str) -> Option<Decimal> {
        self.rates.get(denom).copied()
    }
}
