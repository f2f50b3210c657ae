//! Supply management and tracking

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::coins::{validate_denom, Coins};
use crate::error::{EconomicsError, Result};

/// Read access to the token-supply ledger
pub trait SupplyLedger {
    /// Total circulating amount of `denom`; zero for unknown denominations.
    fn total_supply(&self, denom: &str) -> u128;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyStats {
    pub total_minted: u128,
    pub total_burned: u128,
    pub circulating_supply: u128,
}

/// In-memory per-denomination supply ledger
#[derive(Debug, Clone, Default)]
pub struct SupplyManager {
    stats: BTreeMap<String, SupplyStats>,
}

impl SupplyManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, denom: &str, amount: u128) -> Result<()> {
        validate_denom(denom)?;
        let stats = self.stats.entry(denom.to_string()).or_default();
        let overflow = || EconomicsError::AmountOverflow {
            denom: denom.to_string(),
        };

        let minted = stats.total_minted.checked_add(amount).ok_or_else(overflow)?;
        let circulating = stats
            .circulating_supply
            .checked_add(amount)
            .ok_or_else(overflow)?;

        stats.total_minted = minted;
        stats.circulating_supply = circulating;
        Ok(())
    }

    pub fn burn(&mut self, denom: &str, amount: u128) -> Result<()> {
        let available = self.total_supply(denom);
        if amount > available {
            return Err(EconomicsError::InsufficientSupply {
                denom: denom.to_string(),
                requested: amount,
                available,
            });
        }

        let stats = self.stats.entry(denom.to_string()).or_default();
        stats.total_burned = stats.total_burned.saturating_add(amount);
        stats.circulating_supply -= amount;
        Ok(())
    }

    /// Overwrite the circulating amount of `denom`, leaving mint/burn totals
    /// as they are. Used when the ledger is seeded from an external source.
    pub fn set_total(&mut self, denom: &str, amount: u128) -> Result<()> {
        validate_denom(denom)?;
        self.stats.entry(denom.to_string()).or_default().circulating_supply = amount;
        Ok(())
    }

    pub fn stats(&self, denom: &str) -> SupplyStats {
        self.stats.get(denom).cloned().unwrap_or_default()
    }

    /// Circulating supply of every tracked denomination
    pub fn totals(&self) -> Coins {
        Coins::from_validated(
            self.stats
                .iter()
                .map(|(denom, stats)| (denom.clone(), stats.circulating_supply)),
        )
    }
}

impl SupplyLedger for SupplyManager {
    fn total_supply(&self, denom: &str) -> u128 {
        self.stats
            .get(denom)
            .map(|stats| stats.circulating_supply)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    #[test]
    fn test_supply_management() {
        let mut supply = SupplyManager::new();

        supply.mint(MICRO_LUNA_DENOM, 1000).unwrap();
        assert_eq!(supply.stats(MICRO_LUNA_DENOM).total_minted, 1000);
        assert_eq!(supply.total_supply(MICRO_LUNA_DENOM), 1000);

        supply.burn(MICRO_LUNA_DENOM, 100).unwrap();
        let stats = supply.stats(MICRO_LUNA_DENOM);
        assert_eq!(stats.total_burned, 100);
        assert_eq!(stats.circulating_supply, 900);
    }

    #[test]
    fn test_burn_more_than_supply() {
        let mut supply = SupplyManager::new();
        supply.mint(MICRO_LUNA_DENOM, 10).unwrap();

        let err = supply.burn(MICRO_LUNA_DENOM, 11).unwrap_err();
        assert!(matches!(err, EconomicsError::InsufficientSupply { available: 10, .. }));
        assert_eq!(supply.total_supply(MICRO_LUNA_DENOM), 10);
    }

    #[test]
    fn test_set_total_and_totals() {
        let mut supply = SupplyManager::new();
        supply.set_total(MICRO_LUNA_DENOM, 5 * MICRO_UNIT).unwrap();
        supply.set_total(MICRO_SDR_DENOM, 0).unwrap();

        assert_eq!(supply.total_supply(MICRO_LUNA_DENOM), 5 * MICRO_UNIT);
        assert_eq!(supply.total_supply(MICRO_KRW_DENOM), 0);

        let totals = supply.totals();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.amount_of(MICRO_LUNA_DENOM), 5 * MICRO_UNIT);
    }
}
