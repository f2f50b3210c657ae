//! Staking pool view

use serde::{Deserialize, Serialize};

use crate::error::{EconomicsError, Result};
use crate::constants::MICRO_LUNA_DENOM;

/// Read access to the staking subsystem
pub trait StakingView {
    /// Total tokens currently bonded to validators
    fn total_bonded(&self) -> u128;
}

/// In-memory bonded/unbonded token pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingPool {
    pub bonded_tokens: u128,
    pub not_bonded_tokens: u128,
}

impl StakingPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bond(&mut self, amount: u128) -> Result<()> {
        self.bonded_tokens = self
            .bonded_tokens
            .checked_add(amount)
            .ok_or_else(|| EconomicsError::AmountOverflow {
                denom: MICRO_LUNA_DENOM.to_string(),
            })?;
        Ok(())
    }

    /// Move `amount` from bonded to not-bonded tokens.
    pub fn unbond(&mut self, amount: u128) -> Result<()> {
        if amount > self.bonded_tokens {
            return Err(EconomicsError::InsufficientSupply {
                denom: MICRO_LUNA_DENOM.to_string(),
                requested: amount,
                available: self.bonded_tokens,
            });
        }
        let not_bonded = self
            .not_bonded_tokens
            .checked_add(amount)
            .ok_or_else(|| EconomicsError::AmountOverflow {
                denom: MICRO_LUNA_DENOM.to_string(),
            })?;

        self.bonded_tokens -= amount;
        self.not_bonded_tokens = not_bonded;
        Ok(())
    }
}

impl StakingView for StakingPool {
    fn total_bonded(&self) -> u128 {
        self.bonded_tokens
    }
}
