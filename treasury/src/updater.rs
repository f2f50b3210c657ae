//! Epoch-boundary indicator computation
//!
//! Turns the raw events gathered in an `EpochAccumulator` into reference
//! currency values. Nothing here touches storage; the keeper commits the
//! result.

use economics::{
    epoch_of, to_decimal, Coins, Epoch, ExchangeRateOracle, StakingView, SupplyLedger,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accumulator::EpochAccumulator;
use crate::config::TreasuryConfig;
use crate::error::{Result, TreasuryError};

/// Collaborator state visible while applying one block
#[derive(Clone, Copy)]
pub struct BlockContext<'a> {
    pub height: u64,
    pub oracle: &'a dyn ExchangeRateOracle,
    pub supply: &'a dyn SupplyLedger,
    pub staking: &'a dyn StakingView,
}

impl<'a> BlockContext<'a> {
    pub fn new(
        height: u64,
        oracle: &'a dyn ExchangeRateOracle,
        supply: &'a dyn SupplyLedger,
        staking: &'a dyn StakingView,
    ) -> Self {
        Self {
            height,
            oracle,
            supply,
            staking,
        }
    }

    pub fn epoch(&self, blocks_per_epoch: u64) -> Result<Epoch> {
        Ok(epoch_of(self.height, blocks_per_epoch)?)
    }

    /// Epoch an update at this height closes.
    ///
    /// The boundary block opens a new epoch, so an update there closes the
    /// one before it. Anywhere else it is the epoch containing `height`.
    pub fn closing_epoch(&self, blocks_per_epoch: u64) -> Result<Epoch> {
        Ok(epoch_of(self.height.saturating_sub(1), blocks_per_epoch)?)
    }
}

/// Indicator values produced for one epoch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochIndicators {
    pub epoch: Epoch,
    pub tax_rewards: Decimal,
    pub seigniorage_rewards: Decimal,
    pub total_staked: Decimal,
    /// Native tokens removed from supply during the epoch
    pub seigniorage: u128,
}

impl EpochIndicators {
    pub fn mining_rewards(&self) -> Result<Decimal> {
        self.tax_rewards
            .checked_add(self.seigniorage_rewards)
            .ok_or_else(|| TreasuryError::Overflow(format!("MR at epoch {}", self.epoch)))
    }
}

/// Value of a tax-proceeds bag in the reference currency.
///
/// Denominations the oracle has no rate for are skipped. The reference
/// denomination falls back to a rate of one.
pub fn tax_rewards_in(
    proceeds: &Coins,
    oracle: &dyn ExchangeRateOracle,
    reference_denom: &str,
) -> Result<Decimal> {
    let mut total = Decimal::ZERO;

    for (denom, amount) in proceeds.iter() {
        let rate = match oracle.exchange_rate(denom) {
            Some(rate) => rate,
            None if denom == reference_denom => Decimal::ONE,
            None => {
                log::warn!(
                    "no exchange rate for {}, skipping {} in tax rewards",
                    denom,
                    amount
                );
                continue;
            }
        };

        let value = to_decimal(amount)
            .and_then(|amount| amount.checked_mul(rate))
            .ok_or_else(|| {
                TreasuryError::Overflow(format!(
                    "converting {}{} to {}",
                    amount, denom, reference_denom
                ))
            })?;
        total = total
            .checked_add(value)
            .ok_or_else(|| TreasuryError::Overflow("summing tax rewards".to_string()))?;
    }

    Ok(total)
}

/// Net reduction of the seigniorage token supply over the epoch.
///
/// Swapping the native token into other denominations burns it, so a
/// shrinking supply is what produces seigniorage. Net growth yields zero.
pub fn seigniorage(initial_issuance: u128, current_issuance: u128) -> u128 {
    initial_issuance.saturating_sub(current_issuance)
}

/// `seigniorage × rate × reward_weight`
pub fn seigniorage_rewards(amount: u128, rate: Decimal, reward_weight: Decimal) -> Result<Decimal> {
    to_decimal(amount)
        .and_then(|amount| amount.checked_mul(rate))
        .and_then(|value| value.checked_mul(reward_weight))
        .ok_or_else(|| TreasuryError::Overflow(format!("seigniorage rewards for {}", amount)))
}

/// Compute the indicators of the epoch closed at `ctx.height`.
pub fn compute_indicators(
    accumulator: &EpochAccumulator,
    ctx: &BlockContext<'_>,
    config: &TreasuryConfig,
    reward_weight: Decimal,
) -> Result<EpochIndicators> {
    let epoch = ctx.closing_epoch(config.blocks_per_epoch)?;

    let initial_issuance = accumulator
        .initial_issuance()
        .ok_or(TreasuryError::MissingIssuanceSnapshot { epoch })?;

    let tax_rewards =
        tax_rewards_in(accumulator.tax_proceeds(), ctx.oracle, &config.reference_denom)?;

    let current_issuance = ctx.supply.total_supply(&config.seigniorage_denom);
    if current_issuance > initial_issuance {
        log::warn!(
            "{} issuance grew by {} during epoch {}, no seigniorage",
            config.seigniorage_denom,
            current_issuance - initial_issuance,
            epoch
        );
    }

    let burned = seigniorage(initial_issuance, current_issuance);
    let weighted = if burned == 0 {
        Decimal::ZERO
    } else {
        let rate = ctx
            .oracle
            .exchange_rate(&config.seigniorage_denom)
            .ok_or_else(|| TreasuryError::MissingExchangeRate {
                denom: config.seigniorage_denom.clone(),
            })?;
        seigniorage_rewards(burned, rate, reward_weight)?
    };

    let bonded = ctx.staking.total_bonded();
    let total_staked = to_decimal(bonded)
        .ok_or_else(|| TreasuryError::Overflow(format!("total staked {}", bonded)))?;

    Ok(EpochIndicators {
        epoch,
        tax_rewards,
        seigniorage_rewards: weighted,
        total_staked,
        seigniorage: burned,
    })
}
