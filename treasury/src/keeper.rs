//! Treasury keeper
//!
//! Owns the indicator store and the running epoch accumulator, and exposes
//! the entry points the block-processing layer calls:
//! - `record_*` while blocks are applied
//! - `update_indicators` / `end_block` at epoch boundaries
//! - raw series accessors and derived ratios for policy routines

use economics::{is_epoch_boundary, to_decimal, Coins, Epoch};
use rust_decimal::Decimal;
use treasury_storage::{KvStore, WriteBatch};

use crate::accumulator::EpochAccumulator;
use crate::aggregate::{self, SeriesSource};
use crate::config::{is_valid_reward_weight, TreasuryConfig};
use crate::error::{Result, TreasuryError};
use crate::ratios;
use crate::report::IndicatorReport;
use crate::store::{
    decode_decimal, encode_decimal, Indicator, IndicatorStore, ACCUMULATOR_KEY,
    REWARD_WEIGHT_KEY,
};
use crate::updater::{compute_indicators, BlockContext, EpochIndicators};

pub struct TreasuryKeeper<S> {
    store: IndicatorStore<S>,
    config: TreasuryConfig,
    accumulator: EpochAccumulator,
}

impl<S: KvStore> TreasuryKeeper<S> {
    /// Open a keeper over `kv`, resuming any accumulator left by a previous run.
    pub fn new(kv: S, config: TreasuryConfig) -> Result<Self> {
        config.validate()?;
        let store = IndicatorStore::new(kv);

        let accumulator = match store.raw_get(ACCUMULATOR_KEY)? {
            Some(bytes) => bincode::deserialize(&bytes).map_err(|e| {
                TreasuryError::SerializationError(format!(
                    "Failed to deserialize epoch accumulator: {}",
                    e
                ))
            })?,
            None => EpochAccumulator::new(),
        };

        Ok(Self {
            store,
            config,
            accumulator,
        })
    }

    pub fn config(&self) -> &TreasuryConfig {
        &self.config
    }

    pub fn store(&self) -> &IndicatorStore<S> {
        &self.store
    }

    pub fn accumulator(&self) -> &EpochAccumulator {
        &self.accumulator
    }

    pub fn into_store(self) -> IndicatorStore<S> {
        self.store
    }

    pub fn epoch(&self, ctx: &BlockContext<'_>) -> Result<Epoch> {
        ctx.epoch(self.config.blocks_per_epoch)
    }

    /// Epoch an `update_indicators` call at `ctx.height` writes to.
    pub fn closing_epoch(&self, ctx: &BlockContext<'_>) -> Result<Epoch> {
        ctx.closing_epoch(self.config.blocks_per_epoch)
    }

    /// Write `batch` together with the next accumulator state, then adopt it.
    fn commit(&mut self, mut batch: WriteBatch, accumulator: EpochAccumulator) -> Result<()> {
        let bytes = bincode::serialize(&accumulator).map_err(|e| {
            TreasuryError::SerializationError(format!(
                "Failed to serialize epoch accumulator: {}",
                e
            ))
        })?;
        batch.set(ACCUMULATOR_KEY, &bytes);

        self.store.commit(batch)?;
        self.accumulator = accumulator;
        Ok(())
    }

    // Raw series accessors

    pub fn get_tr(&self, epoch: Epoch) -> Result<Decimal> {
        self.store.get(Indicator::TaxRewards, epoch)
    }

    pub fn set_tr(&mut self, epoch: Epoch, value: Decimal) -> Result<()> {
        self.store.set(Indicator::TaxRewards, epoch, value)
    }

    pub fn get_sr(&self, epoch: Epoch) -> Result<Decimal> {
        self.store.get(Indicator::SeigniorageRewards, epoch)
    }

    pub fn set_sr(&mut self, epoch: Epoch, value: Decimal) -> Result<()> {
        self.store.set(Indicator::SeigniorageRewards, epoch, value)
    }

    pub fn get_tsl(&self, epoch: Epoch) -> Result<Decimal> {
        self.store.get(Indicator::TotalStakedLuna, epoch)
    }

    pub fn set_tsl(&mut self, epoch: Epoch, value: Decimal) -> Result<()> {
        self.store.set(Indicator::TotalStakedLuna, epoch, value)
    }

    pub fn get_historical_issuance(&self, epoch: Epoch) -> Result<Decimal> {
        self.store.get(Indicator::HistoricalIssuance, epoch)
    }

    /// Current reward weight; the configured value until one is set.
    pub fn reward_weight(&self) -> Result<Decimal> {
        match self.store.raw_get(REWARD_WEIGHT_KEY)? {
            Some(bytes) => decode_decimal(REWARD_WEIGHT_KEY, &bytes),
            None => Ok(self.config.reward_weight),
        }
    }

    pub fn set_reward_weight(&mut self, weight: Decimal) -> Result<()> {
        if !is_valid_reward_weight(weight) {
            return Err(TreasuryError::InvalidRewardWeight(weight));
        }
        self.store.raw_set(REWARD_WEIGHT_KEY, &encode_decimal(weight))
    }

    // Proceeds recorder

    pub fn record_epoch_tax_proceeds(&mut self, proceeds: &Coins) -> Result<()> {
        if proceeds.is_empty() {
            return Ok(());
        }
        let mut next = self.accumulator.clone();
        next.record_tax_proceeds(proceeds)?;
        self.commit(WriteBatch::new(), next)?;

        log::debug!("recorded tax proceeds {}", proceeds);
        Ok(())
    }

    /// Snapshot the seigniorage token supply at the start of the epoch.
    pub fn record_epoch_initial_issuance(&mut self, ctx: &BlockContext<'_>) -> Result<()> {
        let mut next = self.accumulator.clone();
        self.snapshot_issuance(&mut next, ctx)?;
        self.commit(WriteBatch::new(), next)
    }

    /// Persist the staked supply (TSL) and native supply of the current epoch.
    pub fn record_historical_issuance(&mut self, ctx: &BlockContext<'_>) -> Result<()> {
        let mut batch = WriteBatch::new();
        self.stage_historical_issuance(&mut batch, ctx)?;
        self.store.commit(batch)
    }

    fn snapshot_issuance(
        &self,
        accumulator: &mut EpochAccumulator,
        ctx: &BlockContext<'_>,
    ) -> Result<()> {
        let epoch = self.epoch(ctx)?;
        let issuance = ctx.supply.total_supply(&self.config.seigniorage_denom);

        if accumulator.snapshot_epoch() == Some(epoch) {
            log::warn!("initial issuance for epoch {} recorded again", epoch);
        }
        accumulator.record_initial_issuance(issuance, epoch);
        log::debug!(
            "epoch {} initial issuance {}{}",
            epoch,
            issuance,
            self.config.seigniorage_denom
        );
        Ok(())
    }

    fn stage_historical_issuance(
        &self,
        batch: &mut WriteBatch,
        ctx: &BlockContext<'_>,
    ) -> Result<()> {
        let epoch = self.epoch(ctx)?;

        let bonded = ctx.staking.total_bonded();
        let issuance = ctx.supply.total_supply(&self.config.seigniorage_denom);
        let tsl = to_decimal(bonded)
            .ok_or_else(|| TreasuryError::Overflow(format!("total staked {}", bonded)))?;
        let hi = to_decimal(issuance)
            .ok_or_else(|| TreasuryError::Overflow(format!("issuance {}", issuance)))?;

        self.store
            .stage(batch, Indicator::TotalStakedLuna, epoch, tsl)?;
        self.store
            .stage(batch, Indicator::HistoricalIssuance, epoch, hi)
    }

    // Indicator updater

    /// Stage TR, SR and TSL of the epoch closed at `ctx.height`, computed
    /// from `closed`.
    fn stage_indicators(
        &self,
        batch: &mut WriteBatch,
        closed: &EpochAccumulator,
        ctx: &BlockContext<'_>,
    ) -> Result<EpochIndicators> {
        let weight = self.reward_weight()?;
        let indicators = compute_indicators(closed, ctx, &self.config, weight)?;

        if self.store.has(Indicator::TaxRewards, indicators.epoch)? {
            return Err(TreasuryError::EpochAlreadyClosed {
                epoch: indicators.epoch,
            });
        }
        log::debug!("epoch {} reward weight {}", indicators.epoch, weight);

        self.store.stage(
            batch,
            Indicator::TaxRewards,
            indicators.epoch,
            indicators.tax_rewards,
        )?;
        self.store.stage(
            batch,
            Indicator::SeigniorageRewards,
            indicators.epoch,
            indicators.seigniorage_rewards,
        )?;
        self.store.stage(
            batch,
            Indicator::TotalStakedLuna,
            indicators.epoch,
            indicators.total_staked,
        )?;
        Ok(indicators)
    }

    /// Close the epoch ending at `ctx.height`: commit TR, SR and TSL and
    /// start a fresh accumulator. On error nothing is written.
    pub fn update_indicators(&mut self, ctx: &BlockContext<'_>) -> Result<EpochIndicators> {
        let mut next = self.accumulator.clone();
        let closed = next.reset();

        let mut batch = WriteBatch::new();
        let indicators = self.stage_indicators(&mut batch, &closed, ctx)?;
        self.commit(batch, next)?;

        log_closed(&indicators);
        Ok(indicators)
    }

    /// First snapshot at chain start.
    pub fn begin_chain(&mut self, ctx: &BlockContext<'_>) -> Result<()> {
        let mut batch = WriteBatch::new();
        self.stage_historical_issuance(&mut batch, ctx)?;

        let mut next = self.accumulator.clone();
        self.snapshot_issuance(&mut next, ctx)?;
        self.commit(batch, next)
    }

    /// Per-block driver. On a boundary height it closes the previous epoch
    /// and opens the next one in a single atomic write, returning the closed
    /// epoch's indicators.
    pub fn end_block(&mut self, ctx: &BlockContext<'_>) -> Result<Option<EpochIndicators>> {
        if !is_epoch_boundary(ctx.height, self.config.blocks_per_epoch)? {
            return Ok(None);
        }
        if ctx.height == 0 {
            self.begin_chain(ctx)?;
            return Ok(None);
        }

        let mut next = self.accumulator.clone();
        let closed = next.reset();

        let mut batch = WriteBatch::new();
        let indicators = self.stage_indicators(&mut batch, &closed, ctx)?;
        self.stage_historical_issuance(&mut batch, ctx)?;
        self.snapshot_issuance(&mut next, ctx)?;
        self.commit(batch, next)?;

        log_closed(&indicators);
        Ok(Some(indicators))
    }

    // Derived ratios and aggregation

    pub fn trl(&self, epoch: Epoch) -> Result<Decimal> {
        ratios::trl(&self.store, epoch)
    }

    pub fn sr(&self, epoch: Epoch) -> Result<Decimal> {
        ratios::sr(&self.store, epoch)
    }

    pub fn mr(&self, epoch: Epoch) -> Result<Decimal> {
        ratios::mr(&self.store, epoch)
    }

    pub fn series(&self, indicator: Indicator) -> SeriesSource<'_, S> {
        SeriesSource::new(&self.store, indicator)
    }

    pub fn sum_indicator(
        &self,
        indicator: Indicator,
        current_epoch: Epoch,
        window: i64,
    ) -> Result<Decimal> {
        aggregate::sum_indicator(current_epoch, window, &self.series(indicator))
    }

    pub fn rolling_average(
        &self,
        indicator: Indicator,
        current_epoch: Epoch,
        window: i64,
    ) -> Result<Decimal> {
        aggregate::rolling_average_indicator(current_epoch, window, &self.series(indicator))
    }

    /// Indicator snapshot at `current_epoch` with rolling TRL averages.
    pub fn indicators(&self, current_epoch: Epoch) -> Result<IndicatorReport> {
        let trl = |epoch: Epoch| ratios::trl(&self.store, epoch);
        let config = &self.config;

        Ok(IndicatorReport {
            epoch: current_epoch,
            tax_rewards: self.get_tr(current_epoch)?,
            seigniorage_rewards: self.get_sr(current_epoch)?,
            mining_rewards: self.mr(current_epoch)?,
            total_staked: self.get_tsl(current_epoch)?,
            trl_short: aggregate::rolling_average_indicator(
                current_epoch,
                config.window_short,
                &trl,
            )?,
            trl_long: aggregate::rolling_average_indicator(
                current_epoch,
                config.window_long,
                &trl,
            )?,
        })
    }
}

fn log_closed(indicators: &EpochIndicators) {
    log::info!(
        "epoch {} closed: TR={} SR={} TSL={}",
        indicators.epoch,
        indicators.tax_rewards,
        indicators.seigniorage_rewards,
        indicators.total_staked
    );
}
