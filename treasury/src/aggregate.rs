//! Windowed aggregation over epoch series
//!
//! A window of `n` epochs ending at `current_epoch` covers
//! `[current_epoch - n + 1, current_epoch]`. Windows reaching before epoch 0
//! are clamped to the available history, and the average divides by the
//! clamped length. Non-positive windows aggregate to zero.

use economics::Epoch;
use rust_decimal::Decimal;

use crate::error::{Result, TreasuryError};
use crate::store::{Indicator, IndicatorStore};
use treasury_storage::KvStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Sum,
    Average,
}

/// Per-epoch value lookup fed into the aggregator
pub trait EpochValueSource {
    fn value_at(&self, epoch: Epoch) -> Result<Decimal>;
}

impl<F> EpochValueSource for F
where
    F: Fn(Epoch) -> Result<Decimal>,
{
    fn value_at(&self, epoch: Epoch) -> Result<Decimal> {
        self(epoch)
    }
}

/// A stored (or derived) indicator series viewed as a value source
pub struct SeriesSource<'a, S> {
    store: &'a IndicatorStore<S>,
    indicator: Indicator,
}

impl<'a, S: KvStore> SeriesSource<'a, S> {
    pub fn new(store: &'a IndicatorStore<S>, indicator: Indicator) -> Self {
        Self { store, indicator }
    }
}

impl<S: KvStore> EpochValueSource for SeriesSource<'_, S> {
    fn value_at(&self, epoch: Epoch) -> Result<Decimal> {
        self.store.get(self.indicator, epoch)
    }
}

/// Number of epochs actually aggregated, zero for non-positive windows.
pub fn effective_window(current_epoch: Epoch, window: i64) -> u64 {
    if window <= 0 {
        return 0;
    }
    (window as u64).min(current_epoch.saturating_add(1))
}

pub fn aggregate<V>(
    mode: Aggregation,
    source: &V,
    current_epoch: Epoch,
    window: i64,
) -> Result<Decimal>
where
    V: EpochValueSource + ?Sized,
{
    let span = effective_window(current_epoch, window);
    if span == 0 {
        return Ok(Decimal::ZERO);
    }

    let first = current_epoch - (span - 1);
    let mut sum = Decimal::ZERO;
    for epoch in first..=current_epoch {
        sum = sum.checked_add(source.value_at(epoch)?).ok_or_else(|| {
            TreasuryError::Overflow(format!(
                "window sum over epochs {}..={}",
                first, current_epoch
            ))
        })?;
    }

    match mode {
        Aggregation::Sum => Ok(sum),
        Aggregation::Average => sum.checked_div(Decimal::from(span)).ok_or_else(|| {
            TreasuryError::Overflow(format!("window average over {} epochs", span))
        }),
    }
}

pub fn sum_indicator<V>(current_epoch: Epoch, window: i64, source: &V) -> Result<Decimal>
where
    V: EpochValueSource + ?Sized,
{
    aggregate(Aggregation::Sum, source, current_epoch, window)
}

pub fn rolling_average_indicator<V>(
    current_epoch: Epoch,
    window: i64,
    source: &V,
) -> Result<Decimal>
where
    V: EpochValueSource + ?Sized,
{
    aggregate(Aggregation::Average, source, current_epoch, window)
}
