//! Epoch-keyed indicator persistence
//!
//! Key layout: one prefix byte per series followed by the big-endian epoch,
//! so a prefix scan yields a series in ascending epoch order. Values are the
//! 16-byte canonical `Decimal` encoding.

use economics::Epoch;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use treasury_storage::{KvStore, WriteBatch};

use crate::error::{Result, TreasuryError};

const TAX_REWARDS_PREFIX: u8 = 0x01;
const SEIGNIORAGE_REWARDS_PREFIX: u8 = 0x02;
const TOTAL_STAKED_PREFIX: u8 = 0x03;
const HISTORICAL_ISSUANCE_PREFIX: u8 = 0x04;

pub(crate) const REWARD_WEIGHT_KEY: &[u8] = &[0x10];
pub(crate) const ACCUMULATOR_KEY: &[u8] = &[0x20];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    /// Tax proceeds in the reference currency (TR)
    TaxRewards,
    /// Weighted seigniorage in the reference currency (SR)
    SeigniorageRewards,
    /// TR + SR, computed on read (MR)
    MiningRewards,
    /// Total bonded native tokens (TSL)
    TotalStakedLuna,
    /// Native token supply recorded for diagnostics
    HistoricalIssuance,
}

impl Indicator {
    fn prefix(self) -> Option<u8> {
        match self {
            Indicator::TaxRewards => Some(TAX_REWARDS_PREFIX),
            Indicator::SeigniorageRewards => Some(SEIGNIORAGE_REWARDS_PREFIX),
            Indicator::TotalStakedLuna => Some(TOTAL_STAKED_PREFIX),
            Indicator::HistoricalIssuance => Some(HISTORICAL_ISSUANCE_PREFIX),
            Indicator::MiningRewards => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Indicator::TaxRewards => "TR",
            Indicator::SeigniorageRewards => "SR",
            Indicator::MiningRewards => "MR",
            Indicator::TotalStakedLuna => "TSL",
            Indicator::HistoricalIssuance => "HI",
        }
    }

    fn stored_prefix(self) -> Result<u8> {
        self.prefix()
            .ok_or(TreasuryError::DerivedIndicator(self.name()))
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn series_key(prefix: u8, epoch: Epoch) -> [u8; 9] {
    let mut key = [0u8; 9];
    key[0] = prefix;
    key[1..].copy_from_slice(&epoch.to_be_bytes());
    key
}

pub(crate) fn encode_decimal(value: Decimal) -> [u8; 16] {
    value.serialize()
}

pub(crate) fn decode_decimal(key: &[u8], bytes: &[u8]) -> Result<Decimal> {
    let raw: [u8; 16] = bytes.try_into().map_err(|_| TreasuryError::CorruptValue {
        key: hex_key(key),
        reason: format!("expected 16 bytes, found {}", bytes.len()),
    })?;
    Ok(Decimal::deserialize(raw))
}

fn hex_key(key: &[u8]) -> String {
    key.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Indicator series on top of a key-value backend
#[derive(Debug, Clone)]
pub struct IndicatorStore<S> {
    kv: S,
}

impl<S: KvStore> IndicatorStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Value of `indicator` at `epoch`, zero when nothing was recorded.
    pub fn get(&self, indicator: Indicator, epoch: Epoch) -> Result<Decimal> {
        match indicator.prefix() {
            Some(prefix) => {
                let key = series_key(prefix, epoch);
                match self.kv.get(&key)? {
                    Some(bytes) => decode_decimal(&key, &bytes),
                    None => Ok(Decimal::ZERO),
                }
            }
            None => {
                let tr = self.get(Indicator::TaxRewards, epoch)?;
                let sr = self.get(Indicator::SeigniorageRewards, epoch)?;
                tr.checked_add(sr).ok_or_else(|| {
                    TreasuryError::Overflow(format!("MR at epoch {}", epoch))
                })
            }
        }
    }

    pub fn set(&mut self, indicator: Indicator, epoch: Epoch, value: Decimal) -> Result<()> {
        let prefix = indicator.stored_prefix()?;
        self.kv
            .set(&series_key(prefix, epoch), &encode_decimal(value))?;
        Ok(())
    }

    /// Queue a write of `indicator` at `epoch` for the next `commit`.
    pub fn stage(
        &self,
        batch: &mut WriteBatch,
        indicator: Indicator,
        epoch: Epoch,
        value: Decimal,
    ) -> Result<()> {
        let prefix = indicator.stored_prefix()?;
        batch.set(&series_key(prefix, epoch), &encode_decimal(value));
        Ok(())
    }

    /// Apply staged writes atomically.
    pub fn commit(&mut self, batch: WriteBatch) -> Result<()> {
        Ok(self.kv.apply_batch(batch)?)
    }

    /// Whether a value was ever written for `indicator` at `epoch`.
    pub fn has(&self, indicator: Indicator, epoch: Epoch) -> Result<bool> {
        let prefix = indicator.stored_prefix()?;
        Ok(self.kv.contains(&series_key(prefix, epoch))?)
    }

    /// Recorded `(epoch, value)` pairs with `from <= epoch <= to`, ascending.
    pub fn range(
        &self,
        indicator: Indicator,
        from: Epoch,
        to: Epoch,
    ) -> Result<Vec<(Epoch, Decimal)>> {
        let prefix = indicator.stored_prefix()?;
        let mut entries = Vec::new();

        for (key, value) in self.kv.scan_prefix(&[prefix])? {
            if key.len() != 9 {
                return Err(TreasuryError::CorruptValue {
                    key: hex_key(&key),
                    reason: "malformed series key".to_string(),
                });
            }
            let mut epoch_bytes = [0u8; 8];
            epoch_bytes.copy_from_slice(&key[1..]);
            let epoch = Epoch::from_be_bytes(epoch_bytes);

            if epoch < from {
                continue;
            }
            if epoch > to {
                break;
            }
            entries.push((epoch, decode_decimal(&key, &value)?));
        }
        Ok(entries)
    }

    pub(crate) fn raw_get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.kv.get(key)?)
    }

    pub(crate) fn raw_set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        Ok(self.kv.set(key, value)?)
    }

    pub fn into_backend(self) -> S {
        self.kv
    }
}
