//! Per-epoch proceeds accumulator

use economics::{Coins, Epoch};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Raw events observed since the last epoch boundary.
///
/// `initial_issuance` doubles as the phase marker: the updater refuses to run
/// until a snapshot has been taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochAccumulator {
    tax_proceeds: Coins,
    initial_issuance: Option<u128>,
    snapshot_epoch: Option<Epoch>,
}

impl EpochAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_tax_proceeds(&mut self, proceeds: &Coins) -> Result<()> {
        self.tax_proceeds.add(proceeds)?;
        Ok(())
    }

    /// Last write wins within an epoch.
    pub fn record_initial_issuance(&mut self, issuance: u128, epoch: Epoch) {
        self.initial_issuance = Some(issuance);
        self.snapshot_epoch = Some(epoch);
    }

    pub fn tax_proceeds(&self) -> &Coins {
        &self.tax_proceeds
    }

    pub fn initial_issuance(&self) -> Option<u128> {
        self.initial_issuance
    }

    pub fn snapshot_epoch(&self) -> Option<Epoch> {
        self.snapshot_epoch
    }

    pub fn is_snapshot_taken(&self) -> bool {
        self.initial_issuance.is_some()
    }

    /// Hand back the closed epoch's events and start empty.
    pub fn reset(&mut self) -> EpochAccumulator {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use economics::constants::*;
    use economics::Coin;

    #[test]
    fn test_accumulates_proceeds() {
        let mut acc = EpochAccumulator::new();
        let bag = Coins::from_coins(vec![Coin::new(MICRO_KRW_DENOM, 40)]).unwrap();

        acc.record_tax_proceeds(&bag).unwrap();
        acc.record_tax_proceeds(&bag).unwrap();
        assert_eq!(acc.tax_proceeds().amount_of(MICRO_KRW_DENOM), 80);
    }

    #[test]
    fn test_snapshot_last_write_wins() {
        let mut acc = EpochAccumulator::new();
        assert!(!acc.is_snapshot_taken());

        acc.record_initial_issuance(100, 3);
        acc.record_initial_issuance(90, 3);
        assert_eq!(acc.initial_issuance(), Some(90));
        assert_eq!(acc.snapshot_epoch(), Some(3));
    }

    #[test]
    fn test_reset_returns_closed_epoch() {
        let mut acc = EpochAccumulator::new();
        acc.record_initial_issuance(5, 0);
        acc.record_tax_proceeds(&Coins::from_coins(vec![Coin::new(MICRO_SDR_DENOM, 1)]).unwrap())
            .unwrap();

        let closed = acc.reset();
        assert_eq!(closed.initial_issuance(), Some(5));
        assert_eq!(closed.tax_proceeds().len(), 1);
        assert_eq!(acc, EpochAccumulator::new());
    }
}
