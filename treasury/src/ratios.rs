//! Derived per-epoch ratios

use economics::Epoch;
use rust_decimal::Decimal;
use treasury_storage::KvStore;

use crate::error::{Result, TreasuryError};
use crate::store::{Indicator, IndicatorStore};

/// Tax rewards per unit of staked supply (TR / TSL).
pub fn trl<S: KvStore>(store: &IndicatorStore<S>, epoch: Epoch) -> Result<Decimal> {
    let tr = store.get(Indicator::TaxRewards, epoch)?;
    let tsl = store.get(Indicator::TotalStakedLuna, epoch)?;

    if tsl.is_zero() {
        return Err(TreasuryError::ZeroStakedSupply { epoch });
    }
    tr.checked_div(tsl)
        .ok_or_else(|| TreasuryError::Overflow(format!("TRL at epoch {}", epoch)))
}

pub fn sr<S: KvStore>(store: &IndicatorStore<S>, epoch: Epoch) -> Result<Decimal> {
    store.get(Indicator::SeigniorageRewards, epoch)
}

pub fn mr<S: KvStore>(store: &IndicatorStore<S>, epoch: Epoch) -> Result<Decimal> {
    store.get(Indicator::MiningRewards, epoch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use treasury_storage::MemoryStore;

    #[test]
    fn test_trl_requires_stake() {
        let mut store = IndicatorStore::new(MemoryStore::new());
        store.set(Indicator::TaxRewards, 0, Decimal::from(100)).unwrap();

        assert!(matches!(
            trl(&store, 0),
            Err(TreasuryError::ZeroStakedSupply { epoch: 0 })
        ));

        store
            .set(Indicator::TotalStakedLuna, 0, Decimal::from(400))
            .unwrap();
        assert_eq!(trl(&store, 0).unwrap(), Decimal::new(25, 2));
    }

    #[test]
    fn test_sr_and_mr() {
        let mut store = IndicatorStore::new(MemoryStore::new());
        store.set(Indicator::TaxRewards, 1, Decimal::from(7)).unwrap();
        store
            .set(Indicator::SeigniorageRewards, 1, Decimal::from(3))
            .unwrap();

        assert_eq!(sr(&store, 1).unwrap(), Decimal::from(3));
        assert_eq!(mr(&store, 1).unwrap(), Decimal::from(10));
        assert_eq!(mr(&store, 2).unwrap(), Decimal::ZERO);
    }
}
