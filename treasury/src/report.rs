//! Indicator snapshot served to policy routines and operators

use economics::Epoch;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TreasuryError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorReport {
    pub epoch: Epoch,
    pub tax_rewards: Decimal,
    pub seigniorage_rewards: Decimal,
    pub mining_rewards: Decimal,
    pub total_staked: Decimal,
    /// Rolling TRL average over the short window
    pub trl_short: Decimal,
    /// Rolling TRL average over the long window
    pub trl_long: Decimal,
}

impl IndicatorReport {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TreasuryError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimals_serialize_exactly() {
        let report = IndicatorReport {
            epoch: 3,
            tax_rewards: Decimal::from(400),
            seigniorage_rewards: Decimal::from(40),
            mining_rewards: Decimal::from(440),
            total_staked: Decimal::from(4_000_000),
            trl_short: Decimal::new(1, 4),
            trl_long: Decimal::new(1, 4),
        };

        let json = report.to_json().unwrap();
        assert!(json.contains("\"trl_short\": \"0.0001\""));

        let back: IndicatorReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
