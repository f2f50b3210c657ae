//! Treasury configuration (treasury.toml)
//!
//! Example:
//! ```toml
//! blocks_per_epoch = 100800
//! reference_denom = "usdr"
//! seigniorage_denom = "uluna"
//! reward_weight = "0.05"
//! window_short = 4
//! window_long = 52
//! ```

use economics::coins::validate_denom;
use economics::constants::{BLOCKS_PER_EPOCH, MICRO_LUNA_DENOM, MICRO_SDR_DENOM};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, TreasuryError};

/// Reward weight used until governance sets one (5%)
pub const DEFAULT_REWARD_WEIGHT: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Epochs in the short indicator window (about one month)
pub const DEFAULT_WINDOW_SHORT: i64 = 4;

/// Epochs in the long indicator window (about one year)
pub const DEFAULT_WINDOW_LONG: i64 = 52;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreasuryConfig {
    pub blocks_per_epoch: u64,

    /// Denomination every indicator is expressed in
    pub reference_denom: String,

    /// Token whose issuance changes produce seigniorage
    pub seigniorage_denom: String,

    /// Reward weight in effect until one is set
    pub reward_weight: Decimal,

    pub window_short: i64,
    pub window_long: i64,
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self {
            blocks_per_epoch: BLOCKS_PER_EPOCH,
            reference_denom: MICRO_SDR_DENOM.to_string(),
            seigniorage_denom: MICRO_LUNA_DENOM.to_string(),
            reward_weight: DEFAULT_REWARD_WEIGHT,
            window_short: DEFAULT_WINDOW_SHORT,
            window_long: DEFAULT_WINDOW_LONG,
        }
    }
}

impl TreasuryConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| TreasuryError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            TreasuryError::InvalidConfig(format!(
                "cannot read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.blocks_per_epoch == 0 {
            return Err(TreasuryError::InvalidConfig(
                "blocks_per_epoch must be positive".to_string(),
            ));
        }
        validate_denom(&self.reference_denom)?;
        validate_denom(&self.seigniorage_denom)?;

        if !is_valid_reward_weight(self.reward_weight) {
            return Err(TreasuryError::InvalidRewardWeight(self.reward_weight));
        }
        if self.window_short <= 0 || self.window_long <= 0 {
            return Err(TreasuryError::InvalidConfig(format!(
                "indicator windows must be positive (short {}, long {})",
                self.window_short, self.window_long
            )));
        }
        Ok(())
    }
}

pub fn is_valid_reward_weight(weight: Decimal) -> bool {
    weight >= Decimal::ZERO && weight <= Decimal::ONE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TreasuryConfig::default();
        config.validate().unwrap();
        assert_eq!(config.reward_weight, Decimal::new(5, 2));
        assert_eq!(config.blocks_per_epoch, 100_800);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = TreasuryConfig::from_toml_str(
            r#"
            blocks_per_epoch = 10
            reward_weight = "0.25"
            "#,
        )
        .unwrap();

        assert_eq!(config.blocks_per_epoch, 10);
        assert_eq!(config.reward_weight, Decimal::new(25, 2));
        assert_eq!(config.reference_denom, "usdr");
        assert_eq!(config.window_long, DEFAULT_WINDOW_LONG);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(TreasuryConfig::from_toml_str("blocks_per_epoch = 0").is_err());
        assert!(TreasuryConfig::from_toml_str("reward_weight = \"1.5\"").is_err());
        assert!(TreasuryConfig::from_toml_str("window_short = -1").is_err());
        assert!(TreasuryConfig::from_toml_str("reference_denom = \"X\"").is_err());
        assert!(TreasuryConfig::from_toml_str("blocks_per_epoch = \"ten\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("treasury.toml");
        fs::write(&path, "window_short = 8\n").unwrap();

        let config = TreasuryConfig::load(&path).unwrap();
        assert_eq!(config.window_short, 8);

        assert!(TreasuryConfig::load(dir.path().join("missing.toml")).is_err());
    }
}
