//! Treasury Economics Primitives
//!
//! Shared building blocks for the treasury indicator engine:
//! - Multi-denomination coin bags
//! - Epoch clock arithmetic
//! - Exchange-rate, supply and staking collaborator seams
//! - Monetary constants

pub mod coins;
pub mod epoch;
pub mod error;
pub mod pricing;
pub mod staking;
pub mod supply;

pub use coins::{Coin, Coins};
pub use epoch::{epoch_of, first_height_of, is_epoch_boundary, Epoch};
pub use error::{EconomicsError, Result};
pub use pricing::{to_decimal, ExchangeRateOracle, PriceTable};
pub use staking::{StakingPool, StakingView};
pub use supply::{SupplyLedger, SupplyManager, SupplyStats};

/// Economic constants
pub mod constants {
    /// Micro unit (6 decimal places) shared by every denomination
    pub const MICRO_UNIT: u128 = 1_000_000;

    /// Native staking token, also the seigniorage-bearing token
    pub const MICRO_LUNA_DENOM: &str = "uluna";

    /// Reference currency all indicators are expressed in
    pub const MICRO_SDR_DENOM: &str = "usdr";

    pub const MICRO_USD_DENOM: &str = "uusd";
    pub const MICRO_KRW_DENOM: &str = "ukrw";
    pub const MICRO_GBP_DENOM: &str = "ugbp";
    pub const MICRO_CNY_DENOM: &str = "ucny";

    /// Block production cadence (one block every 6 seconds)
    pub const BLOCKS_PER_MINUTE: u64 = 10;
    pub const BLOCKS_PER_HOUR: u64 = BLOCKS_PER_MINUTE * 60;
    pub const BLOCKS_PER_DAY: u64 = BLOCKS_PER_HOUR * 24;

    /// Blocks per week (100,800)
    pub const BLOCKS_PER_WEEK: u64 = BLOCKS_PER_DAY * 7;

    /// Default epoch length
    pub const BLOCKS_PER_EPOCH: u64 = BLOCKS_PER_WEEK;
}
