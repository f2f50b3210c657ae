//! Treasury Indicator Engine
//!
//! Tracks per-epoch monetary indicators for the treasury:
//! - Tax rewards (TR): tax proceeds converted to the reference currency
//! - Seigniorage rewards (SR): weighted value of native tokens burned
//! - Mining rewards (MR): TR + SR
//! - Total staked supply (TSL)
//!
//! Policy routines read these through windowed sums and rolling averages.

pub mod accumulator;
pub mod aggregate;
pub mod config;
pub mod error;
pub mod keeper;
pub mod ratios;
pub mod report;
pub mod store;
pub mod updater;

pub use accumulator::EpochAccumulator;
pub use aggregate::{
    aggregate, effective_window, rolling_average_indicator, sum_indicator, Aggregation,
    EpochValueSource, SeriesSource,
};
pub use config::{TreasuryConfig, DEFAULT_REWARD_WEIGHT, DEFAULT_WINDOW_LONG, DEFAULT_WINDOW_SHORT};
pub use error::{Result, TreasuryError};
pub use keeper::TreasuryKeeper;
pub use ratios::{mr, sr, trl};
pub use report::IndicatorReport;
pub use store::{Indicator, IndicatorStore};
pub use updater::{
    compute_indicators, seigniorage, seigniorage_rewards, tax_rewards_in, BlockContext,
    EpochIndicators,
};
