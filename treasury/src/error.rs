//! Treasury error types

use economics::{EconomicsError, Epoch};
use rust_decimal::Decimal;
use thiserror::Error;
use treasury_storage::StorageError;

/// Treasury indicator errors.
///
/// Every variant is fatal for the block being applied: the caller must
/// abort the whole state transition.
#[derive(Error, Debug)]
pub enum TreasuryError {
    #[error("Total staked supply is zero at epoch {epoch}")]
    ZeroStakedSupply { epoch: Epoch },

    #[error("Initial issuance was never recorded before updating epoch {epoch}")]
    MissingIssuanceSnapshot { epoch: Epoch },

    #[error("Epoch {epoch} is already closed")]
    EpochAlreadyClosed { epoch: Epoch },

    #[error("No exchange rate available for {denom}")]
    MissingExchangeRate { denom: String },

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Reward weight {0} is outside [0, 1]")]
    InvalidRewardWeight(Decimal),

    #[error("Indicator {0} is derived and cannot be stored")]
    DerivedIndicator(&'static str),

    #[error("Corrupt value under key {key}: {reason}")]
    CorruptValue { key: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Economics error: {0}")]
    EconomicsError(#[from] EconomicsError),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, TreasuryError>;
