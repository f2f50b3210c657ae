//! Economics error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomicsError {
    #[error("Amount overflow in denomination {denom}")]
    AmountOverflow { denom: String },

    #[error("Insufficient supply of {denom}: requested {requested}, available {available}")]
    InsufficientSupply {
        denom: String,
        requested: u128,
        available: u128,
    },

    #[error("Invalid denomination: {0:?}")]
    InvalidDenom(String),

    #[error("Invalid exchange rate for {denom}: {rate}")]
    InvalidExchangeRate { denom: String, rate: String },

    #[error("Epoch length must be positive")]
    ZeroEpochLength,
}

pub type Result<T> = std::result::Result<T, EconomicsError>;
