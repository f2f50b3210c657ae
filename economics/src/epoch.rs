//! Epoch clock arithmetic
//!
//! An epoch is a fixed run of consecutive blocks. Epoch `n` covers heights
//! `[n * blocks_per_epoch, (n + 1) * blocks_per_epoch)`.

use crate::error::{EconomicsError, Result};

pub type Epoch = u64;

pub fn epoch_of(height: u64, blocks_per_epoch: u64) -> Result<Epoch> {
    if blocks_per_epoch == 0 {
        return Err(EconomicsError::ZeroEpochLength);
    }
    Ok(height / blocks_per_epoch)
}

/// True when `height` opens a new epoch (height ≡ 0 mod epoch length).
pub fn is_epoch_boundary(height: u64, blocks_per_epoch: u64) -> Result<bool> {
    if blocks_per_epoch == 0 {
        return Err(EconomicsError::ZeroEpochLength);
    }
    Ok(height % blocks_per_epoch == 0)
}

/// First block height of `epoch`, or `None` if it is past `u64::MAX`.
pub fn first_height_of(epoch: Epoch, blocks_per_epoch: u64) -> Option<u64> {
    epoch.checked_mul(blocks_per_epoch)
}
