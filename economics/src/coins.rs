//! Multi-denomination coin amounts

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{EconomicsError, Result};

/// A raw integer amount of a single denomination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Denominations are 3-16 characters: a lowercase letter followed by
/// lowercase letters or digits.
pub fn validate_denom(denom: &str) -> Result<()> {
    let mut chars = denom.chars();
    let valid = (3..=16).contains(&denom.len())
        && chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());

    if valid {
        Ok(())
    } else {
        Err(EconomicsError::InvalidDenom(denom.to_string()))
    }
}

/// A bag of coins keyed by denomination.
///
/// Denominations are kept sorted so iteration and serialization are the same
/// on every node. Zero amounts are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coins(BTreeMap<String, u128>);

impl Coins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bag from individual coins, merging repeated denominations.
    pub fn from_coins<I>(coins: I) -> Result<Self>
    where
        I: IntoIterator<Item = Coin>,
    {
        let mut bag = Self::new();
        for coin in coins {
            bag.add_coin(&coin)?;
        }
        Ok(bag)
    }

    /// Denominations must already have passed `validate_denom`.
    pub(crate) fn from_validated<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, u128)>,
    {
        Self(entries.into_iter().filter(|(_, amount)| *amount > 0).collect())
    }

    pub fn add_coin(&mut self, coin: &Coin) -> Result<()> {
        validate_denom(&coin.denom)?;
        if coin.amount == 0 {
            return Ok(());
        }

        let entry = self.0.entry(coin.denom.clone()).or_insert(0);
        *entry = entry
            .checked_add(coin.amount)
            .ok_or_else(|| EconomicsError::AmountOverflow {
                denom: coin.denom.clone(),
            })?;
        Ok(())
    }

    /// Add every coin of `other` into this bag.
    ///
    /// On overflow the bag is left unchanged.
    pub fn add(&mut self, other: &Coins) -> Result<()> {
        let mut merged = self.0.clone();
        for (denom, amount) in &other.0 {
            let entry = merged.entry(denom.clone()).or_insert(0);
            *entry = entry
                .checked_add(*amount)
                .ok_or_else(|| EconomicsError::AmountOverflow {
                    denom: denom.clone(),
                })?;
        }
        self.0 = merged;
        Ok(())
    }

    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0.get(denom).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u128)> {
        self.0.iter().map(|(denom, amount)| (denom.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(denom, amount)| format!("{}{}", amount, denom))
            .collect();
        write!(f, "{}", parts.join(","))
    }
}
