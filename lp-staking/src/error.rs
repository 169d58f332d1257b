// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use linera_sdk::linera_base_types::Amount;
use thiserror::Error;

/// Errors raised at the edges of the staking panel. The stake arithmetic itself cannot fail.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LpStakingError {
    /// The text entered as an amount is negative or not a number.
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),

    /// The draft stakes more than the wallet holds.
    #[error("the amount you're trying to stake exceeds your balance by {excess}")]
    ExceedsBalance { excess: Amount },
}

/// Parses a user-entered amount.
pub fn parse_amount(input: &str) -> Result<Amount, LpStakingError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.starts_with('-') {
        return Err(LpStakingError::InvalidAmount(input.to_owned()));
    }
    trimmed
        .parse::<Amount>()
        .map_err(|_| LpStakingError::InvalidAmount(input.to_owned()))
}
