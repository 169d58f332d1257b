// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! On-chain state observed by the panel, and the rules that read a new observation as the
//! confirmation of a submitted change.

use async_graphql::{scalar, SimpleObject};
use linera_sdk::linera_base_types::Amount;
use serde::{Deserialize, Serialize};

use crate::stake::LpStake;

/// Everything the panel needs to know about the chain, as of the last poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Snapshot {
    pub staked_amount: Amount,
    pub accrued_reward: Amount,
    /// LP tokens held in the wallet, i.e. what can still be staked.
    pub available_to_stake: Amount,
    /// How much the staking contract may transfer on the user's behalf.
    pub granted_allowance: Amount,
    pub total_pool_staked: Amount,
}

scalar!(Snapshot);

impl Snapshot {
    pub fn from_parts(stake: LpStake, balances: Balances) -> Self {
        Snapshot {
            staked_amount: stake.staked_amount(),
            accrued_reward: stake.accrued_reward(),
            available_to_stake: balances.available_to_stake,
            granted_allowance: balances.granted_allowance,
            total_pool_staked: balances.total_pool_staked,
        }
    }

    pub fn stake(&self) -> LpStake {
        LpStake::new(self.staked_amount, self.accrued_reward)
    }

    pub fn balances(&self) -> Balances {
        Balances {
            available_to_stake: self.available_to_stake,
            granted_allowance: self.granted_allowance,
            total_pool_staked: self.total_pool_staked,
        }
    }
}

/// The part of a snapshot that is not the user's stake.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Balances {
    pub available_to_stake: Amount,
    pub granted_allowance: Amount,
    pub total_pool_staked: Amount,
}

/// Which differences between two snapshots count as a committed change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommitPolicy {
    /// Read a shrinking reward as a claim having gone through. The reward can drop for other
    /// reasons, so deployments that see it misfire can turn this off.
    pub reward_decrease_commits: bool,
}

impl Default for CommitPolicy {
    fn default() -> Self {
        CommitPolicy {
            reward_decrease_commits: true,
        }
    }
}

/// The evidence that a pending transaction has landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitSignal {
    StakeChanged,
    AllowanceIncreased,
    RewardClaimed,
}

/// Compares two consecutive snapshots and reports whether the newer one shows a committed change.
pub fn commit_signal(
    previous: &Snapshot,
    next: &Snapshot,
    policy: &CommitPolicy,
) -> Option<CommitSignal> {
    if next.staked_amount != previous.staked_amount {
        Some(CommitSignal::StakeChanged)
    } else if next.granted_allowance > previous.granted_allowance {
        Some(CommitSignal::AllowanceIncreased)
    } else if policy.reward_decrease_commits && next.accrued_reward < previous.accrued_reward {
        Some(CommitSignal::RewardClaimed)
    } else {
        None
    }
}
