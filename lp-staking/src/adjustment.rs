// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Evaluation of the draft being edited: whether it is valid, what it would submit, and how to
//! describe it.

use linera_sdk::linera_base_types::Amount;
use serde::{Deserialize, Serialize};

use crate::{
    error::LpStakingError,
    snapshot::Balances,
    stake::{LpStake, LpStakeChange},
    transaction::ChangeRequest,
    view::ViewState,
};

/// How the panel words an edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum ChangeDescription {
    /// The first stake of an empty position.
    NewStake { amount: Amount },
    Adding { amount: Amount },
    Withdrawing { amount: Amount },
}

/// The allowance the staking contract needs before `change` can be submitted.
pub fn required_allowance(stake: &LpStake, change: &LpStakeChange) -> Amount {
    match change {
        LpStakeChange::Increase { amount } => stake.staked_amount().saturating_add(*amount),
        LpStakeChange::Decrease { .. } => Amount::ZERO,
    }
}

/// The request for claiming the accrued reward, if there is any.
pub fn claim_request(stake: &LpStake) -> Option<ChangeRequest> {
    (stake.accrued_reward() != Amount::ZERO).then_some(ChangeRequest::ClaimReward)
}

/// A draft target amount weighed against the stake and balances it would change.
#[derive(Clone, Copy, Debug)]
pub struct Adjustment {
    stake: LpStake,
    balances: Balances,
    draft: Amount,
}

impl Adjustment {
    pub fn new(state: &ViewState) -> Self {
        Self::with_draft(state, state.edited_amount())
    }

    /// Evaluates `draft` instead of the draft held by `state`.
    pub fn with_draft(state: &ViewState, draft: Amount) -> Self {
        Adjustment {
            stake: *state.stake(),
            balances: *state.balances(),
            draft,
        }
    }

    pub fn draft(&self) -> Amount {
        self.draft
    }

    pub fn change(&self) -> Option<LpStakeChange> {
        self.stake.diff(self.draft)
    }

    pub fn is_edited(&self) -> bool {
        self.draft != self.stake.staked_amount()
    }

    /// The largest stake the wallet can reach.
    pub fn max_amount(&self) -> Amount {
        self.stake
            .staked_amount()
            .saturating_add(self.balances.available_to_stake)
    }

    pub fn is_maxed_out(&self) -> bool {
        self.draft == self.max_amount()
    }

    /// The change, unless it stakes more than the wallet holds.
    pub fn validated_change(&self) -> Result<Option<LpStakeChange>, LpStakingError> {
        match self.change() {
            Some(LpStakeChange::Increase { amount })
                if amount > self.balances.available_to_stake =>
            {
                Err(LpStakingError::ExceedsBalance {
                    excess: amount.saturating_sub(self.balances.available_to_stake),
                })
            }
            change => Ok(change),
        }
    }

    /// Whether an approval has to be granted before the change can be submitted.
    pub fn approval_needed(&self) -> bool {
        matches!(self.request(), Ok(Some(ChangeRequest::Approve { .. })))
    }

    /// The next transaction to submit: an approval when the allowance is short, otherwise the
    /// change itself.
    pub fn request(&self) -> Result<Option<ChangeRequest>, LpStakingError> {
        let Some(change) = self.validated_change()? else {
            return Ok(None);
        };
        let allowance = required_allowance(&self.stake, &change);
        if allowance > self.balances.granted_allowance {
            Ok(Some(ChangeRequest::Approve { amount: allowance }))
        } else {
            Ok(Some(ChangeRequest::from_change(change)))
        }
    }

    pub fn description(&self) -> Option<ChangeDescription> {
        let description = match self.change()? {
            LpStakeChange::Increase { amount } if self.stake.is_empty() => {
                ChangeDescription::NewStake { amount }
            }
            LpStakeChange::Increase { amount } => ChangeDescription::Adding { amount },
            LpStakeChange::Decrease { amount, .. } => ChangeDescription::Withdrawing { amount },
        };
        Some(description)
    }
}
