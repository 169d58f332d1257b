// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! What the panel hands to the transaction layer, and what it hears back.

use linera_sdk::linera_base_types::Amount;
use serde::{Deserialize, Serialize};

use crate::{stake::LpStakeChange, view::Action};

/// The progress of the staking transaction, as reported by whoever submits it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, async_graphql::Enum)]
pub enum TransactionStatus {
    AwaitingApproval,
    AwaitingConfirmation,
    Confirmed,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    /// The reducer action for this status. A confirmation has none: the change shows up in the
    /// next snapshot.
    pub fn action(self) -> Option<Action> {
        match self {
            TransactionStatus::AwaitingApproval | TransactionStatus::AwaitingConfirmation => {
                Some(Action::SubmissionStarted)
            }
            TransactionStatus::Failed => Some(Action::SubmissionFailed),
            TransactionStatus::Cancelled => Some(Action::SubmissionCancelled),
            TransactionStatus::Confirmed => None,
        }
    }
}

/// A transaction the user can submit from the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum ChangeRequest {
    /// Let the staking contract transfer up to `amount` LP tokens.
    Approve { amount: Amount },
    Increase { amount: Amount },
    Decrease { amount: Amount, full: bool },
    /// Withdraw the accrued reward.
    ClaimReward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, async_graphql::Enum)]
pub enum RequestKind {
    Approve,
    Increase,
    Decrease,
    ClaimReward,
}

impl ChangeRequest {
    pub fn from_change(change: LpStakeChange) -> Self {
        match change {
            LpStakeChange::Increase { amount } => ChangeRequest::Increase { amount },
            LpStakeChange::Decrease { amount, full } => ChangeRequest::Decrease { amount, full },
        }
    }

    pub fn kind(&self) -> RequestKind {
        match self {
            ChangeRequest::Approve { .. } => RequestKind::Approve,
            ChangeRequest::Increase { .. } => RequestKind::Increase,
            ChangeRequest::Decrease { .. } => RequestKind::Decrease,
            ChangeRequest::ClaimReward => RequestKind::ClaimReward,
        }
    }

    pub fn amount(&self) -> Option<Amount> {
        match self {
            ChangeRequest::Approve { amount }
            | ChangeRequest::Increase { amount }
            | ChangeRequest::Decrease { amount, .. } => Some(*amount),
            ChangeRequest::ClaimReward => None,
        }
    }
}
