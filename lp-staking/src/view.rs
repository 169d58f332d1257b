// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The state machine behind the staking panel.
//!
//! Every input, whether a user edit, a transaction status report or a fresh snapshot of the chain,
//! is an [`Action`] fed to [`ViewState::reduce`], which returns the next state.

use linera_sdk::linera_base_types::Amount;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    snapshot::{commit_signal, Balances, CommitPolicy, CommitSignal, Snapshot},
    stake::LpStake,
};

/// Which of the three panels should be shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, async_graphql::Enum)]
pub enum LpStakingView {
    /// Nothing staked and no reward to claim.
    None,
    /// A read-only view of an existing stake.
    Active,
    /// The user is editing the staked amount.
    Adjusting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    StartAdjusting,
    CancelAdjusting,
    SetDraft(Amount),
    RevertDraft,
    SubmissionStarted,
    SubmissionFailed,
    SubmissionCancelled,
    Snapshot(Snapshot),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ViewState {
    stake: LpStake,
    balances: Balances,
    /// A submitted transaction has been neither confirmed nor rejected yet.
    change_pending: bool,
    adjusting: bool,
    /// The target staked amount being edited, if any.
    draft: Option<Amount>,
}

impl ViewState {
    pub fn new(snapshot: Snapshot) -> Self {
        ViewState {
            stake: snapshot.stake(),
            balances: snapshot.balances(),
            ..ViewState::default()
        }
    }

    pub fn stake(&self) -> &LpStake {
        &self.stake
    }

    pub fn balances(&self) -> &Balances {
        &self.balances
    }

    pub fn change_pending(&self) -> bool {
        self.change_pending
    }

    pub fn adjusting(&self) -> bool {
        self.adjusting
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_parts(self.stake, self.balances)
    }

    pub fn view(&self) -> LpStakingView {
        if self.adjusting {
            LpStakingView::Adjusting
        } else if self.stake.is_empty() {
            LpStakingView::None
        } else {
            LpStakingView::Active
        }
    }

    /// The draft amount, if the user entered one.
    pub fn draft(&self) -> Option<Amount> {
        self.draft
    }

    /// The amount the editor shows: the draft, or the current stake when there is none.
    pub fn edited_amount(&self) -> Amount {
        self.draft.unwrap_or(self.stake.staked_amount())
    }

    pub fn reduce(self, action: Action, policy: &CommitPolicy) -> Self {
        debug!("Staking panel action {action:?} in view {:?}", self.view());
        match action {
            Action::StartAdjusting => ViewState {
                adjusting: true,
                draft: Some(self.edited_amount()),
                ..self
            },
            Action::CancelAdjusting => ViewState {
                adjusting: false,
                draft: None,
                ..self
            },
            Action::SetDraft(amount) if self.adjusting => ViewState {
                draft: Some(amount),
                ..self
            },
            Action::RevertDraft if self.adjusting => ViewState {
                draft: Some(self.stake.staked_amount()),
                ..self
            },
            Action::SetDraft(_) | Action::RevertDraft => {
                warn!("Ignoring {action:?}: the stake is not being adjusted");
                self
            }
            Action::SubmissionStarted => ViewState {
                change_pending: true,
                ..self
            },
            // The draft stays so that the user can retry.
            Action::SubmissionFailed | Action::SubmissionCancelled => ViewState {
                change_pending: false,
                ..self
            },
            Action::Snapshot(next) => self.observe(next, policy),
        }
    }

    /// Adopts `next` as ground truth and decides what happens to a pending change and a draft.
    ///
    /// Only a change of the staked amount closes the editor. An approval or a claim landing keeps
    /// the draft, so that the stake transaction can follow the approval.
    fn observe(self, next: Snapshot, policy: &CommitPolicy) -> Self {
        let previous = self.snapshot();
        let stake = next.stake();
        let balances = next.balances();

        let change_pending = match commit_signal(&previous, &next, policy) {
            Some(CommitSignal::StakeChanged) => {
                info!("Staking change committed, stake is now {stake}");
                return ViewState {
                    stake,
                    balances,
                    change_pending: false,
                    adjusting: false,
                    draft: None,
                };
            }
            Some(signal) => {
                info!("Staking change committed ({signal:?}), stake is now {stake}");
                false
            }
            None => self.change_pending,
        };

        let draft = self.reproject(&stake);
        ViewState {
            stake,
            balances,
            change_pending,
            draft,
            ..self
        }
    }

    /// Carries the draft over to `stake` as the same change relative to the current stake.
    ///
    /// Snapshots that move the staked amount close the editor first, so from `observe` this keeps
    /// the draft as it is. A withdrawal of everything stays a withdrawal of everything.
    fn reproject(&self, stake: &LpStake) -> Option<Amount> {
        self.draft
            .map(|draft| stake.apply(self.stake.diff(draft).as_ref()))
    }
}
