// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

/*! ABI of the LP Staking Panel Application */

pub mod adjustment;
pub mod error;
pub mod preferences;
pub mod snapshot;
pub mod stake;
pub mod transaction;
pub mod view;

use async_graphql::{scalar, Request, Response};
use linera_sdk::{
    graphql::GraphQLMutationRoot,
    linera_base_types::{Amount, ContractAbi, ServiceAbi},
};
use serde::{Deserialize, Serialize};

use crate::{
    preferences::Feature,
    snapshot::{CommitPolicy, Snapshot},
    transaction::TransactionStatus,
};

pub struct LpStakingAbi;

impl ContractAbi for LpStakingAbi {
    type Operation = Operation;
    type Response = ();
}

impl ServiceAbi for LpStakingAbi {
    type Query = Request;
    type QueryResponse = Response;
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct Parameters {
    /// How snapshots are matched against a pending transaction.
    pub commit_policy: CommitPolicy,
}

scalar!(Parameters);

#[derive(Debug, Deserialize, Serialize, GraphQLMutationRoot)]
pub enum Operation {
    /// Open the editor on the current stake.
    StartAdjusting,
    /// Close the editor and drop the draft. A submitted transaction is not affected.
    CancelAdjusting,
    /// Set the target staked amount being edited.
    SetDraft { amount: Amount },
    /// Reset the draft to the current stake.
    RevertDraft,
    /// Report progress of the staking transaction.
    ReportTransaction { status: TransactionStatus },
    /// Feed a new observation of the chain.
    PushSnapshot { snapshot: Snapshot },
    /// Show or hide a section of the front-end.
    SetFeatureVisibility { feature: Feature, visible: bool },
}
