// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(target_arch = "wasm32", no_main)]

mod state;

use linera_sdk::{
    linera_base_types::WithContractAbi,
    views::{RootView, View},
    Contract, ContractRuntime,
};
use log::{debug, info};
use lp_staking::{preferences::FeatureVisibility, view::Action, LpStakingAbi, Operation, Parameters};
use state::LpStakingState;

pub struct LpStakingContract {
    state: LpStakingState,
    runtime: ContractRuntime<Self>,
}

linera_sdk::contract!(LpStakingContract);

impl WithContractAbi for LpStakingContract {
    type Abi = LpStakingAbi;
}

impl Contract for LpStakingContract {
    type Message = ();
    type InstantiationArgument = FeatureVisibility;
    type Parameters = Parameters;
    type EventValue = ();

    async fn load(runtime: ContractRuntime<Self>) -> Self {
        let state = LpStakingState::load(runtime.root_view_storage_context())
            .await
            .expect("Failed to load state");
        LpStakingContract { state, runtime }
    }

    async fn instantiate(&mut self, features: FeatureVisibility) {
        // Validate that the application parameters were configured correctly.
        let parameters = self.runtime.application_parameters();
        info!("Staking panel created with {parameters:?} and {features:?}");
        self.state.features.set(features);
    }

    async fn execute_operation(&mut self, operation: Operation) -> Self::Response {
        match operation {
            Operation::StartAdjusting => self.dispatch(Action::StartAdjusting),
            Operation::CancelAdjusting => self.dispatch(Action::CancelAdjusting),
            Operation::SetDraft { amount } => self.dispatch(Action::SetDraft(amount)),
            Operation::RevertDraft => self.dispatch(Action::RevertDraft),
            Operation::ReportTransaction { status } => match status.action() {
                Some(action) => self.dispatch(action),
                None => debug!("Transaction {status:?}, waiting for the next snapshot"),
            },
            Operation::PushSnapshot { snapshot } => self.dispatch(Action::Snapshot(snapshot)),
            Operation::SetFeatureVisibility { feature, visible } => {
                let mut features = *self.state.features.get();
                features.set(feature, visible);
                info!("Feature {feature:?} visible: {visible}");
                self.state.features.set(features);
            }
        }
    }

    async fn execute_message(&mut self, _message: ()) {
        panic!("Snapshots are pushed by the panel's own chain, no messages are expected");
    }

    async fn store(mut self) {
        self.state.save().await.expect("Failed to save state");
    }
}

impl LpStakingContract {
    /// Runs `action` through the panel's reducer and stores the resulting state.
    fn dispatch(&mut self, action: Action) {
        let policy = self.runtime.application_parameters().commit_policy;
        let next = self.state.panel.get().clone().reduce(action, &policy);
        self.state.panel.set(next);
    }
}
