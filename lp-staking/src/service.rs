// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(target_arch = "wasm32", no_main)]

mod state;

use std::sync::Arc;

use async_graphql::{EmptySubscription, Object, Request, Response, Schema, SimpleObject};
use linera_sdk::{
    graphql::GraphQLMutationRoot,
    linera_base_types::{Amount, WithServiceAbi},
    views::View,
    Service, ServiceRuntime,
};
use lp_staking::{
    adjustment::{claim_request, Adjustment, ChangeDescription},
    error::parse_amount,
    preferences::FeatureVisibility,
    snapshot::Balances,
    stake::LpStake,
    transaction::{ChangeRequest, RequestKind},
    view::{LpStakingView, ViewState},
    Operation, Parameters,
};

use crate::state::LpStakingState;

linera_sdk::service!(LpStakingService);

pub struct LpStakingService {
    state: Arc<LpStakingState>,
    runtime: Arc<ServiceRuntime<Self>>,
}

impl WithServiceAbi for LpStakingService {
    type Abi = lp_staking::LpStakingAbi;
}

impl Service for LpStakingService {
    type Parameters = Parameters;

    async fn new(runtime: ServiceRuntime<Self>) -> Self {
        let state = LpStakingState::load(runtime.root_view_storage_context())
            .await
            .expect("Failed to load state");
        LpStakingService {
            state: Arc::new(state),
            runtime: Arc::new(runtime),
        }
    }

    async fn handle_query(&self, request: Request) -> Response {
        let query = QueryRoot {
            panel: self.state.panel.get().clone(),
            features: *self.state.features.get(),
        };
        let schema = Schema::build(
            query,
            Operation::mutation_root(self.runtime.clone()),
            EmptySubscription,
        )
        .finish();
        schema.execute(request).await
    }
}

/// The read-model handed to whatever renders the panel.
struct QueryRoot {
    panel: ViewState,
    features: FeatureVisibility,
}

#[Object]
impl QueryRoot {
    async fn view(&self) -> LpStakingView {
        self.panel.view()
    }

    async fn change_pending(&self) -> bool {
        self.panel.change_pending()
    }

    async fn stake(&self) -> StakeSummary {
        StakeSummary::from(self.panel.stake())
    }

    async fn balances(&self) -> Balances {
        *self.panel.balances()
    }

    async fn draft_amount(&self) -> Option<Amount> {
        self.panel.draft()
    }

    /// The evaluation of the draft, while the stake is being adjusted.
    async fn adjustment(&self) -> Option<AdjustmentSummary> {
        self.panel
            .adjusting()
            .then(|| AdjustmentSummary::new(&Adjustment::new(&self.panel)))
    }

    /// Evaluates a draft typed by the user without storing it.
    async fn preview(&self, draft: String) -> async_graphql::Result<AdjustmentSummary> {
        let draft = parse_amount(&draft)?;
        Ok(AdjustmentSummary::new(&Adjustment::with_draft(
            &self.panel,
            draft,
        )))
    }

    async fn claim_request(&self) -> Option<RequestSummary> {
        claim_request(self.panel.stake()).map(RequestSummary::from)
    }

    async fn features(&self) -> FeatureVisibility {
        self.features
    }
}

#[derive(SimpleObject)]
struct StakeSummary {
    staked_amount: Amount,
    accrued_reward: Amount,
    is_empty: bool,
}

impl From<&LpStake> for StakeSummary {
    fn from(stake: &LpStake) -> Self {
        StakeSummary {
            staked_amount: stake.staked_amount(),
            accrued_reward: stake.accrued_reward(),
            is_empty: stake.is_empty(),
        }
    }
}

#[derive(SimpleObject)]
struct RequestSummary {
    kind: RequestKind,
    amount: Option<Amount>,
    full: bool,
}

impl From<ChangeRequest> for RequestSummary {
    fn from(request: ChangeRequest) -> Self {
        RequestSummary {
            kind: request.kind(),
            amount: request.amount(),
            full: matches!(request, ChangeRequest::Decrease { full: true, .. }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, async_graphql::Enum)]
enum DescriptionKind {
    NewStake,
    Adding,
    Withdrawing,
}

#[derive(SimpleObject)]
struct DescriptionSummary {
    kind: DescriptionKind,
    amount: Amount,
}

impl From<ChangeDescription> for DescriptionSummary {
    fn from(description: ChangeDescription) -> Self {
        let (kind, amount) = match description {
            ChangeDescription::NewStake { amount } => (DescriptionKind::NewStake, amount),
            ChangeDescription::Adding { amount } => (DescriptionKind::Adding, amount),
            ChangeDescription::Withdrawing { amount } => (DescriptionKind::Withdrawing, amount),
        };
        DescriptionSummary { kind, amount }
    }
}

#[derive(SimpleObject)]
struct AdjustmentSummary {
    draft_amount: Amount,
    edited: bool,
    max_amount: Amount,
    maxed_out: bool,
    /// The change as it would be submitted, whether or not it is valid.
    change: Option<RequestSummary>,
    error: Option<String>,
    approval_needed: bool,
    /// The next transaction to submit.
    request: Option<RequestSummary>,
    description: Option<DescriptionSummary>,
}

impl AdjustmentSummary {
    fn new(adjustment: &Adjustment) -> Self {
        let (request, error) = match adjustment.request() {
            Ok(request) => (request.map(RequestSummary::from), None),
            Err(error) => (None, Some(error.to_string())),
        };
        AdjustmentSummary {
            draft_amount: adjustment.draft(),
            edited: adjustment.is_edited(),
            max_amount: adjustment.max_amount(),
            maxed_out: adjustment.is_maxed_out(),
            change: adjustment
                .change()
                .map(|change| RequestSummary::from(ChangeRequest::from_change(change))),
            error,
            approval_needed: adjustment.approval_needed(),
            request,
            description: adjustment.description().map(DescriptionSummary::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_graphql::{Request, Value};
    use futures::FutureExt as _;
    use linera_sdk::{
        linera_base_types::Amount, util::BlockingWait, views::View, Service, ServiceRuntime,
    };
    use lp_staking::{
        snapshot::{CommitPolicy, Snapshot},
        view::{Action, ViewState},
    };
    use serde_json::json;

    use super::{LpStakingService, LpStakingState};

    fn service_with(panel: ViewState) -> LpStakingService {
        let runtime = Arc::new(ServiceRuntime::<LpStakingService>::new());
        let mut state = LpStakingState::load(runtime.root_view_storage_context())
            .blocking_wait()
            .expect("Failed to read from mock key value store");
        state.panel.set(panel);

        LpStakingService {
            state: Arc::new(state),
            runtime,
        }
    }

    fn query(service: &LpStakingService, query: &str) -> async_graphql::Response {
        service
            .handle_query(Request::new(query))
            .now_or_never()
            .expect("Query should not await anything")
    }

    fn staked_panel() -> ViewState {
        ViewState::new(Snapshot {
            staked_amount: Amount::from_tokens(100),
            accrued_reward: Amount::from_tokens(5),
            available_to_stake: Amount::from_tokens(50),
            granted_allowance: Amount::from_tokens(120),
            total_pool_staked: Amount::from_tokens(1_000),
        })
    }

    #[test]
    fn empty_panel() {
        let service = service_with(ViewState::default());
        let response = query(&service, "{ view changePending draftAmount claimRequest { kind } }");

        let expected = Value::from_json(json!({
            "view": "NONE",
            "changePending": false,
            "draftAmount": null,
            "claimRequest": null,
        }))
        .unwrap();
        assert!(response.errors.is_empty());
        assert_eq!(response.data, expected);
    }

    #[test]
    fn adjusting_panel() {
        let policy = CommitPolicy::default();
        let panel = staked_panel()
            .reduce(Action::StartAdjusting, &policy)
            .reduce(Action::SetDraft(Amount::from_tokens(130)), &policy);
        let service = service_with(panel);

        let response = query(
            &service,
            "{ view stake { stakedAmount } adjustment { approvalNeeded \
             request { kind amount } description { kind } } claimRequest { kind } }",
        );

        let expected = Value::from_json(json!({
            "view": "ADJUSTING",
            "stake": { "stakedAmount": Amount::from_tokens(100) },
            "adjustment": {
                "approvalNeeded": true,
                "request": { "kind": "APPROVE", "amount": Amount::from_tokens(130) },
                "description": { "kind": "ADDING" },
            },
            "claimRequest": { "kind": "CLAIM_REWARD" },
        }))
        .unwrap();
        assert!(response.errors.is_empty());
        assert_eq!(response.data, expected);
    }

    #[test]
    fn preview_validates_input() {
        let service = service_with(staked_panel());

        let response = query(&service, r#"{ preview(draft: "200") { error request { kind } } }"#);
        assert!(response.errors.is_empty());
        let preview = response.data.into_json().unwrap();
        assert!(preview["preview"]["error"].is_string());
        assert!(preview["preview"]["request"].is_null());

        let response = query(&service, r#"{ preview(draft: "-3") { edited } }"#);
        assert_eq!(response.errors.len(), 1);
    }
}
