// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use linera_sdk::views::{linera_views, RegisterView, RootView, ViewStorageContext};
use lp_staking::{preferences::FeatureVisibility, view::ViewState};

/// The application state: one staking panel per chain.
#[derive(RootView)]
#[view(context = "ViewStorageContext")]
pub struct LpStakingState {
    pub panel: RegisterView<ViewState>,
    pub features: RegisterView<FeatureVisibility>,
}
