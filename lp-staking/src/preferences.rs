// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

/// A section of the front-end that the user can hide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, async_graphql::Enum)]
pub enum Feature {
    Bonds,
    Trove,
    StabilityPool,
    Staking,
}

/// Which sections are shown. Given once when the application is created and changed only through
/// [`FeatureVisibility::set`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct FeatureVisibility {
    pub bonds: bool,
    pub trove: bool,
    pub stability_pool: bool,
    pub staking: bool,
}

impl Default for FeatureVisibility {
    fn default() -> Self {
        FeatureVisibility {
            bonds: true,
            trove: true,
            stability_pool: true,
            staking: true,
        }
    }
}

impl FeatureVisibility {
    pub fn is_visible(&self, feature: Feature) -> bool {
        match feature {
            Feature::Bonds => self.bonds,
            Feature::Trove => self.trove,
            Feature::StabilityPool => self.stability_pool,
            Feature::Staking => self.staking,
        }
    }

    pub fn set(&mut self, feature: Feature, visible: bool) {
        let flag = match feature {
            Feature::Bonds => &mut self.bonds,
            Feature::Trove => &mut self.trove,
            Feature::StabilityPool => &mut self.stability_pool,
            Feature::Staking => &mut self.staking,
        };
        *flag = visible;
    }
}
