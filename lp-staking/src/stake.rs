// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The LP stake value object and the algebra of changes between two stakes.

use std::fmt;

use linera_sdk::linera_base_types::Amount;
use serde::{Deserialize, Serialize};

/// The change between two states of an LP stake.
///
/// There is no "unchanged" variant: the absence of a change is an `Option::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum LpStakeChange<T = Amount> {
    /// Stake `amount` more LP tokens.
    Increase { amount: T },
    /// Withdraw `amount` LP tokens. `full` asks for the whole stake to be withdrawn, which is not
    /// the same as a decrease that happens to reach zero.
    Decrease { amount: T, full: bool },
}

impl<T> LpStakeChange<T> {
    pub fn amount(&self) -> &T {
        match self {
            LpStakeChange::Increase { amount } | LpStakeChange::Decrease { amount, .. } => amount,
        }
    }

    pub fn increase(&self) -> Option<&T> {
        match self {
            LpStakeChange::Increase { amount } => Some(amount),
            LpStakeChange::Decrease { .. } => None,
        }
    }

    pub fn decrease(&self) -> Option<&T> {
        match self {
            LpStakeChange::Decrease { amount, .. } => Some(amount),
            LpStakeChange::Increase { .. } => None,
        }
    }

    pub fn is_full_withdrawal(&self) -> bool {
        matches!(self, LpStakeChange::Decrease { full: true, .. })
    }

    /// Converts the amount carried by the change, keeping its direction.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LpStakeChange<U> {
        match self {
            LpStakeChange::Increase { amount } => LpStakeChange::Increase { amount: f(amount) },
            LpStakeChange::Decrease { amount, full } => LpStakeChange::Decrease {
                amount: f(amount),
                full,
            },
        }
    }
}

/// A user's LP stake and the reward accrued since it was last modified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LpStake {
    /// The amount of LP tokens that are staked.
    staked_amount: Amount,
    /// The reward accrued since the last modification of the stake.
    accrued_reward: Amount,
}

impl LpStake {
    pub fn new(staked_amount: Amount, accrued_reward: Amount) -> Self {
        LpStake {
            staked_amount,
            accrued_reward,
        }
    }

    pub fn staked_amount(&self) -> Amount {
        self.staked_amount
    }

    pub fn accrued_reward(&self) -> Amount {
        self.accrued_reward
    }

    pub fn is_empty(&self) -> bool {
        self.staked_amount == Amount::ZERO && self.accrued_reward == Amount::ZERO
    }

    /// Calculates the change that turns this stake into one of `target` staked tokens.
    ///
    /// Returns `None` if the staked amounts are equal.
    pub fn diff(&self, target: Amount) -> Option<LpStakeChange> {
        if target < self.staked_amount {
            Some(LpStakeChange::Decrease {
                amount: self.staked_amount.saturating_sub(target),
                full: target == Amount::ZERO,
            })
        } else if target > self.staked_amount {
            Some(LpStakeChange::Increase {
                amount: target.saturating_sub(self.staked_amount),
            })
        } else {
            None
        }
    }

    /// Applies `change` to this stake and returns the resulting staked amount.
    ///
    /// A decrease larger than the stake saturates at zero.
    pub fn apply(&self, change: Option<&LpStakeChange>) -> Amount {
        match change {
            None => self.staked_amount,
            Some(LpStakeChange::Decrease { amount, full }) => {
                if *full || self.staked_amount <= *amount {
                    Amount::ZERO
                } else {
                    self.staked_amount.saturating_sub(*amount)
                }
            }
            Some(LpStakeChange::Increase { amount }) => self.staked_amount.saturating_add(*amount),
        }
    }
}

impl fmt::Display for LpStake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ staked_amount: {}, accrued_reward: {} }}",
            self.staked_amount, self.accrued_reward
        )
    }
}

#[cfg(test)]
mod tests {
    use linera_sdk::linera_base_types::Amount;
    use proptest::prelude::*;

    use super::{LpStake, LpStakeChange};

    fn tokens(n: u128) -> Amount {
        Amount::from_tokens(n)
    }

    fn attos() -> impl Strategy<Value = Amount> {
        any::<u64>().prop_map(|n| Amount::from_attos(u128::from(n)))
    }

    #[test]
    fn emptiness() {
        assert!(LpStake::default().is_empty());
        assert!(LpStake::new(Amount::ZERO, Amount::ZERO).is_empty());
        assert!(!LpStake::new(tokens(1), Amount::ZERO).is_empty());
        assert!(!LpStake::new(Amount::ZERO, tokens(1)).is_empty());
    }

    #[test]
    fn diff_directions() {
        let stake = LpStake::new(tokens(100), tokens(5));

        assert_eq!(stake.diff(tokens(100)), None);
        assert_eq!(stake.diff(tokens(150)), Some(LpStakeChange::Increase { amount: tokens(50) }));
        assert_eq!(
            stake.diff(tokens(40)),
            Some(LpStakeChange::Decrease {
                amount: tokens(60),
                full: false
            })
        );
        assert_eq!(
            stake.diff(Amount::ZERO),
            Some(LpStakeChange::Decrease {
                amount: tokens(100),
                full: true
            })
        );
    }

    #[test]
    fn full_withdrawal_wins_over_amount() {
        let stake = LpStake::new(tokens(100), Amount::ZERO);
        let change = LpStakeChange::Decrease {
            amount: tokens(1),
            full: true,
        };

        assert_eq!(stake.apply(Some(&change)), Amount::ZERO);
    }

    #[test]
    fn oversized_decrease_saturates() {
        let stake = LpStake::new(tokens(100), Amount::ZERO);
        let change = LpStakeChange::Decrease {
            amount: tokens(101),
            full: false,
        };

        assert_eq!(stake.apply(Some(&change)), Amount::ZERO);
    }

    #[test]
    fn reward_update_keeps_edit() {
        let before = LpStake::new(tokens(100), tokens(5));
        let change = before.diff(tokens(150));
        assert_eq!(change, Some(LpStakeChange::Increase { amount: tokens(50) }));

        let after = LpStake::new(tokens(100), tokens(8));
        assert_eq!(after.apply(change.as_ref()), tokens(150));
    }

    #[test]
    fn withdraw_all_survives_any_snapshot() {
        let before = LpStake::new(tokens(100), tokens(5));
        let change = before.diff(Amount::ZERO);
        assert_eq!(
            change,
            Some(LpStakeChange::Decrease {
                amount: tokens(100),
                full: true
            })
        );

        for staked in [0, 40, 100, 250] {
            let after = LpStake::new(tokens(staked), tokens(9));
            assert_eq!(after.apply(change.as_ref()), Amount::ZERO);
        }
    }

    #[test]
    fn change_accessors() {
        let increase = LpStakeChange::Increase { amount: 7_u64 };
        assert_eq!(increase.increase(), Some(&7));
        assert_eq!(increase.decrease(), None);
        assert!(!increase.is_full_withdrawal());

        let decrease = LpStakeChange::Decrease { amount: 3_u64, full: true }.map(|n| n * 2);
        assert_eq!(decrease.amount(), &6);
        assert!(decrease.is_full_withdrawal());
    }

    #[test]
    fn display() {
        let stake = LpStake::new(tokens(2), Amount::ZERO);
        assert_eq!(
            stake.to_string(),
            format!("{{ staked_amount: {}, accrued_reward: {} }}", tokens(2), Amount::ZERO)
        );
    }

    proptest! {
        #[test]
        fn apply_inverts_diff(staked in attos(), reward in attos(), target in attos()) {
            let stake = LpStake::new(staked, reward);
            prop_assert_eq!(stake.apply(stake.diff(target).as_ref()), target);
        }

        #[test]
        fn diff_to_self_is_none(staked in attos(), reward in attos()) {
            let stake = LpStake::new(staked, reward);
            prop_assert_eq!(stake.diff(stake.staked_amount()), None);
        }

        #[test]
        fn decrease_never_goes_below_zero(staked in attos(), extra in 1..u64::MAX) {
            let stake = LpStake::new(staked, Amount::ZERO);
            let change = LpStakeChange::Decrease {
                amount: staked.saturating_add(Amount::from_attos(u128::from(extra))),
                full: false,
            };
            prop_assert_eq!(stake.apply(Some(&change)), Amount::ZERO);
        }
    }
}
