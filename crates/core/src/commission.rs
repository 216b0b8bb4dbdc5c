// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Commission strategies.
//!
//! The raise schedules behind the base rates are season policy and are not
//! computed here. A strategy receives everything the calculator knows about
//! a payout and returns the commission amount.

use doorbook_domain::{PayoutLogicSettings, Tenure};
use rust_decimal::Decimal;

/// The kind of sales unit a payout is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesUnit {
    /// A worker on an Individual or Service route.
    Individual,
    /// A Team cart with one member.
    SoloCart,
    /// A Team cart with several members.
    TeamCart,
}

impl SalesUnit {
    /// Picks the unit kind for a cart with `members` members.
    #[must_use]
    pub const fn for_cart(members: usize) -> Self {
        if members > 1 {
            Self::TeamCart
        } else {
            Self::SoloCart
        }
    }

    /// Returns the base commission rate the settings assign to this unit.
    #[must_use]
    pub const fn base_rate(&self, settings: &PayoutLogicSettings) -> Decimal {
        match self {
            Self::Individual => settings.base_commission_rate,
            Self::SoloCart => settings.solo_base_commission_rate,
            Self::TeamCart => settings.team_base_commission_rate,
        }
    }
}

/// Inputs available to a commission strategy for one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommissionInput {
    /// The worker's share of equivalents.
    pub equivalents: Decimal,
    /// Net sales of the whole unit.
    pub net_sales: Decimal,
    /// The worker's share of gross sales.
    pub gross_sales: Decimal,
    pub unit: SalesUnit,
    pub base_rate: Decimal,
    pub apply_silver_raises: bool,
    pub apply_alumni_raises: bool,
    pub tenure: Tenure,
    /// Days worked across all seasons, including today.
    pub total_days_worked: u32,
}

/// Computes a worker's commission.
pub trait CommissionStrategy {
    /// Returns the commission for one worker.
    fn commission(&self, input: &CommissionInput) -> Decimal;
}

/// Commission keyed in by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorEnteredCommission {
    amount: Decimal,
}

impl OperatorEnteredCommission {
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self { amount }
    }
}

impl CommissionStrategy for OperatorEnteredCommission {
    fn commission(&self, _input: &CommissionInput) -> Decimal {
        self.amount
    }
}

/// Always zero. Used for previews before the operator enters an amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoCommission;

impl CommissionStrategy for NoCommission {
    fn commission(&self, _input: &CommissionInput) -> Decimal {
        Decimal::ZERO
    }
}

impl<S: CommissionStrategy + ?Sized> CommissionStrategy for &S {
    fn commission(&self, input: &CommissionInput) -> Decimal {
        (**self).commission(input)
    }
}
