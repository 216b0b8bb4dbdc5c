// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-season payout configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The payment-method categories net sales are computed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaymentMethodKey {
    Cash,
    Cheque,
    ETransfer,
    CreditCard,
    Prepaid,
    Billed,
    Ios,
    Custom,
}

impl PaymentMethodKey {
    /// Every key, in settings-table order.
    pub const ALL: [Self; 8] = [
        Self::Cash,
        Self::Cheque,
        Self::ETransfer,
        Self::CreditCard,
        Self::Prepaid,
        Self::Billed,
        Self::Ios,
        Self::Custom,
    ];

    /// Returns the label used as the key in the settings table.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Cheque => "Cheque",
            Self::ETransfer => "E-Transfer",
            Self::CreditCard => "Credit Card",
            Self::Prepaid => "Prepaid",
            Self::Billed => "Billed",
            Self::Ios => "IOS",
            Self::Custom => "Custom",
        }
    }

    /// Resolves the key for a booking.
    ///
    /// The prepaid flag wins. Otherwise the free-text payment method is
    /// matched case-insensitively by substring, in a fixed order, and
    /// anything unmatched is `Custom`.
    #[must_use]
    pub fn resolve(prepaid: bool, payment_method: &str) -> Self {
        if prepaid {
            return Self::Prepaid;
        }

        let method: String = payment_method.to_lowercase();
        [
            ("cash", Self::Cash),
            ("cheque", Self::Cheque),
            ("transfer", Self::ETransfer),
            ("credit", Self::CreditCard),
            ("billed", Self::Billed),
            ("ios", Self::Ios),
        ]
        .into_iter()
        .find(|(needle, _)| method.contains(needle))
        .map_or(Self::Custom, |(_, key)| key)
    }
}

impl std::fmt::Display for PaymentMethodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How much of a sale under one payment method counts toward net sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodRule {
    /// Percentage of the price that counts (0-100).
    pub percentage: Decimal,
    /// Whether tax is divided out after applying the percentage.
    pub apply_taxes: bool,
}

impl MethodRule {
    #[must_use]
    pub const fn new(percentage: Decimal, apply_taxes: bool) -> Self {
        Self {
            percentage,
            apply_taxes,
        }
    }
}

/// Payout configuration for one season.
///
/// Field names follow the console-profile JSON documents these settings are
/// loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutLogicSettings {
    /// Sales tax percentage.
    pub tax_rate: Decimal,
    /// Percentage of Team net sales retained as product cost.
    #[serde(default)]
    pub product_cost: Decimal,
    #[serde(default = "default_base_rate")]
    pub base_commission_rate: Decimal,
    #[serde(default = "default_solo_rate")]
    pub solo_base_commission_rate: Decimal,
    #[serde(default = "default_team_rate")]
    pub team_base_commission_rate: Decimal,
    pub apply_silver_raises: bool,
    pub apply_alumni_raises: bool,
    /// Keyed by `PaymentMethodKey::label`.
    pub payment_method_percentages: BTreeMap<String, MethodRule>,
}

const fn default_base_rate() -> Decimal {
    Decimal::from_parts(80, 0, 0, false, 1)
}

const fn default_solo_rate() -> Decimal {
    Decimal::from_parts(60, 0, 0, false, 1)
}

const fn default_team_rate() -> Decimal {
    Decimal::from_parts(80, 0, 0, false, 1)
}

impl PayoutLogicSettings {
    /// Returns the rule configured for `key`, if any.
    #[must_use]
    pub fn method_rule(&self, key: PaymentMethodKey) -> Option<&MethodRule> {
        self.payment_method_percentages.get(key.label())
    }

    /// Sets the rule for `key`, replacing any existing one.
    pub fn set_method_rule(&mut self, key: PaymentMethodKey, rule: MethodRule) {
        self.payment_method_percentages
            .insert(key.label().to_string(), rule);
    }
}

impl Default for PayoutLogicSettings {
    /// Settings used for seasons that have no payout logic configured.
    fn default() -> Self {
        let full: MethodRule = MethodRule::new(Decimal::ONE_HUNDRED, true);
        let half: MethodRule = MethodRule::new(Decimal::from(50), true);

        let payment_method_percentages: BTreeMap<String, MethodRule> = PaymentMethodKey::ALL
            .into_iter()
            .map(|key| {
                let rule: MethodRule = match key {
                    PaymentMethodKey::Prepaid
                    | PaymentMethodKey::Billed
                    | PaymentMethodKey::Ios => half,
                    PaymentMethodKey::Cash
                    | PaymentMethodKey::Cheque
                    | PaymentMethodKey::ETransfer
                    | PaymentMethodKey::CreditCard
                    | PaymentMethodKey::Custom => full,
                };
                (key.label().to_string(), rule)
            })
            .collect();

        Self {
            tax_rate: Decimal::from(13),
            product_cost: Decimal::ZERO,
            base_commission_rate: default_base_rate(),
            solo_base_commission_rate: default_solo_rate(),
            team_base_commission_rate: default_team_rate(),
            apply_silver_raises: true,
            apply_alumni_raises: true,
            payment_method_percentages,
        }
    }
}
