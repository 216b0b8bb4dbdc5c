// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::CalendarDay;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount taken off a worker's payout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    pub id: u32,
    pub name: String,
    pub amount: Decimal,
}

/// An amount added to a worker's payout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: Decimal,
}

/// Figures written when a payout is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PayoutFigures {
    pub gross_sales: Decimal,
    pub equivalent: Decimal,
    pub commission: Decimal,
    #[serde(default)]
    pub deductions: Vec<Deduction>,
    #[serde(default)]
    pub bonuses: Vec<Bonus>,
}

impl PayoutFigures {
    /// Commission plus bonuses minus deductions.
    #[must_use]
    pub fn take_home(&self) -> Decimal {
        let bonuses: Decimal = self.bonuses.iter().map(|b| b.amount).sum();
        let deductions: Decimal = self.deductions.iter().map(|d| d.amount).sum();
        self.commission + bonuses - deductions
    }
}

/// The worker's most recent completed payout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PayoutSnapshot {
    /// Day the snapshot was completed for; `None` if never completed.
    pub date: Option<CalendarDay>,
    #[serde(flatten)]
    pub figures: PayoutFigures,
}

impl PayoutSnapshot {
    /// Returns true if a payout has ever been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.date.is_some()
    }

    /// Returns true if the payout was completed for `day`.
    #[must_use]
    pub fn completed_on(&self, day: CalendarDay) -> bool {
        self.date == Some(day)
    }
}

/// One day's entry in a worker's payout ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRecord {
    pub date: CalendarDay,
    #[serde(flatten)]
    pub figures: PayoutFigures,
}
