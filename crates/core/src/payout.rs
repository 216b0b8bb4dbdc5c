// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Converting completed sales into net sales, equivalents and commission.
//!
//! All amounts are kept at full precision until a quote is turned into
//! payout figures, where they are rounded to cents.

use crate::apply::Applied;
use crate::command::PayoutEntry;
use crate::commission::{CommissionInput, CommissionStrategy, SalesUnit};
use crate::error::CoreError;
use crate::state::Roster;
use doorbook_domain::{
    Bonus, Booking, CalendarDay, Deduction, PayoutFigures, PayoutLogicSettings, PayoutRecord,
    PayoutSnapshot, SeasonType, Worker, WorkerNumber,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::{debug, info};

/// Adjusted net sales per equivalent.
pub const DOLLARS_PER_EQUIVALENT: Decimal = Decimal::from_parts(25, 0, 0, false, 0);

/// Rounds a money amount to cents, halves away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// Division by zero only happens with a -100% tax rate; treat that as no sale.
fn divide(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Net sales a single booking contributes.
///
/// The booking's payment method selects a rule from the settings. Without a
/// matching rule only tax is divided out.
#[must_use]
pub fn net_for_booking(booking: &Booking, settings: &PayoutLogicSettings) -> Decimal {
    let tax_divisor: Decimal = Decimal::ONE + settings.tax_rate / Decimal::ONE_HUNDRED;

    match settings.method_rule(booking.method_key()) {
        None => {
            debug!(
                booking = %booking.booking_id,
                method = %booking.method_key(),
                "No payout rule for payment method; dividing out tax only"
            );
            divide(booking.price, tax_divisor)
        }
        Some(rule) => {
            let counted: Decimal = booking.price * rule.percentage / Decimal::ONE_HUNDRED;
            if rule.apply_taxes {
                divide(counted, tax_divisor)
            } else {
                counted
            }
        }
    }
}

/// Equivalents for a net sales total; zero unless the total is positive.
#[must_use]
pub fn equivalents(net_sales: Decimal) -> Decimal {
    if net_sales > Decimal::ZERO {
        net_sales / DOLLARS_PER_EQUIVALENT
    } else {
        Decimal::ZERO
    }
}

/// Aggregated sales for one worker or one cart on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    /// Number of completed bookings counted.
    pub steps: usize,
    pub gross_sales: Decimal,
    /// Net sales after method, tax and (Team only) product-cost adjustments.
    pub net_sales: Decimal,
    pub equivalent: Decimal,
}

impl SalesSummary {
    /// Mean price of the counted bookings.
    #[must_use]
    pub fn average_price(&self) -> Decimal {
        if self.steps == 0 {
            return Decimal::ZERO;
        }
        self.gross_sales / Decimal::from(self.steps)
    }
}

/// Aggregates the completed sales credited to `workers` on `day`.
///
/// In Team seasons the product cost is taken off the aggregate net once.
#[must_use]
pub fn summarize_sales(
    bookings: &[Booking],
    workers: &[WorkerNumber],
    day: CalendarDay,
    settings: &PayoutLogicSettings,
    season_type: SeasonType,
) -> SalesSummary {
    let counted: Vec<&Booking> = bookings
        .iter()
        .filter(|b| workers.iter().any(|w| b.is_completed_sale_for(w, day)))
        .collect();

    let gross_sales: Decimal = counted.iter().map(|b| b.price).sum();
    let mut net_sales: Decimal = counted
        .iter()
        .map(|b| net_for_booking(b, settings))
        .sum();

    if season_type.uses_carts() {
        net_sales *= Decimal::ONE - settings.product_cost / Decimal::ONE_HUNDRED;
    }

    SalesSummary {
        steps: counted.len(),
        gross_sales,
        net_sales,
        equivalent: equivalents(net_sales),
    }
}

/// A computed, not yet completed, payout for one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayoutQuote {
    pub worker_number: WorkerNumber,
    pub gross_sales: Decimal,
    pub equivalent: Decimal,
    pub commission: Decimal,
}

impl PayoutQuote {
    /// Rounds the quote into payout figures with the given adjustments.
    #[must_use]
    pub fn into_figures(self, deductions: Vec<Deduction>, bonuses: Vec<Bonus>) -> PayoutFigures {
        PayoutFigures {
            gross_sales: round_money(self.gross_sales),
            equivalent: round_money(self.equivalent),
            commission: round_money(self.commission),
            deductions,
            bonuses,
        }
    }
}

fn commission_input(
    worker: &Worker,
    summary: &SalesSummary,
    gross_share: Decimal,
    equivalent_share: Decimal,
    unit: SalesUnit,
    settings: &PayoutLogicSettings,
) -> CommissionInput {
    CommissionInput {
        equivalents: equivalent_share,
        net_sales: summary.net_sales,
        gross_sales: gross_share,
        unit,
        base_rate: unit.base_rate(settings),
        apply_silver_raises: settings.apply_silver_raises,
        apply_alumni_raises: settings.apply_alumni_raises,
        tenure: worker.tenure,
        total_days_worked: worker.total_days_worked(),
    }
}

/// Quotes a payout for one worker outside any cart.
#[must_use]
pub fn quote_worker<S: CommissionStrategy + ?Sized>(
    bookings: &[Booking],
    worker: &Worker,
    day: CalendarDay,
    settings: &PayoutLogicSettings,
    season_type: SeasonType,
    strategy: &S,
) -> PayoutQuote {
    let summary: SalesSummary = summarize_sales(
        bookings,
        std::slice::from_ref(&worker.worker_number),
        day,
        settings,
        season_type,
    );
    let unit: SalesUnit = if season_type.uses_carts() {
        SalesUnit::SoloCart
    } else {
        SalesUnit::Individual
    };
    let input: CommissionInput = commission_input(
        worker,
        &summary,
        summary.gross_sales,
        summary.equivalent,
        unit,
        settings,
    );

    PayoutQuote {
        worker_number: worker.worker_number.clone(),
        gross_sales: summary.gross_sales,
        equivalent: summary.equivalent,
        commission: strategy.commission(&input),
    }
}

/// Quotes payouts for every member of a Team cart.
///
/// Sales are aggregated over the whole cart, product cost is applied once,
/// and gross and equivalents are split evenly. Each member's commission is
/// computed with that member's own tenure.
#[must_use]
pub fn quote_cart<S: CommissionStrategy + ?Sized>(
    bookings: &[Booking],
    members: &[&Worker],
    day: CalendarDay,
    settings: &PayoutLogicSettings,
    strategy: &S,
) -> Vec<PayoutQuote> {
    if members.is_empty() {
        return Vec::new();
    }

    let numbers: Vec<WorkerNumber> = members.iter().map(|w| w.worker_number.clone()).collect();
    let summary: SalesSummary =
        summarize_sales(bookings, &numbers, day, settings, SeasonType::Team);
    let unit: SalesUnit = SalesUnit::for_cart(members.len());
    let count: Decimal = Decimal::from(members.len());
    let gross_share: Decimal = summary.gross_sales / count;
    let equivalent_share: Decimal = summary.equivalent / count;

    members
        .iter()
        .map(|worker| {
            let input: CommissionInput = commission_input(
                worker,
                &summary,
                gross_share,
                equivalent_share,
                unit,
                settings,
            );
            PayoutQuote {
                worker_number: worker.worker_number.clone(),
                gross_sales: gross_share,
                equivalent: equivalent_share,
                commission: strategy.commission(&input),
            }
        })
        .collect()
}

/// Writes completed payouts for today.
///
/// Requires today's attendance to be finalized and every worker to have
/// showed today. Completing again for the same day overwrites both the
/// snapshot and that day's history record.
pub(crate) fn complete_payout(
    roster: &mut Roster,
    entries: Vec<PayoutEntry>,
    today: CalendarDay,
) -> Result<Applied, CoreError> {
    if entries.is_empty() {
        return Err(CoreError::EmptySelection);
    }
    if !roster.is_finalized_on(today) {
        return Err(CoreError::AttendanceNotFinalized(today));
    }

    for entry in &entries {
        let worker = roster
            .worker(&entry.worker_number)
            .ok_or_else(|| CoreError::WorkerNotFound(entry.worker_number.clone()))?;
        if !worker.showed_on(today) {
            return Err(CoreError::NotShowedToday {
                worker_number: entry.worker_number.clone(),
                date: today,
            });
        }
    }

    let mut affected: Vec<WorkerNumber> = Vec::with_capacity(entries.len());
    for PayoutEntry {
        worker_number,
        figures,
    } in entries
    {
        let worker = roster.worker_mut(&worker_number)?;
        let overwrite: bool = worker.payout.completed_on(today);

        worker.payout = PayoutSnapshot {
            date: Some(today),
            figures: figures.clone(),
        };
        match worker
            .payout_history
            .iter_mut()
            .find(|record| record.date == today)
        {
            Some(record) => record.figures = figures,
            None => worker.payout_history.push(PayoutRecord {
                date: today,
                figures,
            }),
        }

        info!(worker = %worker_number, %today, overwrite, "Completed payout");
        affected.push(worker_number);
    }

    Ok(Applied::changed(
        format!("Completed payout for {} worker(s) on {today}", affected.len()),
        affected,
    ))
}
