// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! The daily workforce state machine and payout engine.
//!
//! Operator actions are expressed as [`Command`]s and applied with
//! [`apply`], which never mutates its input. The day boundary is handled
//! separately by [`rollover`]. Payout figures come from the pure functions
//! in this crate's payout calculator.

mod apply;
mod assignment;
mod attendance;
mod board;
mod clock;
mod command;
mod commission;
mod error;
mod payout;
mod pipeline;
mod rollover;
mod state;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use assignment::{ManagerChoice, assignable_route_managers};
pub use attendance::count_unassigned_showed;
pub use board::{BoardEntry, DailyBoard, DateGroup, daily_board};
pub use clock::{Clock, FixedClock, SystemClock};
pub use command::{Command, ConfirmationCall, PayoutEntry, SinkTarget};
pub use commission::{
    CommissionInput, CommissionStrategy, NoCommission, OperatorEnteredCommission, SalesUnit,
};
pub use error::CoreError;
pub use payout::{
    DOLLARS_PER_EQUIVALENT, PayoutQuote, SalesSummary, equivalents, net_for_booking, quote_cart,
    quote_worker, round_money, summarize_sales,
};
pub use rollover::{
    RolledOver, RolloverOutcome, RolloverReport, WorkerDayClose, classify_day_close, rollover,
};
pub use state::{FollowUp, Roster, TransitionResult};
