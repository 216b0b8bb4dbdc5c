// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Advancing the roster across a calendar-day boundary.
//!
//! Rollover is a pure function of the roster, the last processed day and
//! today. Archiving the previous day's store keys is left to the caller,
//! which learns from the outcome whether a boundary was crossed.

use crate::state::Roster;
use doorbook_domain::{
    Assignment, AttendanceToday, BookingStatus, CalendarDay, DayClose, Worker, WorkerNumber,
};
use doorbook_events::{Action, ChangeEvent};
use serde::Serialize;
use tracing::{info, warn};

/// What a rollover run decided to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolloverOutcome {
    /// No day had been processed yet. Nothing is reset.
    FirstRun {
        /// The day to record as processed.
        today: CalendarDay,
    },
    /// Today was already processed.
    AlreadyCurrent {
        /// The current operating day.
        today: CalendarDay,
    },
    /// The clock reads earlier than the last processed day. Nothing is reset.
    ClockBehind {
        last_processed: CalendarDay,
        today: CalendarDay,
    },
    /// The roster was advanced to a new day.
    Advanced(Box<RolledOver>),
}

impl RolloverOutcome {
    /// Returns the day to record as last processed, if it should change.
    #[must_use]
    pub fn marker(&self) -> Option<CalendarDay> {
        match self {
            Self::FirstRun { today } => Some(*today),
            Self::Advanced(rolled) => Some(rolled.report.new_day),
            Self::AlreadyCurrent { .. } | Self::ClockBehind { .. } => None,
        }
    }
}

/// The advanced roster and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolledOver {
    pub new_roster: Roster,
    pub report: RolloverReport,
}

/// How one worker's previous operating day closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerDayClose {
    pub worker_number: WorkerNumber,
    pub close: DayClose,
}

/// A summary of one rollover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolloverReport {
    /// The last processed day, whose records the caller archives.
    pub previous_day: CalendarDay,
    pub new_day: CalendarDay,
    /// Workers who became due on the new day.
    pub promoted: Vec<WorkerNumber>,
    /// Workers whose booking ended and who are now unbooked.
    pub released: Vec<WorkerNumber>,
    /// Day-close classification for every worker that had a day to close.
    pub day_closes: Vec<WorkerDayClose>,
    /// Workers who were due on the previous day, never showed, and were
    /// never finalized.
    pub lapsed: Vec<WorkerNumber>,
    /// Whether the previous day's attendance was finalized.
    pub attendance_was_finalized: bool,
    /// The change event recording the rollover.
    pub event: ChangeEvent,
}

/// Classifies how a worker's `previous_day` closed.
///
/// Returns `None` for workers with nothing to close: not due, not showed
/// and not a no-show.
#[must_use]
pub fn classify_day_close(worker: &Worker, previous_day: CalendarDay) -> Option<DayClose> {
    if worker.showed_on(previous_day) {
        Some(DayClose::Worked)
    } else if worker.booking_status == BookingStatus::NoShow {
        Some(DayClose::NoShow)
    } else if worker.is_due_on(previous_day) {
        Some(DayClose::Lapsed)
    } else {
        None
    }
}

/// Runs the daily rollover.
///
/// Running again with the same `today` does nothing, as does a clock that
/// reads earlier than `last_processed`. Sink workers are never touched.
/// Every other worker has the booking table applied, attendance and
/// assignment cleared, and `last_day_close` rewritten. Confirmation calls
/// survive.
#[must_use]
pub fn rollover(
    roster: &Roster,
    last_processed: Option<CalendarDay>,
    today: CalendarDay,
) -> RolloverOutcome {
    let Some(previous_day) = last_processed else {
        info!(%today, "First run; recording operating day without reset");
        return RolloverOutcome::FirstRun { today };
    };

    if previous_day == today {
        return RolloverOutcome::AlreadyCurrent { today };
    }
    if today < previous_day {
        warn!(
            last_processed = %previous_day,
            %today,
            "Clock is behind the last processed day; skipping rollover"
        );
        return RolloverOutcome::ClockBehind {
            last_processed: previous_day,
            today,
        };
    }

    info!(from = %previous_day, to = %today, "New day detected; rolling over");

    let mut new_roster: Roster = roster.clone();
    let mut promoted: Vec<WorkerNumber> = Vec::new();
    let mut released: Vec<WorkerNumber> = Vec::new();
    let mut day_closes: Vec<WorkerDayClose> = Vec::new();
    let mut lapsed: Vec<WorkerNumber> = Vec::new();

    for worker in &mut new_roster.workers {
        if worker.booking_status.is_sink() {
            continue;
        }

        let close: Option<DayClose> = classify_day_close(worker, previous_day);
        if let Some(close) = close {
            day_closes.push(WorkerDayClose {
                worker_number: worker.worker_number.clone(),
                close,
            });
        }
        if close == Some(DayClose::Lapsed) {
            warn!(
                worker = %worker.worker_number,
                day = %previous_day,
                "Worker was due but never showed and the day was never finalized"
            );
            lapsed.push(worker.worker_number.clone());
        }
        worker.last_day_close = close;

        let before: BookingStatus = worker.booking_status;
        let after: BookingStatus = before.rolled_over(today);
        if after != before {
            if after.is_due_on(today) {
                promoted.push(worker.worker_number.clone());
            } else if after == BookingStatus::Unbooked {
                released.push(worker.worker_number.clone());
            }
        }
        worker.booking_status = after;
        worker.attendance = AttendanceToday::NotShown;
        worker.assignment = Assignment::Unassigned;
    }

    let attendance_was_finalized: bool = roster.finalized_on.is_some();
    new_roster.finalized_on = None;

    let affected: Vec<WorkerNumber> = day_closes
        .iter()
        .map(|c| c.worker_number.clone())
        .chain(promoted.iter().cloned())
        .chain(released.iter().cloned())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();

    let details: String = format!(
        "Rolled over from {previous_day} to {today}: {} promoted, {} released, {} lapsed",
        promoted.len(),
        released.len(),
        lapsed.len()
    );
    let event: ChangeEvent = ChangeEvent::roster_changed(
        Action::new(String::from("DailyRollover"), Some(details)),
        today,
        affected,
    );

    info!(
        promoted = promoted.len(),
        released = released.len(),
        lapsed = lapsed.len(),
        attendance_was_finalized,
        "Rollover complete"
    );

    RolloverOutcome::Advanced(Box::new(RolledOver {
        new_roster,
        report: RolloverReport {
            previous_day,
            new_day: today,
            promoted,
            released,
            day_closes,
            lapsed,
            attendance_was_finalized,
            event,
        },
    }))
}
