// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator transitions over a worker's booking pipeline.

use crate::apply::Applied;
use crate::command::{ConfirmationCall, SinkTarget};
use crate::error::CoreError;
use crate::state::{FollowUp, Roster};
use doorbook_domain::{AttendanceToday, BookingStatus, CalendarDay, WillCallReason, WorkerNumber};
use std::collections::HashSet;
use tracing::debug;

impl SinkTarget {
    /// The booking status this target produces.
    #[must_use]
    pub const fn status(self) -> BookingStatus {
        match self {
            Self::WillCall(sub_status) => BookingStatus::WdrTnb { sub_status },
            Self::Terminated(sub_status) => BookingStatus::QuitFired { sub_status },
        }
    }
}

/// Marks a worker as showed today.
///
/// Accepted for workers due today, and as a no-op for workers who already
/// showed today. `days_worked` moves at most once per day.
pub(crate) fn mark_showed(
    roster: &mut Roster,
    worker_number: &WorkerNumber,
    today: CalendarDay,
) -> Result<Applied, CoreError> {
    let earliest: CalendarDay = today.next_day()?;
    let worker = roster.worker_mut(worker_number)?;

    let follow_up = FollowUp::ChooseNextBooking {
        worker_number: worker_number.clone(),
        earliest,
    };

    if worker.showed_on(today) {
        debug!(worker = %worker_number, %today, "Worker already marked showed");
        return Ok(Applied::unchanged().with_follow_up(follow_up));
    }

    if !worker.is_due_on(today) {
        return Err(CoreError::NotDueToday {
            worker_number: worker_number.clone(),
            date: today,
        });
    }

    worker.attendance = AttendanceToday::Showed { date: today };
    worker.days_worked = worker.days_worked.saturating_add(1);

    Ok(Applied::changed(
        format!(
            "Marked '{worker_number}' showed on {today} (days worked: {})",
            worker.days_worked
        ),
        vec![worker_number.clone()],
    )
    .with_follow_up(follow_up))
}

/// Books workers for a future date.
pub(crate) fn move_to_date(
    roster: &mut Roster,
    worker_numbers: &[WorkerNumber],
    date: CalendarDay,
    today: CalendarDay,
) -> Result<Applied, CoreError> {
    let target = BookingStatus::Calendar { booked_date: date };
    let affected: Vec<WorkerNumber> = set_status(roster, worker_numbers, target, today)?;

    Ok(Applied::changed(
        format!("Booked {} worker(s) for {date}", affected.len()),
        affected,
    ))
}

/// Moves workers into a sink state.
pub(crate) fn move_to_sink(
    roster: &mut Roster,
    worker_numbers: &[WorkerNumber],
    target: SinkTarget,
    today: CalendarDay,
) -> Result<Applied, CoreError> {
    let status: BookingStatus = target.status();
    let affected: Vec<WorkerNumber> = set_status(roster, worker_numbers, status, today)?;

    Ok(Applied::changed(
        format!("Moved {} worker(s) to {status}", affected.len()),
        affected,
    ))
}

/// Moves a single worker to will-call (WDR).
pub(crate) fn mark_will_call(
    roster: &mut Roster,
    worker_number: &WorkerNumber,
    today: CalendarDay,
) -> Result<Applied, CoreError> {
    move_to_sink(
        roster,
        std::slice::from_ref(worker_number),
        SinkTarget::WillCall(WillCallReason::Wdr),
        today,
    )
}

/// Validates every worker first, then writes the new status to all of them.
fn set_status(
    roster: &mut Roster,
    worker_numbers: &[WorkerNumber],
    target: BookingStatus,
    today: CalendarDay,
) -> Result<Vec<WorkerNumber>, CoreError> {
    if worker_numbers.is_empty() {
        return Err(CoreError::EmptySelection);
    }

    let mut seen: HashSet<&WorkerNumber> = HashSet::with_capacity(worker_numbers.len());
    let mut selected: Vec<WorkerNumber> = Vec::with_capacity(worker_numbers.len());
    for number in worker_numbers {
        if !seen.insert(number) {
            continue;
        }
        let worker = roster
            .worker(number)
            .ok_or_else(|| CoreError::WorkerNotFound(number.clone()))?;
        worker
            .booking_status
            .validate_operator_transition(target, today)?;
        selected.push(number.clone());
    }

    for number in &selected {
        let worker = roster.worker_mut(number)?;
        worker.booking_status = target;
    }

    Ok(selected)
}

/// Records a confirmation call for a worker booked on the next operating day.
pub(crate) fn record_confirmation(
    roster: &mut Roster,
    worker_number: &WorkerNumber,
    call: ConfirmationCall,
    today: CalendarDay,
) -> Result<Applied, CoreError> {
    let worker = roster.worker_mut(worker_number)?;

    if !worker.booking_status.is_booked_for_next_day(today)? {
        return Err(CoreError::NotBookedForNextDay(worker_number.clone()));
    }

    let confirmation = &mut worker.confirmation;
    let details: String = match call {
        ConfirmationCall::ToggleConfirmed => {
            confirmation.confirmed = !confirmation.confirmed;
            format!(
                "Set '{worker_number}' confirmed = {}",
                confirmation.confirmed
            )
        }
        ConfirmationCall::LeftMessage => {
            confirmation.left_message = confirmation.left_message.saturating_add(1);
            format!(
                "Left message for '{worker_number}' ({} total)",
                confirmation.left_message
            )
        }
        ConfirmationCall::NotAvailable => {
            confirmation.not_available = confirmation.not_available.saturating_add(1);
            format!(
                "'{worker_number}' not available ({} total)",
                confirmation.not_available
            )
        }
    };

    Ok(Applied::changed(details, vec![worker_number.clone()]))
}
