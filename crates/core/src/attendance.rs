// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The daily attendance lock.

use crate::apply::Applied;
use crate::error::CoreError;
use crate::state::Roster;
use doorbook_domain::{Assignment, BookingStatus, CalendarDay, WorkerNumber};
use tracing::{debug, info};

/// Counts workers who showed on `today` but have no route manager or cart.
#[must_use]
pub fn count_unassigned_showed(roster: &Roster, today: CalendarDay) -> usize {
    roster
        .showed_on(today)
        .filter(|w| !w.assignment.is_assigned())
        .count()
}

/// Locks today's attendance.
///
/// Fails without touching the roster if any showed worker is unassigned.
/// Otherwise every worker due today who did not show becomes a no-show.
/// Finalizing an already finalized day changes nothing.
pub(crate) fn finalize(roster: &mut Roster, today: CalendarDay) -> Result<Applied, CoreError> {
    if roster.is_finalized_on(today) {
        debug!(%today, "Attendance already finalized");
        return Ok(Applied::unchanged());
    }

    let unassigned: usize = count_unassigned_showed(roster, today);
    if unassigned > 0 {
        return Err(CoreError::UnassignedWorkers { count: unassigned });
    }

    let mut no_shows: Vec<WorkerNumber> = Vec::new();
    for worker in &mut roster.workers {
        if worker.is_due_on(today) && !worker.showed_on(today) {
            worker.booking_status = BookingStatus::NoShow;
            worker.no_shows = worker.no_shows.saturating_add(1);
            worker.assignment = Assignment::Unassigned;
            no_shows.push(worker.worker_number.clone());
        }
    }
    roster.finalized_on = Some(today);

    info!(%today, no_shows = no_shows.len(), "Finalized attendance");

    Ok(Applied::changed(
        format!(
            "Finalized attendance for {today}; {} no-show(s)",
            no_shows.len()
        ),
        no_shows,
    ))
}

/// Unlocks today's attendance.
///
/// No-show conversions made by the earlier finalize are kept.
pub(crate) fn modify(roster: &mut Roster, today: CalendarDay) -> Applied {
    if !roster.is_finalized_on(today) {
        debug!(%today, "Attendance not finalized; nothing to reopen");
        return Applied::unchanged();
    }

    roster.finalized_on = None;
    info!(%today, "Reopened attendance");

    Applied::changed(format!("Reopened attendance for {today}"), Vec::new())
}
