// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{FollowUp, Roster, TransitionResult};
use crate::{assignment, attendance, payout, pipeline};
use doorbook_domain::{CalendarDay, WorkerNumber};
use doorbook_events::{Action, ChangeEvent};
use std::slice;

/// What a handler did to the working copy of the roster.
#[derive(Debug)]
pub(crate) struct Applied {
    /// `None` when the roster is unchanged.
    details: Option<String>,
    affected: Vec<WorkerNumber>,
    follow_up: Option<FollowUp>,
}

impl Applied {
    pub(crate) const fn changed(details: String, affected: Vec<WorkerNumber>) -> Self {
        Self {
            details: Some(details),
            affected,
            follow_up: None,
        }
    }

    pub(crate) const fn unchanged() -> Self {
        Self {
            details: None,
            affected: Vec::new(),
            follow_up: None,
        }
    }

    pub(crate) fn with_follow_up(mut self, follow_up: FollowUp) -> Self {
        self.follow_up = Some(follow_up);
        self
    }
}

/// Applies a command to the current roster, producing a new roster and change event.
///
/// The input roster is never modified; on error no new roster is produced.
///
/// # Arguments
///
/// * `roster` - The current roster (immutable)
/// * `command` - The command to apply
/// * `today` - The current operating day, sampled from the clock by the caller
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules
/// - A named worker or cart does not exist
/// - The command changes attendance while today's attendance is finalized
pub fn apply(
    roster: &Roster,
    command: Command,
    today: CalendarDay,
) -> Result<TransitionResult, CoreError> {
    if command.affects_attendance() && roster.is_finalized_on(today) {
        return Err(CoreError::AttendanceFinalized(today));
    }

    let name: &'static str = command.name();
    let mut working: Roster = roster.clone();

    let applied: Applied = match command {
        Command::MarkShowed { worker_number } => {
            pipeline::mark_showed(&mut working, &worker_number, today)?
        }
        Command::Rebook {
            worker_number,
            date,
        } => pipeline::move_to_date(&mut working, slice::from_ref(&worker_number), date, today)?,
        Command::MarkWillCall { worker_number } => {
            pipeline::mark_will_call(&mut working, &worker_number, today)?
        }
        Command::MoveToSink {
            worker_numbers,
            target,
        } => pipeline::move_to_sink(&mut working, &worker_numbers, target, today)?,
        Command::MoveToDate {
            worker_numbers,
            date,
        } => pipeline::move_to_date(&mut working, &worker_numbers, date, today)?,
        Command::RecordConfirmation {
            worker_number,
            call,
        } => pipeline::record_confirmation(&mut working, &worker_number, call, today)?,
        Command::AssignRouteManager {
            worker_number,
            manager,
        } => assignment::assign_route_manager(&mut working, &worker_number, manager, today)?,
        Command::AssignCart {
            worker_number,
            cart_id,
        } => assignment::assign_cart(&mut working, &worker_number, cart_id, today)?,
        Command::ResizeCarts { count } => assignment::resize_carts(&mut working, count)?,
        Command::SetCartManager { cart_id, manager } => {
            assignment::set_cart_manager(&mut working, cart_id, manager)?
        }
        Command::FinalizeAttendance => attendance::finalize(&mut working, today)?,
        Command::ModifyAttendance => attendance::modify(&mut working, today),
        Command::CompletePayout { entries } => {
            payout::complete_payout(&mut working, entries, today)?
        }
    };

    let Applied {
        details,
        affected,
        follow_up,
    } = applied;

    match details {
        Some(details) => {
            let action: Action = Action::new(String::from(name), Some(details));
            Ok(TransitionResult {
                new_roster: working,
                event: Some(ChangeEvent::roster_changed(action, today, affected)),
                follow_up,
            })
        }
        None => Ok(TransitionResult {
            new_roster: roster.clone(),
            event: None,
            follow_up,
        }),
    }
}
