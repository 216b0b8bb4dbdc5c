// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The operator's daily board: every worker grouped by where they sit
//! relative to the current operating day.

use crate::error::CoreError;
use crate::state::Roster;
use doorbook_domain::{Assignment, BookingStatus, CalendarDay, Confirmation, Worker, WorkerNumber};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// One worker as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardEntry {
    pub worker_number: WorkerNumber,
    pub name: String,
    pub booking_status: BookingStatus,
    pub assignment: Assignment,
    pub confirmation: Confirmation,
    pub no_shows: u32,
    pub days_worked: u32,
}

impl BoardEntry {
    fn from_worker(worker: &Worker) -> Self {
        Self {
            worker_number: worker.worker_number.clone(),
            name: worker.full_name(),
            booking_status: worker.booking_status,
            assignment: worker.assignment.clone(),
            confirmation: worker.confirmation,
            no_shows: worker.no_shows,
            days_worked: worker.days_worked,
        }
    }
}

/// Workers booked on one future date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateGroup {
    pub date: CalendarDay,
    pub workers: Vec<BoardEntry>,
}

/// The roster grouped for one operating day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBoard {
    pub today: CalendarDay,
    pub finalized: bool,
    /// Showed today.
    pub showed: Vec<BoardEntry>,
    /// Due today but not yet showed.
    pub booked: Vec<BoardEntry>,
    /// Booked for the next operating day.
    pub next_day: Vec<BoardEntry>,
    /// Booked beyond the next operating day, by date.
    pub calendar: Vec<DateGroup>,
    /// Most no-shows first.
    pub no_show: Vec<BoardEntry>,
    pub will_call: Vec<BoardEntry>,
    pub terminated: Vec<BoardEntry>,
    pub unbooked: Vec<BoardEntry>,
}

fn by_last_name<'a>(mut workers: Vec<&'a Worker>) -> Vec<&'a Worker> {
    workers.sort_by(|a, b| {
        a.last_name
            .cmp(&b.last_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
    });
    workers
}

fn entries<'a>(workers: impl IntoIterator<Item = &'a Worker>) -> Vec<BoardEntry> {
    workers.into_iter().map(BoardEntry::from_worker).collect()
}

/// Builds the daily board.
///
/// Workers on a next-day booking who worked today are shown as confirmed.
///
/// # Errors
///
/// Returns an error if `today` is the last representable day.
pub fn daily_board(roster: &Roster, today: CalendarDay) -> Result<DailyBoard, CoreError> {
    let tomorrow: CalendarDay = today.next_day()?;
    let workers: &[Worker] = &roster.workers;

    let showed: Vec<&Worker> = workers.iter().filter(|w| w.showed_on(today)).collect();
    let booked: Vec<&Worker> = by_last_name(
        workers
            .iter()
            .filter(|w| w.is_due_on(today) && !w.showed_on(today))
            .collect(),
    );

    let next_day: Vec<BoardEntry> = by_last_name(
        workers
            .iter()
            .filter(|w| w.booking_status.is_booked_for_next_day(today).unwrap_or(false))
            .collect(),
    )
    .into_iter()
    .map(|w| {
        let mut entry = BoardEntry::from_worker(w);
        if w.showed_on(today) && matches!(w.booking_status, BookingStatus::NextDay { .. }) {
            entry.confirmation.confirmed = true;
        }
        entry
    })
    .collect();

    let mut calendar: BTreeMap<CalendarDay, Vec<&Worker>> = BTreeMap::new();
    let future = workers.iter().filter_map(|w| match w.booking_status {
        BookingStatus::Calendar { booked_date } if booked_date > tomorrow => Some((booked_date, w)),
        _ => None,
    });
    for (date, worker) in future {
        calendar.entry(date).or_default().push(worker);
    }
    let calendar: Vec<DateGroup> = calendar
        .into_iter()
        .map(|(date, group)| DateGroup {
            date,
            workers: entries(by_last_name(group)),
        })
        .collect();

    let mut no_show: Vec<&Worker> = workers
        .iter()
        .filter(|w| w.booking_status == BookingStatus::NoShow)
        .collect();
    no_show.sort_by_key(|w| Reverse(w.no_shows));

    let will_call = workers
        .iter()
        .filter(|w| matches!(w.booking_status, BookingStatus::WdrTnb { .. }));
    let terminated = workers
        .iter()
        .filter(|w| matches!(w.booking_status, BookingStatus::QuitFired { .. }));
    let unbooked: Vec<&Worker> = by_last_name(
        workers
            .iter()
            .filter(|w| w.booking_status == BookingStatus::Unbooked)
            .collect(),
    );

    Ok(DailyBoard {
        today,
        finalized: roster.is_finalized_on(today),
        showed: entries(showed),
        booked: entries(booked),
        next_day,
        calendar,
        no_show: entries(no_show),
        will_call: entries(will_call),
        terminated: entries(terminated),
        unbooked: entries(unbooked),
    })
}
