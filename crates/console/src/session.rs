// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One console's working session.
//!
//! A [`ConsoleSession`] owns the roster for one console and season, the
//! store it is persisted in, the clock, and the booking repository. Every
//! mutation takes `&mut self`, which makes the session the critical section
//! for its console. Hosts that share a session across tasks wrap it in a
//! mutex.
//!
//! Store writes happen after the in-memory roster has advanced. A write
//! failure does not undo the change; the result reports
//! [`PersistenceStatus::MemoryOnly`] instead.

use crate::bookings::BookingRepository;
use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::roster_import::{WorkerImport, parse_workers_csv};
use doorbook::{
    Clock, Command, CommissionStrategy, DailyBoard, FollowUp, ManagerChoice, PayoutQuote,
    RolledOver, RolloverOutcome, RolloverReport, Roster, TransitionResult, apply, daily_board,
    quote_cart, quote_worker, rollover,
};
use doorbook_domain::{
    Assignment, Booking, BookingId, BookingPatch, CalendarDay, Cart, PayoutLogicSettings,
    SaleStatus, Worker, WorkerNumber, validate_worker_numbers_unique,
};
use doorbook_events::{Action, ChangeEvent};
use doorbook_store::{PersistenceError, StorageKey, Store};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Read;
use tracing::{debug, info, warn};

const ATTENDANCE_LOCKED: &str = "true";
const ATTENDANCE_OPEN: &str = "false";

/// Whether a change reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PersistenceStatus {
    Persisted,
    /// Saved to memory but not persisted.
    MemoryOnly,
}

impl PersistenceStatus {
    fn from_result(result: Result<(), PersistenceError>, operation: &str) -> Self {
        match result {
            Ok(()) => Self::Persisted,
            Err(e) => {
                warn!(operation, error = %e, "Saved to memory but not persisted");
                Self::MemoryOnly
            }
        }
    }

    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted)
    }
}

/// The result of a session-start rollover check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStart {
    pub outcome: RolloverOutcome,
    /// Archive keys written for the previous day.
    pub archived: Vec<StorageKey>,
    pub persistence: PersistenceStatus,
}

impl SessionStart {
    /// Returns the rollover report if a day boundary was crossed.
    #[must_use]
    pub fn report(&self) -> Option<&RolloverReport> {
        match &self.outcome {
            RolloverOutcome::Advanced(rolled) => Some(&rolled.report),
            _ => None,
        }
    }
}

/// The result of one operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executed {
    /// `None` when the command changed nothing.
    pub event: Option<ChangeEvent>,
    pub follow_up: Option<FollowUp>,
    pub persistence: PersistenceStatus,
}

/// The result of a roster import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Imported {
    pub import: WorkerImport,
    pub persistence: PersistenceStatus,
}

/// Route manager and cart assignments of workers who showed on `today`, as
/// kept under the live `routeAssignments` key.
/// Sink workers keep their last assignment across rollovers.
fn route_sheet(roster: &Roster, today: CalendarDay) -> BTreeMap<WorkerNumber, Assignment> {
    roster
        .workers
        .iter()
        .filter(|w| w.showed_on(today) && w.assignment.is_assigned())
        .map(|w| (w.worker_number.clone(), w.assignment.clone()))
        .collect()
}

fn has_entries(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Array(items) => !items.is_empty(),
        serde_json::Value::Object(entries) => !entries.is_empty(),
        serde_json::Value::String(text) => !text.is_empty(),
        serde_json::Value::Bool(_) | serde_json::Value::Number(_) => true,
    }
}

/// The working session for one console.
pub struct ConsoleSession<C: Clock> {
    store: Store,
    clock: C,
    config: ConsoleConfig,
    bookings: Box<dyn BookingRepository + Send>,
    settings: PayoutLogicSettings,
    roster: Roster,
    /// The last day rollover processed, once known.
    processed_day: Option<CalendarDay>,
}

impl<C: Clock> std::fmt::Debug for ConsoleSession<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSession")
            .field("console_id", &self.config.console_id)
            .field("roster", &self.roster.summary())
            .field("finalized_on", &self.roster.finalized_on)
            .finish_non_exhaustive()
    }
}

impl<C: Clock> ConsoleSession<C> {
    /// Loads a console's roster from the store.
    ///
    /// Payout logic stored under `payout_logic_settings` takes precedence
    /// over the profile's; without either the defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds undecodable
    /// values, or `ConsoleError::Validation` if the stored roster repeats a
    /// worker number.
    pub fn open<B: BookingRepository + Send + 'static>(
        mut store: Store,
        clock: C,
        config: ConsoleConfig,
        bookings: B,
    ) -> Result<Self, ConsoleError> {
        let workers: Vec<Worker> = store.get(StorageKey::ConsoleWorkers, Vec::new())?;
        validate_worker_numbers_unique(&workers)?;
        let carts: Vec<Cart> = store.get(StorageKey::ConsoleCarts, Vec::new())?;
        let finalized_on: Option<CalendarDay> =
            store.get_optional(StorageKey::AttendanceFinalized)?;
        let stored_settings: Option<PayoutLogicSettings> =
            store.get_optional(StorageKey::PayoutLogicSettings)?;
        let settings: PayoutLogicSettings =
            stored_settings.unwrap_or_else(|| config.payout_settings());

        let mut roster: Roster = Roster::with_workers(config.season_type, workers, carts);
        roster.finalized_on = finalized_on;

        info!(
            console = config.console_id,
            roster = %roster.summary(),
            "Opened console session"
        );

        Ok(Self {
            store,
            clock,
            config,
            bookings: Box::new(bookings),
            settings,
            roster,
            processed_day: None,
        })
    }

    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub const fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    #[must_use]
    pub const fn payout_settings(&self) -> &PayoutLogicSettings {
        &self.settings
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Samples the clock.
    #[must_use]
    pub fn today(&self) -> CalendarDay {
        self.clock.today()
    }

    /// Runs the daily rollover if the clock has crossed into a new day.
    ///
    /// Call at session start. On a new day the previous day's route and map
    /// assignments and attendance flag are archived under date-suffixed
    /// keys, the live copies are removed, and the advanced roster is saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the last processed day cannot be read.
    pub fn start(&mut self) -> Result<SessionStart, ConsoleError> {
        let today: CalendarDay = self.clock.today();
        // The in-memory marker wins over the store, which may lag behind
        // after a failed write.
        let last_processed: Option<CalendarDay> = match self.processed_day {
            Some(day) => Some(day),
            None => self.store.get_optional(StorageKey::LastAppDate)?,
        };

        let outcome: RolloverOutcome = rollover(&self.roster, last_processed, today);
        let marker: Option<CalendarDay> = outcome.marker();
        self.processed_day = marker.or(last_processed);

        let mut archived: Vec<StorageKey> = Vec::new();
        let mut result: Result<(), PersistenceError> = Ok(());

        if let RolloverOutcome::Advanced(rolled) = &outcome {
            let RolledOver { new_roster, report } = rolled.as_ref();
            self.roster = new_roster.clone();
            result = self
                .archive_day(report.previous_day, report.attendance_was_finalized)
                .and_then(|keys| {
                    archived = keys;
                    self.save_roster(today)
                });
            self.store.notifier().notify(&report.event);
        }

        if let Some(day) = marker {
            result = result.and_then(|()| self.store.set(StorageKey::LastAppDate, &day));
        }

        Ok(SessionStart {
            outcome,
            archived,
            persistence: PersistenceStatus::from_result(result, "rollover"),
        })
    }

    /// Applies one operator command to the roster and saves it.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` or `ConsoleError::NotFound` if the
    /// command is rejected. The roster is unchanged in that case.
    pub fn execute(&mut self, command: Command) -> Result<Executed, ConsoleError> {
        let today: CalendarDay = self.clock.today();
        let toggles_attendance: bool = matches!(
            command,
            Command::FinalizeAttendance | Command::ModifyAttendance
        );

        let TransitionResult {
            new_roster,
            event,
            follow_up,
        } = apply(&self.roster, command, today)?;

        let Some(event) = event else {
            debug!(%today, "Command changed nothing");
            return Ok(Executed {
                event: None,
                follow_up,
                persistence: PersistenceStatus::Persisted,
            });
        };

        self.roster = new_roster;
        let mut result: Result<(), PersistenceError> = self.save_roster(today);
        if toggles_attendance {
            result = result.and_then(|()| self.save_attendance_flag(today));
        }
        self.store.notifier().notify(&event);

        Ok(Executed {
            event: Some(event),
            follow_up,
            persistence: PersistenceStatus::from_result(result, "command"),
        })
    }

    /// Builds today's board.
    ///
    /// # Errors
    ///
    /// Returns an error at the end of the representable date range.
    pub fn board(&self) -> Result<DailyBoard, ConsoleError> {
        Ok(daily_board(&self.roster, self.clock.today())?)
    }

    /// Lists the route managers that may be picked on this console.
    #[must_use]
    pub fn route_managers(&self) -> Vec<ManagerChoice> {
        self.config.route_managers()
    }

    /// Quotes today's payouts for every worker who showed.
    ///
    /// Team seasons quote each cart once and split it across its showed
    /// members; showed workers outside any cart are quoted on their own.
    #[must_use]
    pub fn quote_payouts<S: CommissionStrategy + ?Sized>(
        &self,
        strategy: &S,
    ) -> Vec<PayoutQuote> {
        let today: CalendarDay = self.clock.today();
        let season_type = self.roster.season_type;
        let mut quotes: Vec<PayoutQuote> = Vec::new();

        if season_type.uses_carts() {
            for cart in &self.roster.carts {
                let members: Vec<&Worker> = self
                    .roster
                    .cart_members(cart.id)
                    .filter(|w| w.showed_on(today))
                    .collect();
                let bookings: Vec<Booking> = members
                    .iter()
                    .flat_map(|w| {
                        self.bookings
                            .completed_bookings_for_worker(&w.worker_number, today)
                    })
                    .collect();
                quotes.extend(quote_cart(
                    &bookings,
                    &members,
                    today,
                    &self.settings,
                    strategy,
                ));
            }
        }

        let solo = self
            .roster
            .showed_on(today)
            .filter(|w| !season_type.uses_carts() || w.assignment.cart_id().is_none());
        for worker in solo {
            let bookings: Vec<Booking> = self
                .bookings
                .completed_bookings_for_worker(&worker.worker_number, today);
            quotes.push(quote_worker(
                &bookings,
                worker,
                today,
                &self.settings,
                season_type,
                strategy,
            ));
        }

        quotes
    }

    /// Marks a booking completed today.
    ///
    /// Returns false if the repository has no such booking.
    pub fn complete_booking(
        &mut self,
        id: &BookingId,
        payment_method: &str,
        is_paid: bool,
    ) -> bool {
        // Completion clears any follow-up status.
        let patch: BookingPatch = BookingPatch {
            completed: Some(true),
            date_completed: Some(self.clock.today()),
            status: Some(SaleStatus::Other(String::new())),
            payment_method: Some(payment_method.to_string()),
            is_paid: Some(is_paid),
        };
        let updated: bool = self.bookings.update_booking_fields(id, &patch);
        if !updated {
            warn!(booking = %id, "No booking to complete");
        }
        updated
    }

    /// Adds the new workers from a workers sheet.
    ///
    /// Workers already on the roster are left alone.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::InvalidCsv` if the sheet cannot be read.
    pub fn import_workers<R: Read>(&mut self, reader: R) -> Result<Imported, ConsoleError> {
        let import: WorkerImport = parse_workers_csv(reader, &self.roster.workers)?;
        if import.workers.is_empty() {
            return Ok(Imported {
                import,
                persistence: PersistenceStatus::Persisted,
            });
        }

        let today: CalendarDay = self.clock.today();
        let added: Vec<WorkerNumber> = import
            .workers
            .iter()
            .map(|w| w.worker_number.clone())
            .collect();
        self.roster.workers.extend(import.workers.iter().cloned());

        let result: Result<(), PersistenceError> = self
            .store
            .set(StorageKey::ConsoleWorkers, &self.roster.workers);
        let action: Action = Action::new(
            String::from("ImportWorkers"),
            Some(format!("Imported {} worker(s)", added.len())),
        );
        self.store
            .notifier()
            .notify(&ChangeEvent::roster_changed(action, today, added));

        Ok(Imported {
            import,
            persistence: PersistenceStatus::from_result(result, "import"),
        })
    }

    /// Replaces the season's payout logic.
    pub fn set_payout_settings(&mut self, settings: PayoutLogicSettings) -> PersistenceStatus {
        let result: Result<(), PersistenceError> =
            self.store.set(StorageKey::PayoutLogicSettings, &settings);
        self.settings = settings;
        PersistenceStatus::from_result(result, "payout settings")
    }

    /// Stores today's map assignments. Their shape belongs to the territory
    /// service; the session only archives them at rollover.
    pub fn set_map_assignments(&mut self, assignments: &serde_json::Value) -> PersistenceStatus {
        let result: Result<(), PersistenceError> =
            self.store.set(StorageKey::MapAssignments, assignments);
        PersistenceStatus::from_result(result, "map assignments")
    }

    fn save_roster(&mut self, today: CalendarDay) -> Result<(), PersistenceError> {
        self.store
            .set(StorageKey::ConsoleWorkers, &self.roster.workers)?;
        self.store.set(StorageKey::ConsoleCarts, &self.roster.carts)?;

        let sheet: BTreeMap<WorkerNumber, Assignment> = route_sheet(&self.roster, today);
        if sheet.is_empty() {
            self.store.remove(StorageKey::RouteAssignments)?;
        } else {
            self.store.set(StorageKey::RouteAssignments, &sheet)?;
        }
        Ok(())
    }

    fn save_attendance_flag(&mut self, today: CalendarDay) -> Result<(), PersistenceError> {
        match self.roster.finalized_on {
            Some(day) => {
                self.store.set(StorageKey::AttendanceFinalized, &day)?;
                self.store
                    .set(StorageKey::AttendanceFinalizedOn(day), ATTENDANCE_LOCKED)
            }
            None => {
                self.store.remove(StorageKey::AttendanceFinalized)?;
                self.store
                    .set(StorageKey::AttendanceFinalizedOn(today), ATTENDANCE_OPEN)
            }
        }
    }

    fn archive_day(
        &mut self,
        day: CalendarDay,
        attendance_was_finalized: bool,
    ) -> Result<Vec<StorageKey>, PersistenceError> {
        let mut archived: Vec<StorageKey> = Vec::new();

        for live in [StorageKey::RouteAssignments, StorageKey::MapAssignments] {
            let snapshot: Option<serde_json::Value> = self.store.get_optional(live)?;
            let target = snapshot
                .filter(has_entries)
                .zip(live.archived_on(day));
            if let Some((value, archive)) = target {
                self.store.set(archive, &value)?;
                archived.push(archive);
            }
            self.store.remove(live)?;
        }

        if attendance_was_finalized {
            let archive: StorageKey = StorageKey::AttendanceFinalizedOn(day);
            self.store.set(archive, ATTENDANCE_LOCKED)?;
            archived.push(archive);
        }
        self.store.remove(StorageKey::AttendanceFinalized)?;

        info!(%day, archived = archived.len(), "Archived previous day");
        Ok(archived)
    }
}
