// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use doorbook_domain::{CalendarDay, Cart, CartId, DomainError, SeasonType, Worker, WorkerNumber};
use doorbook_events::ChangeEvent;

/// The complete daily state for one console and season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    /// The season's operating mode.
    pub season_type: SeasonType,
    /// Every worker on the console.
    pub workers: Vec<Worker>,
    /// Carts for Team seasons; empty otherwise.
    pub carts: Vec<Cart>,
    /// The day attendance is currently locked for, if any.
    pub finalized_on: Option<CalendarDay>,
}

impl Roster {
    /// Creates an empty roster for a season.
    #[must_use]
    pub const fn new(season_type: SeasonType) -> Self {
        Self {
            season_type,
            workers: Vec::new(),
            carts: Vec::new(),
            finalized_on: None,
        }
    }

    /// Creates a roster from loaded workers and carts.
    #[must_use]
    pub const fn with_workers(
        season_type: SeasonType,
        workers: Vec<Worker>,
        carts: Vec<Cart>,
    ) -> Self {
        Self {
            season_type,
            workers,
            carts,
            finalized_on: None,
        }
    }

    /// Returns true if attendance is locked for `day`.
    #[must_use]
    pub fn is_finalized_on(&self, day: CalendarDay) -> bool {
        self.finalized_on == Some(day)
    }

    /// Looks up a worker by number.
    #[must_use]
    pub fn worker(&self, number: &WorkerNumber) -> Option<&Worker> {
        self.workers.iter().find(|w| &w.worker_number == number)
    }

    /// Looks up a cart by id.
    #[must_use]
    pub fn cart(&self, id: CartId) -> Option<&Cart> {
        self.carts.iter().find(|c| c.id == id)
    }

    /// Returns a mutable reference to a worker.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::WorkerNotFound` if no worker has this number.
    pub(crate) fn worker_mut(&mut self, number: &WorkerNumber) -> Result<&mut Worker, CoreError> {
        self.workers
            .iter_mut()
            .find(|w| &w.worker_number == number)
            .ok_or_else(|| CoreError::WorkerNotFound(number.clone()))
    }

    /// Returns a mutable reference to a cart.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CartNotFound` if no cart has this id.
    pub(crate) fn cart_mut(&mut self, id: CartId) -> Result<&mut Cart, CoreError> {
        self.carts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CoreError::DomainViolation(DomainError::CartNotFound(id)))
    }

    /// Workers who showed on `day`.
    pub fn showed_on(&self, day: CalendarDay) -> impl Iterator<Item = &Worker> {
        self.workers.iter().filter(move |w| w.showed_on(day))
    }

    /// Members of a cart, in roster order.
    pub fn cart_members(&self, id: CartId) -> impl Iterator<Item = &Worker> {
        self.workers
            .iter()
            .filter(move |w| w.assignment.cart_id() == Some(id))
    }

    /// A short summary used in action details and logs.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "season={},workers={},carts={}",
            self.season_type,
            self.workers.len(),
            self.carts.len()
        )
    }
}

/// A prompt the operator should answer after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    /// The worker showed; pick their next booking.
    ChooseNextBooking {
        /// The worker to rebook.
        worker_number: WorkerNumber,
        /// The earliest date a rebook may use.
        earliest: CalendarDay,
    },
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new roster after the transition.
    pub new_roster: Roster,
    /// The change event recording this transition; `None` when nothing changed.
    pub event: Option<ChangeEvent>,
    /// A prompt for the operator, if the transition needs one.
    pub follow_up: Option<FollowUp>,
}

impl TransitionResult {
    /// Returns true if the transition changed the roster.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        self.event.is_some()
    }
}
