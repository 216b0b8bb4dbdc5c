// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use doorbook_domain::{CalendarDay, DomainError, SeasonType, WorkerNumber};

/// Errors that can occur during state transitions.
///
/// Every variant leaves the roster untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// No worker with this number is on the roster.
    WorkerNotFound(WorkerNumber),
    /// A bulk command named no workers.
    EmptySelection,
    /// The worker is not booked for today and has not showed today.
    NotDueToday {
        /// The worker.
        worker_number: WorkerNumber,
        /// The current operating day.
        date: CalendarDay,
    },
    /// The command needs a worker who showed today.
    NotShowedToday {
        /// The worker.
        worker_number: WorkerNumber,
        /// The current operating day.
        date: CalendarDay,
    },
    /// Confirmation calls only apply to workers booked for the next operating day.
    NotBookedForNextDay(WorkerNumber),
    /// Assignment command does not match the season's operating mode.
    WrongAssignmentMode {
        /// The season's type.
        season_type: SeasonType,
        /// What the command tried to assign.
        attempted: &'static str,
    },
    /// Attendance for the day is locked.
    AttendanceFinalized(CalendarDay),
    /// Attendance for the day has not been finalized yet.
    AttendanceNotFinalized(CalendarDay),
    /// Showed workers without an assignment block finalization.
    UnassignedWorkers {
        /// How many showed workers have no assignment.
        count: usize,
    },
}

impl CoreError {
    /// Returns true for errors that name something that does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::WorkerNotFound(_) | Self::DomainViolation(DomainError::CartNotFound(_))
        )
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::WorkerNotFound(number) => write!(f, "Worker '{number}' not found"),
            Self::EmptySelection => write!(f, "No workers selected"),
            Self::NotDueToday {
                worker_number,
                date,
            } => write!(f, "Worker '{worker_number}' is not booked for {date}"),
            Self::NotShowedToday {
                worker_number,
                date,
            } => write!(f, "Worker '{worker_number}' has not showed on {date}"),
            Self::NotBookedForNextDay(number) => {
                write!(f, "Worker '{number}' is not booked for the next operating day")
            }
            Self::WrongAssignmentMode {
                season_type,
                attempted,
            } => write!(f, "Cannot assign {attempted} in a {season_type} season"),
            Self::AttendanceFinalized(date) => write!(
                f,
                "Attendance for {date} is finalized; modify attendance first"
            ),
            Self::AttendanceNotFinalized(date) => {
                write!(f, "Attendance for {date} has not been finalized")
            }
            Self::UnassignedWorkers { count } => write!(
                f,
                "{count} showed worker(s) have no route manager or cart assigned"
            ),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
