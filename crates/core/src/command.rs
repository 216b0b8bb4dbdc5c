// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use doorbook_domain::{
    CalendarDay, CartId, PayoutFigures, RouteManager, TerminationReason, WillCallReason,
    WorkerNumber,
};

/// A sink state an operator can move workers into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkTarget {
    WillCall(WillCallReason),
    Terminated(TerminationReason),
}

/// A confirmation call outcome for a worker booked on the next operating day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationCall {
    /// Flip the confirmed flag.
    ToggleConfirmed,
    /// A message was left.
    LeftMessage,
    /// The worker could not be reached.
    NotAvailable,
}

/// One worker's completed payout figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutEntry {
    pub worker_number: WorkerNumber,
    pub figures: PayoutFigures,
}

/// A command represents operator intent as data only.
///
/// Commands are the only way to request roster changes during the day.
/// Day rollover is not a command; see `rollover`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record that a worker showed up today.
    MarkShowed {
        /// The worker.
        worker_number: WorkerNumber,
    },
    /// Book a worker for a future date.
    Rebook {
        /// The worker.
        worker_number: WorkerNumber,
        /// The new booked date. Must be after today.
        date: CalendarDay,
    },
    /// Move a worker to will-call (WDR).
    MarkWillCall {
        /// The worker.
        worker_number: WorkerNumber,
    },
    /// Move several workers into a sink state.
    MoveToSink {
        /// The workers.
        worker_numbers: Vec<WorkerNumber>,
        /// The sink state and its reason.
        target: SinkTarget,
    },
    /// Book several workers for the same future date.
    MoveToDate {
        /// The workers.
        worker_numbers: Vec<WorkerNumber>,
        /// The new booked date. Must be after today.
        date: CalendarDay,
    },
    /// Record a confirmation call.
    RecordConfirmation {
        /// The worker.
        worker_number: WorkerNumber,
        /// What happened on the call.
        call: ConfirmationCall,
    },
    /// Assign a showed worker to a route manager, or clear with `None`.
    AssignRouteManager {
        /// The worker.
        worker_number: WorkerNumber,
        /// The route manager, or `None` for "Unassigned".
        manager: Option<RouteManager>,
    },
    /// Move a showed worker into a cart, or out of any cart with `None`.
    AssignCart {
        /// The worker.
        worker_number: WorkerNumber,
        /// The cart, or `None` for "no cart".
        cart_id: Option<CartId>,
    },
    /// Set the number of carts for the day.
    ResizeCarts {
        /// The new cart count.
        count: u32,
    },
    /// Set or clear a cart's route manager.
    SetCartManager {
        /// The cart.
        cart_id: CartId,
        /// The route manager, or `None` to clear.
        manager: Option<RouteManager>,
    },
    /// Lock today's attendance, converting unshown bookings into no-shows.
    FinalizeAttendance,
    /// Unlock today's attendance.
    ModifyAttendance,
    /// Write completed payouts. All entries are applied or none are.
    CompletePayout {
        /// Per-worker figures.
        entries: Vec<PayoutEntry>,
    },
}

impl Command {
    /// Returns the command's name as used in change events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MarkShowed { .. } => "MarkShowed",
            Self::Rebook { .. } => "Rebook",
            Self::MarkWillCall { .. } => "MarkWillCall",
            Self::MoveToSink { .. } => "MoveToSink",
            Self::MoveToDate { .. } => "MoveToDate",
            Self::RecordConfirmation { .. } => "RecordConfirmation",
            Self::AssignRouteManager { .. } => "AssignRouteManager",
            Self::AssignCart { .. } => "AssignCart",
            Self::ResizeCarts { .. } => "ResizeCarts",
            Self::SetCartManager { .. } => "SetCartManager",
            Self::FinalizeAttendance => "FinalizeAttendance",
            Self::ModifyAttendance => "ModifyAttendance",
            Self::CompletePayout { .. } => "CompletePayout",
        }
    }

    /// Returns true for commands that change today's attendance or assignments.
    ///
    /// These are rejected while today's attendance is finalized.
    #[must_use]
    pub const fn affects_attendance(&self) -> bool {
        matches!(
            self,
            Self::MarkShowed { .. }
                | Self::AssignRouteManager { .. }
                | Self::AssignCart { .. }
                | Self::ResizeCarts { .. }
                | Self::SetCartManager { .. }
        )
    }
}
