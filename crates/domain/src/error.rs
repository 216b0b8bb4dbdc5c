// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::CalendarDay;
use crate::types::{CartId, WorkerNumber};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Worker number is empty or invalid.
    InvalidWorkerNumber(String),
    /// Worker name is empty or invalid.
    InvalidName(String),
    /// Two roster entries share a worker number.
    DuplicateWorkerNumber(WorkerNumber),
    /// Tenure string is not `Rookie` or `Alumni`.
    InvalidTenure(String),
    /// Season type string is not recognized.
    InvalidSeasonType(String),
    /// Booking status string is not recognized.
    InvalidBookingStatus {
        /// The unrecognized status.
        status: String,
    },
    /// Sub-status string is not valid for the pipeline state it accompanies.
    InvalidSubStatus {
        /// The pipeline state.
        status: String,
        /// The unrecognized sub-status.
        sub_status: String,
    },
    /// A booking-status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },
    /// Failed to parse a calendar day from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A rebook date is today or earlier.
    RebookDateNotInFuture {
        /// The requested booking date.
        requested: CalendarDay,
        /// The current calendar day.
        today: CalendarDay,
    },
    /// A cart count outside the accepted range.
    InvalidCartCount {
        /// The invalid count value.
        count: u32,
    },
    /// A cart id of zero.
    InvalidCartId(u32),
    /// Cart does not exist.
    CartNotFound(CartId),
    /// Price string could not be parsed as a money amount.
    InvalidPrice {
        /// The invalid price string.
        price: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWorkerNumber(msg) => write!(f, "Invalid worker number: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::DuplicateWorkerNumber(number) => {
                write!(f, "Worker number '{number}' appears more than once")
            }
            Self::InvalidTenure(value) => {
                write!(f, "Invalid tenure '{value}': must be Rookie or Alumni")
            }
            Self::InvalidSeasonType(value) => write!(f, "Invalid season type '{value}'"),
            Self::InvalidBookingStatus { status } => {
                write!(f, "Invalid booking status '{status}'")
            }
            Self::InvalidSubStatus { status, sub_status } => {
                write!(f, "Sub-status '{sub_status}' is not valid for '{status}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot move from '{from}' to '{to}': {reason}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::RebookDateNotInFuture { requested, today } => {
                write!(
                    f,
                    "Booking date {requested} must be after today ({today})"
                )
            }
            Self::InvalidCartCount { count } => {
                write!(f, "Invalid cart count: {count}")
            }
            Self::InvalidCartId(id) => write!(f, "Invalid cart id: {id}. Cart ids start at 1"),
            Self::CartNotFound(id) => write!(f, "Cart #{id} not found"),
            Self::InvalidPrice { price } => write!(f, "Invalid price '{price}'"),
        }
    }
}

impl std::error::Error for DomainError {}
