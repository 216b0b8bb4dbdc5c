// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking pipeline states and the rules that move a worker between them.
//!
//! A worker's booking status says when they are next expected to work.
//! Operators may only move a worker to a future calendar date or into one of
//! the two sink states. The `today`, `next_day` and `unbooked` states are
//! produced by the daily rollover and `no_show` by attendance finalization.

use crate::calendar::CalendarDay;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Reason attached to the will-call sink state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WillCallReason {
    /// Will call the office when ready to work again.
    #[serde(rename = "WDR")]
    Wdr,
    /// Booked too late to be placed on a route.
    #[serde(rename = "TNB")]
    Tnb,
}

impl WillCallReason {
    /// Returns the string representation used in exports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wdr => "WDR",
            Self::Tnb => "TNB",
        }
    }
}

impl FromStr for WillCallReason {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WDR" => Ok(Self::Wdr),
            "TNB" => Ok(Self::Tnb),
            _ => Err(DomainError::InvalidSubStatus {
                status: String::from("wdr_tnb"),
                sub_status: s.to_string(),
            }),
        }
    }
}

/// Reason attached to the terminated sink state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationReason {
    Quit,
    Fired,
}

impl TerminationReason {
    /// Returns the string representation used in exports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::Fired => "Fired",
        }
    }
}

impl FromStr for TerminationReason {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quit" => Ok(Self::Quit),
            "fired" => Ok(Self::Fired),
            _ => Err(DomainError::InvalidSubStatus {
                status: String::from("quit_fired"),
                sub_status: s.to_string(),
            }),
        }
    }
}

/// Where a worker sits in the multi-day booking pipeline.
///
/// Each variant carries exactly the data that is meaningful for it, so a
/// booked date without a booking, or a sub-status outside a sink state,
/// cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookingStatus {
    /// Not booked for any day.
    #[default]
    Unbooked,
    /// Expected to work on the current operating day.
    Today { booked_date: CalendarDay },
    /// Expected to work on the next operating day.
    NextDay { booked_date: CalendarDay },
    /// Booked for a specific calendar date.
    Calendar { booked_date: CalendarDay },
    /// Was booked for the day but never showed.
    NoShow,
    /// Will-call or too-near-booking. Sink state.
    WdrTnb { sub_status: WillCallReason },
    /// Quit or fired. Sink state.
    QuitFired { sub_status: TerminationReason },
}

impl BookingStatus {
    /// Returns the pipeline state name used for persistence and exports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unbooked => "unbooked",
            Self::Today { .. } => "today",
            Self::NextDay { .. } => "next_day",
            Self::Calendar { .. } => "calendar",
            Self::NoShow => "no_show",
            Self::WdrTnb { .. } => "wdr_tnb",
            Self::QuitFired { .. } => "quit_fired",
        }
    }

    /// Builds a status from the flat `status` / `bookedDate` / `subStatus`
    /// columns used by roster exports.
    ///
    /// An empty status string reads as `unbooked`.
    ///
    /// # Errors
    ///
    /// Returns an error if the status is unknown, a dated status has no
    /// date, or a sink status has a missing or mismatched sub-status.
    pub fn from_parts(
        status: &str,
        booked_date: Option<CalendarDay>,
        sub_status: Option<&str>,
    ) -> Result<Self, DomainError> {
        let missing_date = || DomainError::InvalidBookingStatus {
            status: format!("{status} (missing booked date)"),
        };
        let missing_sub_status = || DomainError::InvalidSubStatus {
            status: status.to_string(),
            sub_status: String::new(),
        };

        match status.trim() {
            "" | "unbooked" => Ok(Self::Unbooked),
            "today" => booked_date
                .map(|booked_date| Self::Today { booked_date })
                .ok_or_else(missing_date),
            "next_day" => booked_date
                .map(|booked_date| Self::NextDay { booked_date })
                .ok_or_else(missing_date),
            "calendar" => booked_date
                .map(|booked_date| Self::Calendar { booked_date })
                .ok_or_else(missing_date),
            "no_show" => Ok(Self::NoShow),
            "wdr_tnb" => Ok(Self::WdrTnb {
                sub_status: sub_status.ok_or_else(missing_sub_status)?.parse()?,
            }),
            "quit_fired" => Ok(Self::QuitFired {
                sub_status: sub_status.ok_or_else(missing_sub_status)?.parse()?,
            }),
            other => Err(DomainError::InvalidBookingStatus {
                status: other.to_string(),
            }),
        }
    }

    /// Returns the booked date for dated states.
    #[must_use]
    pub const fn booked_date(&self) -> Option<CalendarDay> {
        match self {
            Self::Today { booked_date }
            | Self::NextDay { booked_date }
            | Self::Calendar { booked_date } => Some(*booked_date),
            Self::Unbooked | Self::NoShow | Self::WdrTnb { .. } | Self::QuitFired { .. } => None,
        }
    }

    /// Returns the sub-status label for sink states.
    #[must_use]
    pub const fn sub_status(&self) -> Option<&'static str> {
        match self {
            Self::WdrTnb { sub_status } => Some(sub_status.as_str()),
            Self::QuitFired { sub_status } => Some(sub_status.as_str()),
            _ => None,
        }
    }

    /// Returns true for states that rollover never touches.
    #[must_use]
    pub const fn is_sink(&self) -> bool {
        matches!(self, Self::WdrTnb { .. } | Self::QuitFired { .. })
    }

    /// Returns true if the worker is expected on `today`.
    ///
    /// A `today` booking counts regardless of its stored date; a calendar
    /// booking counts only when its date is `today`.
    #[must_use]
    pub fn is_due_on(&self, today: CalendarDay) -> bool {
        match self {
            Self::Today { .. } => true,
            Self::Calendar { booked_date } => *booked_date == today,
            _ => false,
        }
    }

    /// Returns true if the worker is booked for the day after `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if `today` is the last representable day.
    pub fn is_booked_for_next_day(&self, today: CalendarDay) -> Result<bool, DomainError> {
        Ok(match self {
            Self::NextDay { .. } => true,
            Self::Calendar { booked_date } => *booked_date == today.next_day()?,
            _ => false,
        })
    }

    /// Validates that an operator may move a worker from this status to `target`.
    ///
    /// Operators may rebook to a calendar date strictly after `today`, or
    /// move a worker into either sink state, from any current status.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` is a state only the system produces, or
    /// if a calendar target is not in the future.
    pub fn validate_operator_transition(
        &self,
        target: Self,
        today: CalendarDay,
    ) -> Result<(), DomainError> {
        match target {
            Self::Calendar { booked_date } => {
                if booked_date <= today {
                    return Err(DomainError::RebookDateNotInFuture {
                        requested: booked_date,
                        today,
                    });
                }
                Ok(())
            }
            Self::WdrTnb { .. } | Self::QuitFired { .. } => Ok(()),
            Self::Unbooked | Self::Today { .. } | Self::NextDay { .. } => {
                Err(DomainError::InvalidStatusTransition {
                    from: self.as_str().to_string(),
                    to: target.as_str().to_string(),
                    reason: "only the daily rollover produces this status".to_string(),
                })
            }
            Self::NoShow => Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
                reason: "only attendance finalization produces this status".to_string(),
            }),
        }
    }

    /// Returns the status this one becomes when the operating day advances to `new_day`.
    #[must_use]
    pub fn rolled_over(self, new_day: CalendarDay) -> Self {
        match self {
            Self::WdrTnb { .. } | Self::QuitFired { .. } | Self::Unbooked => self,
            Self::NextDay { .. } => Self::Today {
                booked_date: new_day,
            },
            Self::Calendar { booked_date } if booked_date == new_day => Self::Today { booked_date },
            Self::Calendar { .. } => self,
            Self::Today { .. } | Self::NoShow => Self::Unbooked,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.booked_date(), self.sub_status()) {
            (Some(date), _) => write!(f, "{} ({date})", self.as_str()),
            (None, Some(sub_status)) => write!(f, "{} ({sub_status})", self.as_str()),
            (None, None) => write!(f, "{}", self.as_str()),
        }
    }
}
