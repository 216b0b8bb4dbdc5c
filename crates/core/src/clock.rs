// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sources of the current operating day.
//!
//! Every operation samples the clock itself. Nothing holds on to a
//! previously read day, so a session left open across midnight sees the
//! new day on its next call.

use doorbook_domain::{CalendarDay, DomainError};
use std::sync::{Mutex, PoisonError};
use time::{OffsetDateTime, UtcOffset};

/// Supplies the current calendar day.
pub trait Clock {
    /// Returns today's date in the operator's local day.
    fn today(&self) -> CalendarDay;
}

/// Wall clock shifted into the operator's time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    /// A clock reporting the UTC calendar day.
    #[must_use]
    pub const fn utc() -> Self {
        Self {
            offset: UtcOffset::UTC,
        }
    }

    /// A clock reporting the calendar day at a fixed UTC offset.
    #[must_use]
    pub const fn with_offset(offset: UtcOffset) -> Self {
        Self { offset }
    }

    /// A clock at a whole-hour UTC offset such as `-5`.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is outside +/-25 hours.
    pub fn with_offset_hours(hours: i8) -> Result<Self, DomainError> {
        UtcOffset::from_hms(hours, 0, 0)
            .map(Self::with_offset)
            .map_err(|e| DomainError::DateArithmeticOverflow {
                operation: format!("building a UTC offset of {hours} hours: {e}"),
            })
    }

    /// Returns the configured offset.
    #[must_use]
    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn today(&self) -> CalendarDay {
        CalendarDay::new(OffsetDateTime::now_utc().to_offset(self.offset).date())
    }
}

/// A clock that reports a day set by the caller.
///
/// Used by tests and by hosts replaying a specific day.
#[derive(Debug)]
pub struct FixedClock {
    day: Mutex<CalendarDay>,
}

impl FixedClock {
    #[must_use]
    pub const fn new(day: CalendarDay) -> Self {
        Self {
            day: Mutex::new(day),
        }
    }

    /// Moves the clock to `day`.
    pub fn set(&self, day: CalendarDay) {
        *self.day.lock().unwrap_or_else(PoisonError::into_inner) = day;
    }

    /// Moves the clock forward one day.
    ///
    /// # Errors
    ///
    /// Returns an error at the end of the representable range.
    pub fn advance(&self) -> Result<CalendarDay, DomainError> {
        let mut guard = self.day.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = guard.next_day()?;
        Ok(*guard)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> CalendarDay {
        *self.day.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> CalendarDay {
        (**self).today()
    }
}
