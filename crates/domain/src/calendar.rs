// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar-day values.
//!
//! Every date the workforce core compares (booked dates, showed dates,
//! finalization keys, payout history) is a calendar day rendered as
//! `yyyy-MM-dd`. Timestamps never take part in a comparison.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Month};

const DAY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// A single calendar day with no time-of-day or offset component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDay(Date);

impl CalendarDay {
    /// Wraps an existing `time::Date`.
    #[must_use]
    pub const fn new(date: Date) -> Self {
        Self(date)
    }

    /// Builds a day from year, month and day-of-month numbers.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateParseError` if the components do not form a
    /// valid calendar date.
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self, DomainError> {
        let invalid = |error: String| DomainError::DateParseError {
            date_string: format!("{year:04}-{month:02}-{day:02}"),
            error,
        };
        let month: Month = Month::try_from(month).map_err(|e| invalid(e.to_string()))?;
        Date::from_calendar_date(year, month, day)
            .map(Self)
            .map_err(|e| invalid(e.to_string()))
    }

    /// Parses a day from the leading `yyyy-MM-dd` of a longer string.
    ///
    /// Completion dates in booking exports sometimes carry a time suffix;
    /// only the first ten characters are considered.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateParseError` if the prefix is not a valid day.
    pub fn parse_prefix(value: &str) -> Result<Self, DomainError> {
        let prefix: &str = value.trim().get(..10).unwrap_or(value);
        prefix.parse()
    }

    /// Returns the underlying `time::Date`.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.0
    }

    /// Returns the following calendar day.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` at the end of the
    /// representable range.
    pub fn next_day(&self) -> Result<Self, DomainError> {
        self.0
            .next_day()
            .map(Self)
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("advancing past {self}"),
            })
    }

    /// Returns the preceding calendar day.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` at the start of the
    /// representable range.
    pub fn previous_day(&self) -> Result<Self, DomainError> {
        self.0
            .previous_day()
            .map(Self)
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("stepping back from {self}"),
            })
    }

    /// Returns the day `days` after this one (negative values go back).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` if the result leaves the
    /// representable range.
    pub fn add_days(&self, days: i64) -> Result<Self, DomainError> {
        self.0
            .checked_add(Duration::days(days))
            .map(Self)
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("adding {days} days to {self}"),
            })
    }
}

impl FromStr for CalendarDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s.trim(), DAY_FORMAT)
            .map(Self)
            .map_err(|e| DomainError::DateParseError {
                date_string: s.to_string(),
                error: e.to_string(),
            })
    }
}

impl std::fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl TryFrom<String> for CalendarDay {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDay> for String {
    fn from(day: CalendarDay) -> Self {
        day.to_string()
    }
}

impl From<Date> for CalendarDay {
    fn from(date: Date) -> Self {
        Self(date)
    }
}
