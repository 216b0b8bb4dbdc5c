// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The keys a console store recognizes.

use crate::error::PersistenceError;
use doorbook_domain::CalendarDay;
use std::str::FromStr;

const CONSOLE_WORKERS: &str = "console_workers";
const CONSOLE_CARTS: &str = "console_carts";
const ROUTE_ASSIGNMENTS: &str = "routeAssignments";
const MAP_ASSIGNMENTS: &str = "mapAssignments";
const ATTENDANCE_FINALIZED: &str = "attendanceFinalized";
const LAST_APP_DATE: &str = "lastAppDate";
const PAYOUT_LOGIC_SETTINGS: &str = "payout_logic_settings";

/// A recognized storage key.
///
/// The three archive variants carry the day they archive and render as
/// `<base>_<yyyy-mm-dd>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    ConsoleWorkers,
    ConsoleCarts,
    /// Live route-manager and cart assignment sheet.
    RouteAssignments,
    /// Live map assignments, owned by the territory service.
    MapAssignments,
    /// The day attendance is finalized for.
    AttendanceFinalized,
    /// The last operating day rollover processed.
    LastAppDate,
    PayoutLogicSettings,
    RouteAssignmentsOn(CalendarDay),
    MapAssignmentsOn(CalendarDay),
    AttendanceFinalizedOn(CalendarDay),
}

impl StorageKey {
    /// Returns the archive key for this live key on `day`.
    ///
    /// Keys without an archive form return `None`.
    #[must_use]
    pub const fn archived_on(self, day: CalendarDay) -> Option<Self> {
        match self {
            Self::RouteAssignments => Some(Self::RouteAssignmentsOn(day)),
            Self::MapAssignments => Some(Self::MapAssignmentsOn(day)),
            Self::AttendanceFinalized => Some(Self::AttendanceFinalizedOn(day)),
            _ => None,
        }
    }

    /// Returns the archived day for date-suffixed keys.
    #[must_use]
    pub const fn archive_day(&self) -> Option<CalendarDay> {
        match self {
            Self::RouteAssignmentsOn(day)
            | Self::MapAssignmentsOn(day)
            | Self::AttendanceFinalizedOn(day) => Some(*day),
            _ => None,
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConsoleWorkers => write!(f, "{CONSOLE_WORKERS}"),
            Self::ConsoleCarts => write!(f, "{CONSOLE_CARTS}"),
            Self::RouteAssignments => write!(f, "{ROUTE_ASSIGNMENTS}"),
            Self::MapAssignments => write!(f, "{MAP_ASSIGNMENTS}"),
            Self::AttendanceFinalized => write!(f, "{ATTENDANCE_FINALIZED}"),
            Self::LastAppDate => write!(f, "{LAST_APP_DATE}"),
            Self::PayoutLogicSettings => write!(f, "{PAYOUT_LOGIC_SETTINGS}"),
            Self::RouteAssignmentsOn(day) => write!(f, "{ROUTE_ASSIGNMENTS}_{day}"),
            Self::MapAssignmentsOn(day) => write!(f, "{MAP_ASSIGNMENTS}_{day}"),
            Self::AttendanceFinalizedOn(day) => write!(f, "{ATTENDANCE_FINALIZED}_{day}"),
        }
    }
}

impl FromStr for StorageKey {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unrecognized = || PersistenceError::UnrecognizedKey(s.to_string());

        match s {
            CONSOLE_WORKERS => return Ok(Self::ConsoleWorkers),
            CONSOLE_CARTS => return Ok(Self::ConsoleCarts),
            ROUTE_ASSIGNMENTS => return Ok(Self::RouteAssignments),
            MAP_ASSIGNMENTS => return Ok(Self::MapAssignments),
            ATTENDANCE_FINALIZED => return Ok(Self::AttendanceFinalized),
            LAST_APP_DATE => return Ok(Self::LastAppDate),
            PAYOUT_LOGIC_SETTINGS => return Ok(Self::PayoutLogicSettings),
            _ => {}
        }

        let (base, suffix) = s.rsplit_once('_').ok_or_else(unrecognized)?;
        let day: CalendarDay = suffix.parse().map_err(|_| unrecognized())?;
        match base {
            ROUTE_ASSIGNMENTS => Ok(Self::RouteAssignmentsOn(day)),
            MAP_ASSIGNMENTS => Ok(Self::MapAssignmentsOn(day)),
            ATTENDANCE_FINALIZED => Ok(Self::AttendanceFinalizedOn(day)),
            _ => Err(unrecognized()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_archive_keys_render_with_date_suffix() {
        let day: CalendarDay = "2026-06-15".parse().unwrap();

        assert_eq!(
            StorageKey::RouteAssignments
                .archived_on(day)
                .unwrap()
                .to_string(),
            "routeAssignments_2026-06-15"
        );
        assert_eq!(
            StorageKey::AttendanceFinalizedOn(day).to_string(),
            "attendanceFinalized_2026-06-15"
        );
        assert_eq!(StorageKey::ConsoleWorkers.archived_on(day), None);
    }

    #[test]
    fn test_keys_parse_back() {
        for key in [
            "console_workers",
            "console_carts",
            "routeAssignments",
            "mapAssignments",
            "attendanceFinalized",
            "lastAppDate",
            "payout_logic_settings",
            "mapAssignments_2026-06-15",
        ] {
            assert_eq!(key.parse::<StorageKey>().unwrap().to_string(), key);
        }
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        for key in [
            "theme",
            "console_workers_2026-06-15",
            "routeAssignments_yesterday",
            "",
        ] {
            assert_eq!(
                key.parse::<StorageKey>(),
                Err(PersistenceError::UnrecognizedKey(key.to_string()))
            );
        }
    }
}
