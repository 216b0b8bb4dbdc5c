// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_status::BookingStatus;
use crate::calendar::CalendarDay;
use crate::error::DomainError;
use crate::payout_record::{PayoutRecord, PayoutSnapshot};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A worker's stable contractor number.
///
/// Surrounding whitespace is dropped; the number is otherwise kept verbatim
/// because booking exports match on it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerNumber(String);

impl WorkerNumber {
    /// Creates a new `WorkerNumber`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WorkerNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seniority class of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tenure {
    #[default]
    Rookie,
    Alumni,
}

impl Tenure {
    /// Returns the string representation of the tenure.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rookie => "Rookie",
            Self::Alumni => "Alumni",
        }
    }
}

impl FromStr for Tenure {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rookie" => Ok(Self::Rookie),
            "alumni" => Ok(Self::Alumni),
            _ => Err(DomainError::InvalidTenure(s.to_string())),
        }
    }
}

impl std::fmt::Display for Tenure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a season's workers are organized into sales units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SeasonType {
    /// Each worker runs their own route under a route manager.
    #[default]
    Individual,
    /// Workers are grouped into carts.
    Team,
    /// Service crews; organized like individual seasons.
    Service,
}

impl SeasonType {
    /// Returns the string representation of the season type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Team => "Team",
            Self::Service => "Service",
        }
    }

    /// Returns true if workers are assigned to carts rather than directly
    /// to route managers.
    #[must_use]
    pub const fn uses_carts(&self) -> bool {
        matches!(self, Self::Team)
    }
}

impl FromStr for SeasonType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "individual" => Ok(Self::Individual),
            "team" => Ok(Self::Team),
            "service" => Ok(Self::Service),
            _ => Err(DomainError::InvalidSeasonType(s.to_string())),
        }
    }
}

impl std::fmt::Display for SeasonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A cart identifier. Carts are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CartId(u32);

impl CartId {
    /// Creates a new `CartId`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCartId` for zero.
    pub const fn new(id: u32) -> Result<Self, DomainError> {
        if id == 0 {
            return Err(DomainError::InvalidCartId(id));
        }
        Ok(Self(id))
    }

    /// Returns the numeric id.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for CartId {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CartId> for u32 {
    fn from(id: CartId) -> Self {
        id.0
    }
}

impl std::fmt::Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A supervisor that a worker or cart reports to for the day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteManager {
    /// Full display name.
    pub name: String,
    /// Short initials shown on route sheets.
    pub initials: String,
}

impl RouteManager {
    /// Creates a route manager, deriving initials from the name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let name: String = name.trim().to_string();
        let initials: String = initials_for(&name);
        Self { name, initials }
    }
}

/// Derives initials from a full name.
///
/// Uses the first letter of the first and last whitespace-separated parts,
/// uppercased. A single-part name yields one letter; a blank name yields an
/// empty string.
#[must_use]
pub fn initials_for(name: &str) -> String {
    let mut parts = name.split_whitespace();
    let first: Option<&str> = parts.next();
    let last: Option<&str> = parts.next_back();

    [first, last]
        .into_iter()
        .flatten()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// What a worker is attached to for the current operating day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Assignment {
    #[default]
    Unassigned,
    /// Reports directly to a route manager.
    RouteManager { manager: RouteManager },
    /// Works in a cart.
    Cart { cart_id: CartId },
}

impl Assignment {
    /// Returns true if the worker is attached to a sales unit.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        !matches!(self, Self::Unassigned)
    }

    /// Returns the cart id for cart assignments.
    #[must_use]
    pub const fn cart_id(&self) -> Option<CartId> {
        match self {
            Self::Cart { cart_id } => Some(*cart_id),
            Self::Unassigned | Self::RouteManager { .. } => None,
        }
    }
}

/// Whether a worker has showed up for the current operating day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "attendance", rename_all = "snake_case")]
pub enum AttendanceToday {
    #[default]
    NotShown,
    Showed { date: CalendarDay },
}

impl AttendanceToday {
    /// Returns true if the worker showed on `day`.
    #[must_use]
    pub fn showed_on(&self, day: CalendarDay) -> bool {
        matches!(self, Self::Showed { date } if *date == day)
    }

    /// Returns the day the worker showed, if any.
    #[must_use]
    pub const fn showed_date(&self) -> Option<CalendarDay> {
        match self {
            Self::NotShown => None,
            Self::Showed { date } => Some(*date),
        }
    }
}

/// Confirmation calls for a worker booked on the next operating day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Confirmation {
    pub confirmed: bool,
    pub left_message: u32,
    pub not_available: u32,
}

/// How a worker's previous operating day ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayClose {
    /// Showed up and worked.
    Worked,
    /// Was converted to a no-show by attendance finalization.
    NoShow,
    /// Was due but never showed, and the day was never finalized.
    Lapsed,
}

impl DayClose {
    /// Returns the string representation of the day close.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Worked => "worked",
            Self::NoShow => "no_show",
            Self::Lapsed => "lapsed",
        }
    }
}

/// Contact details as imported from the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContactInfo {
    pub cell_phone: Option<String>,
    pub home_phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub shuttle_line: Option<String>,
}

/// Pre-season counters carried over from earlier years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PriorSeasons {
    pub days_worked: u32,
    pub aeration_silvers: u32,
    pub rejuvenation_silvers: u32,
    pub sealing_silvers: u32,
    pub cleaning_silvers: u32,
}

/// One field-sales representative and their state for the season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub worker_number: WorkerNumber,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub tenure: Tenure,
    /// Days worked this season. Only ever incremented.
    #[serde(default)]
    pub days_worked: u32,
    #[serde(default)]
    pub prior_seasons: PriorSeasons,
    #[serde(default)]
    pub booking_status: BookingStatus,
    #[serde(default)]
    pub attendance: AttendanceToday,
    #[serde(default)]
    pub assignment: Assignment,
    #[serde(default)]
    pub confirmation: Confirmation,
    /// Only ever incremented.
    #[serde(default)]
    pub no_shows: u32,
    #[serde(default)]
    pub payout: PayoutSnapshot,
    #[serde(default)]
    pub payout_history: Vec<PayoutRecord>,
    #[serde(default)]
    pub last_day_close: Option<DayClose>,
}

impl Worker {
    /// Creates an unbooked rookie with no history.
    #[must_use]
    pub fn new(worker_number: WorkerNumber, first_name: &str, last_name: &str) -> Self {
        Self {
            worker_number,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            contact: ContactInfo::default(),
            tenure: Tenure::default(),
            days_worked: 0,
            prior_seasons: PriorSeasons::default(),
            booking_status: BookingStatus::default(),
            attendance: AttendanceToday::default(),
            assignment: Assignment::default(),
            confirmation: Confirmation::default(),
            no_shows: 0,
            payout: PayoutSnapshot::default(),
            payout_history: Vec::new(),
            last_day_close: None,
        }
    }

    /// Returns "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Days worked across all seasons.
    ///
    /// Rookies have no prior seasons, so this equals `days_worked` for them.
    #[must_use]
    pub const fn total_days_worked(&self) -> u32 {
        match self.tenure {
            Tenure::Rookie => self.days_worked,
            Tenure::Alumni => self.prior_seasons.days_worked.saturating_add(self.days_worked),
        }
    }

    /// Returns true if the worker showed on `today`.
    #[must_use]
    pub fn showed_on(&self, today: CalendarDay) -> bool {
        self.attendance.showed_on(today)
    }

    /// Returns true if the worker is booked to work on `today`.
    #[must_use]
    pub fn is_due_on(&self, today: CalendarDay) -> bool {
        self.booking_status.is_due_on(today)
    }

    /// Returns the payout history record for `date`, if one exists.
    #[must_use]
    pub fn payout_record_for(&self, date: CalendarDay) -> Option<&PayoutRecord> {
        self.payout_history.iter().find(|record| record.date == date)
    }
}

/// A Team-mode sales unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    #[serde(default)]
    pub route_manager: Option<RouteManager>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub const fn new(id: CartId) -> Self {
        Self {
            id,
            route_manager: None,
        }
    }
}
