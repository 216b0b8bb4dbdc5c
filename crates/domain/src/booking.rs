// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sales records produced by the booking repository.
//!
//! Bookings are owned by an external service. The workforce core reads them
//! to aggregate sales and writes only the completion fields.

use crate::calendar::CalendarDay;
use crate::error::DomainError;
use crate::payout_settings::PaymentMethodKey;
use crate::types::WorkerNumber;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Follow-up state of a booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SaleStatus {
    Cancelled,
    NextTime,
    Pending,
    Contract,
    Redo,
    RefusedDoNotBook,
    /// Free-form status text not in the known set.
    Other(String),
}

impl SaleStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cancelled => "cancelled",
            Self::NextTime => "next_time",
            Self::Pending => "pending",
            Self::Contract => "contract",
            Self::Redo => "redo",
            Self::RefusedDoNotBook => "ref/dnb",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for SaleStatus {
    fn from(value: String) -> Self {
        match value.trim() {
            "cancelled" => Self::Cancelled,
            "next_time" => Self::NextTime,
            "pending" => Self::Pending,
            "contract" => Self::Contract,
            "redo" => Self::Redo,
            "ref/dnb" => Self::RefusedDoNotBook,
            _ => Self::Other(value),
        }
    }
}

impl From<SaleStatus> for String {
    fn from(status: SaleStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A booking identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One sale record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: BookingId,
    /// Worker credited with the sale, if any.
    pub contractor_number: Option<WorkerNumber>,
    pub route_number: Option<String>,
    /// Missing or unparsable prices count as zero.
    pub price: Decimal,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub prepaid: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub status: Option<SaleStatus>,
    /// Raw completion date text; may carry a time suffix.
    #[serde(default)]
    pub date_completed: Option<String>,
    #[serde(default)]
    pub is_paid: bool,
}

impl Booking {
    /// Creates an incomplete booking with no method or status.
    #[must_use]
    pub const fn new(booking_id: BookingId, price: Decimal) -> Self {
        Self {
            booking_id,
            contractor_number: None,
            route_number: None,
            price,
            payment_method: String::new(),
            prepaid: false,
            completed: false,
            status: None,
            date_completed: None,
            is_paid: false,
        }
    }

    /// Returns the calendar day the booking was completed on, if parseable.
    #[must_use]
    pub fn completed_day(&self) -> Option<CalendarDay> {
        self.date_completed
            .as_deref()
            .and_then(|raw| CalendarDay::parse_prefix(raw).ok())
    }

    /// Returns true if the booking counts toward `worker`'s sales on `day`.
    #[must_use]
    pub fn is_completed_sale_for(&self, worker: &WorkerNumber, day: CalendarDay) -> bool {
        self.completed
            && self.contractor_number.as_ref() == Some(worker)
            && self.completed_day() == Some(day)
    }

    /// Returns the payment-method category this booking is counted under.
    #[must_use]
    pub fn method_key(&self) -> PaymentMethodKey {
        PaymentMethodKey::resolve(self.prepaid, &self.payment_method)
    }
}

/// Parses a free-form price string as a money amount.
///
/// Currency symbols and thousands separators are ignored. Blank input is
/// zero.
///
/// # Errors
///
/// Returns `DomainError::InvalidPrice` if the remaining text is not a number.
pub fn parse_price(raw: &str) -> Result<Decimal, DomainError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned).map_err(|_| DomainError::InvalidPrice {
        price: raw.to_string(),
    })
}

/// Completion fields the core is allowed to write back to a booking.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookingPatch {
    pub completed: Option<bool>,
    pub date_completed: Option<CalendarDay>,
    pub status: Option<SaleStatus>,
    pub payment_method: Option<String>,
    pub is_paid: Option<bool>,
}

impl BookingPatch {
    /// Returns true if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.completed.is_none()
            && self.date_completed.is_none()
            && self.status.is_none()
            && self.payment_method.is_none()
            && self.is_paid.is_none()
    }

    /// Applies the patch to `booking`.
    pub fn apply_to(&self, booking: &mut Booking) {
        if let Some(completed) = self.completed {
            booking.completed = completed;
        }
        if let Some(day) = self.date_completed {
            booking.date_completed = Some(day.to_string());
        }
        if let Some(status) = &self.status {
            booking.status = Some(status.clone());
        }
        if let Some(method) = &self.payment_method {
            booking.payment_method.clone_from(method);
        }
        if let Some(is_paid) = self.is_paid {
            booking.is_paid = is_paid;
        }
    }
}
