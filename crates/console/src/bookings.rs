// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking repository seam and its CSV-backed implementation.

use crate::error::ConsoleError;
use csv::StringRecord;
use doorbook_domain::{
    Booking, BookingId, BookingPatch, CalendarDay, SaleStatus, WorkerNumber, parse_price,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, warn};

/// Read access to completed sales and write access to their completion
/// fields. Bookings themselves are owned by another service.
pub trait BookingRepository {
    /// Returns the bookings `worker` completed on `day`.
    fn completed_bookings_for_worker(&self, worker: &WorkerNumber, day: CalendarDay)
    -> Vec<Booking>;

    /// Applies `patch` to the booking with `id`. Returns false if there is
    /// no such booking.
    fn update_booking_fields(&mut self, id: &BookingId, patch: &BookingPatch) -> bool;
}

/// Bookings held in memory, typically loaded from a CSV export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryBookings {
    bookings: Vec<Booking>,
}

impl InMemoryBookings {
    #[must_use]
    pub const fn new(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }

    /// Loads bookings from a CSV export.
    ///
    /// # Errors
    ///
    /// See [`load_bookings_csv`].
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, ConsoleError> {
        load_bookings_csv(reader).map(Self::new)
    }

    #[must_use]
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }
}

impl BookingRepository for InMemoryBookings {
    fn completed_bookings_for_worker(
        &self,
        worker: &WorkerNumber,
        day: CalendarDay,
    ) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| b.is_completed_sale_for(worker, day))
            .cloned()
            .collect()
    }

    fn update_booking_fields(&mut self, id: &BookingId, patch: &BookingPatch) -> bool {
        match self.bookings.iter_mut().find(|b| &b.booking_id == id) {
            Some(booking) => {
                patch.apply_to(booking);
                debug!(booking = %id, "Updated booking fields");
                true
            }
            None => false,
        }
    }
}

const BOOKING_ID: &str = "booking_id";

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

// Exports mark flags with an "x"; some tools write booleans instead.
fn is_marked(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "x" | "true" | "yes" | "1"
    )
}

fn cell<'r>(
    record: &'r StringRecord,
    headers: &HashMap<String, usize>,
    name: &str,
) -> Option<&'r str> {
    headers
        .get(name)
        .and_then(|&idx| record.get(idx))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn parse_row(record: &StringRecord, headers: &HashMap<String, usize>) -> Option<Booking> {
    let field = |name: &str| cell(record, headers, name);

    let id: BookingId = BookingId::new(field(BOOKING_ID)?);
    let price: Decimal = field("price").map_or(Decimal::ZERO, |raw| {
        parse_price(raw).unwrap_or_else(|e| {
            warn!(booking = %id, error = %e, "Unparsable price counted as zero");
            Decimal::ZERO
        })
    });

    let mut booking: Booking = Booking::new(id, price);
    booking.contractor_number = field("contractor_number").map(WorkerNumber::new);
    booking.route_number = field("route_number").map(str::to_string);
    booking.payment_method = field("payment_method").unwrap_or_default().to_string();
    booking.prepaid = field("prepaid").is_some_and(is_marked);
    booking.completed = field("completed").is_some_and(is_marked);
    booking.status = field("status").map(|s| SaleStatus::from(s.to_string()));
    booking.date_completed = field("date_completed").map(str::to_string);
    booking.is_paid = field("is_paid").is_some_and(is_marked);
    Some(booking)
}

/// Parses a bookings CSV export.
///
/// Headers are matched case-insensitively with spaces read as underscores,
/// so both `Booking ID` and `booking_id` work. Only the booking id column is
/// required. Rows without a booking id are skipped.
///
/// # Errors
///
/// Returns `ConsoleError::InvalidCsv` if the CSV cannot be read or has no
/// booking id column.
pub fn load_bookings_csv<R: Read>(reader: R) -> Result<Vec<Booking>, ConsoleError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, header)| (normalize_header(header), idx))
        .collect();
    if !headers.contains_key(BOOKING_ID) {
        return Err(ConsoleError::InvalidCsv {
            reason: String::from("Missing required header: booking_id"),
        });
    }

    let mut bookings: Vec<Booking> = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record: StringRecord = record?;
        match parse_row(&record, &headers) {
            Some(booking) => bookings.push(booking),
            None => debug!(row = idx + 1, "Skipping booking row without an id"),
        }
    }

    debug!(count = bookings.len(), "Loaded bookings");
    Ok(bookings)
}
