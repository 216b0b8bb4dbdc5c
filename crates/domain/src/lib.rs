// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod booking;
mod booking_status;
mod calendar;
mod error;
mod management;
mod payout_record;
mod payout_settings;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use booking::{Booking, BookingId, BookingPatch, SaleStatus, parse_price};
pub use booking_status::{BookingStatus, TerminationReason, WillCallReason};
pub use calendar::CalendarDay;
pub use management::{ConsolePermissionLink, ManagementUser};
pub use payout_record::{Bonus, Deduction, PayoutFigures, PayoutRecord, PayoutSnapshot};
pub use payout_settings::{MethodRule, PaymentMethodKey, PayoutLogicSettings};

// Re-export public types
pub use error::DomainError;
pub use types::{
    Assignment, AttendanceToday, Cart, CartId, Confirmation, ContactInfo, DayClose, PriorSeasons,
    RouteManager, SeasonType, Tenure, Worker, WorkerNumber, initials_for,
};
pub use validation::{
    MAX_CART_COUNT, validate_cart_count, validate_worker_fields, validate_worker_numbers_unique,
};
