// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Console sessions for the doorbook workforce core.
//!
//! This crate is the boundary between the pure roster core and everything
//! around it: the key-value store, the clock, the booking repository and the
//! console profile. Hosts open a [`ConsoleSession`], call
//! [`ConsoleSession::start`] once, and then drive it with
//! [`doorbook::Command`] values.

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
#![allow(clippy::multiple_crate_versions)]

mod bookings;
mod config;
mod error;
mod roster_import;
mod session;

#[cfg(test)]
mod tests;

pub use bookings::{BookingRepository, InMemoryBookings, load_bookings_csv};
pub use config::ConsoleConfig;
pub use error::ConsoleError;
pub use roster_import::{RejectedRow, WorkerImport, parse_workers_csv};
pub use session::{ConsoleSession, Executed, Imported, PersistenceStatus, SessionStart};
