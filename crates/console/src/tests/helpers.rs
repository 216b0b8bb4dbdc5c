// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{ConsoleConfig, ConsoleSession, InMemoryBookings};
use doorbook::FixedClock;
use doorbook_domain::{
    AttendanceToday, Booking, BookingId, BookingStatus, CalendarDay, SeasonType, Worker,
    WorkerNumber,
};
use doorbook_events::ChangeNotifier;
use doorbook_store::{KeyValueStore, PersistenceError, StorageKey, Store};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// An in-memory backend that the test keeps a handle to after the session
/// takes ownership of the store. Writes can be made to fail.
#[derive(Debug, Clone, Default)]
pub struct SharedBackend {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl SharedBackend {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn raw(&self, key: StorageKey) -> Option<String> {
        self.entries.lock().unwrap().get(&key.to_string()).cloned()
    }

    pub fn decode<T: serde::de::DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        self.raw(key).map(|raw| serde_json::from_str(&raw).unwrap())
    }

    pub fn put<T: serde::Serialize + ?Sized>(&self, key: StorageKey, value: &T) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), serde_json::to_string(value).unwrap());
    }

    fn check(&self) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable(String::from("disk full")));
        }
        Ok(())
    }
}

impl KeyValueStore for SharedBackend {
    fn read(&mut self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.check()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool, PersistenceError> {
        self.check()?;
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }

    fn keys(&mut self) -> Result<Vec<String>, PersistenceError> {
        Ok(self.entries.lock().unwrap().keys().cloned().collect())
    }
}

pub fn day(s: &str) -> CalendarDay {
    s.parse().unwrap()
}

pub fn today() -> CalendarDay {
    day("2026-06-15")
}

pub fn tomorrow() -> CalendarDay {
    day("2026-06-16")
}

pub fn number(s: &str) -> WorkerNumber {
    WorkerNumber::new(s)
}

pub fn create_test_worker(num: &str, last_name: &str, status: BookingStatus) -> Worker {
    let mut worker: Worker = Worker::new(number(num), "Test", last_name);
    worker.booking_status = status;
    worker
}

pub fn booked_today(num: &str, last_name: &str) -> Worker {
    create_test_worker(
        num,
        last_name,
        BookingStatus::Today {
            booked_date: today(),
        },
    )
}

pub fn showed_today(num: &str, last_name: &str) -> Worker {
    let mut worker: Worker = booked_today(num, last_name);
    worker.attendance = AttendanceToday::Showed { date: today() };
    worker.days_worked = 1;
    worker
}

pub fn completed_booking(id: &str, worker: &str, price: Decimal, method: &str) -> Booking {
    let mut booking: Booking = Booking::new(BookingId::new(id), price);
    booking.contractor_number = Some(number(worker));
    booking.payment_method = method.to_string();
    booking.completed = true;
    booking.date_completed = Some(String::from("2026-06-15T15:30:00"));
    booking
}

/// Seeds `backend` with `workers` and opens a session on it.
pub fn open_session<'c>(
    clock: &'c FixedClock,
    backend: &SharedBackend,
    season_type: SeasonType,
    workers: &[Worker],
    bookings: Vec<Booking>,
) -> ConsoleSession<&'c FixedClock> {
    backend.put(StorageKey::ConsoleWorkers, workers);
    let store: Store = Store::new(backend.clone(), ChangeNotifier::new());
    ConsoleSession::open(
        store,
        clock,
        ConsoleConfig::new(7, season_type),
        InMemoryBookings::new(bookings),
    )
    .unwrap()
}
