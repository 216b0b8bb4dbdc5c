// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Roster;
use doorbook_domain::{
    AttendanceToday, Booking, BookingId, BookingStatus, CalendarDay, SeasonType, Worker,
    WorkerNumber,
};
use rust_decimal::Decimal;

pub fn day(s: &str) -> CalendarDay {
    s.parse().unwrap()
}

pub fn today() -> CalendarDay {
    day("2026-06-15")
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

pub fn create_test_roster(season_type: SeasonType, workers: Vec<Worker>) -> Roster {
    Roster::with_workers(season_type, workers, Vec::new())
}

pub fn completed_booking(id: &str, worker: &str, price: Decimal, method: &str) -> Booking {
    let mut booking: Booking = Booking::new(BookingId::new(id), price);
    booking.contractor_number = Some(number(worker));
    booking.payment_method = method.to_string();
    booking.completed = true;
    booking.date_completed = Some(format!("{}T15:30:00", today()));
    booking
}
