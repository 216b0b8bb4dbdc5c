// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    booked_today, create_test_roster, create_test_worker, day, number, showed_today, today,
};
use crate::{Command, CoreError, Roster, TransitionResult, apply, count_unassigned_showed};
use doorbook_domain::{
    Assignment, BookingStatus, RouteManager, SeasonType, WillCallReason, Worker,
};

fn assigned(mut worker: Worker) -> Worker {
    worker.assignment = Assignment::RouteManager {
        manager: RouteManager::new("Dana Kowalski"),
    };
    worker
}

#[test]
fn test_finalize_fails_without_mutation_when_showed_worker_unassigned() {
    let roster: Roster = create_test_roster(
        SeasonType::Individual,
        vec![
            assigned(showed_today("100", "Ng")),
            showed_today("101", "Ortiz"),
            showed_today("102", "Park"),
            booked_today("103", "Quinn"),
        ],
    );

    let err: CoreError = apply(&roster, Command::FinalizeAttendance, today()).unwrap_err();

    assert_eq!(err, CoreError::UnassignedWorkers { count: 2 });
    assert_eq!(count_unassigned_showed(&roster, today()), 2);
    assert!(!roster.is_finalized_on(today()));
    assert!(matches!(
        roster.worker(&number("103")).unwrap().booking_status,
        BookingStatus::Today { .. }
    ));
}

#[test]
fn test_finalize_converts_unshown_bookings_to_no_shows() {
    let mut stale: Worker = booked_today("103", "Quinn");
    stale.no_shows = 2;
    stale.assignment = Assignment::RouteManager {
        manager: RouteManager::new("Dana Kowalski"),
    };
    let calendar_today: Worker = create_test_worker(
        "104",
        "Reyes",
        BookingStatus::Calendar {
            booked_date: today(),
        },
    );
    let future: Worker = create_test_worker(
        "105",
        "Silva",
        BookingStatus::Calendar {
            booked_date: day("2026-06-20"),
        },
    );
    let sink: Worker = create_test_worker(
        "106",
        "Tran",
        BookingStatus::WdrTnb {
            sub_status: WillCallReason::Wdr,
        },
    );
    let roster: Roster = create_test_roster(
        SeasonType::Individual,
        vec![
            assigned(showed_today("100", "Ng")),
            stale,
            calendar_today,
            future.clone(),
            sink.clone(),
        ],
    );

    let result: TransitionResult = apply(&roster, Command::FinalizeAttendance, today()).unwrap();
    let finalized: Roster = result.new_roster;

    assert!(finalized.is_finalized_on(today()));
    let stale = finalized.worker(&number("103")).unwrap();
    assert_eq!(stale.booking_status, BookingStatus::NoShow);
    assert_eq!(stale.no_shows, 3);
    assert_eq!(stale.assignment, Assignment::Unassigned);
    let calendar_today = finalized.worker(&number("104")).unwrap();
    assert_eq!(calendar_today.booking_status, BookingStatus::NoShow);
    assert_eq!(calendar_today.no_shows, 1);

    assert_eq!(finalized.worker(&number("105")).unwrap(), &future);
    assert_eq!(finalized.worker(&number("106")).unwrap(), &sink);
    assert!(matches!(
        finalized.worker(&number("100")).unwrap().booking_status,
        BookingStatus::Today { .. }
    ));
}

#[test]
fn test_finalize_is_idempotent() {
    let roster: Roster =
        create_test_roster(SeasonType::Individual, vec![booked_today("100", "Ng")]);

    let first: TransitionResult = apply(&roster, Command::FinalizeAttendance, today()).unwrap();
    let second: TransitionResult =
        apply(&first.new_roster, Command::FinalizeAttendance, today()).unwrap();

    assert!(first.is_change());
    assert!(!second.is_change());
    assert_eq!(second.new_roster.worker(&number("100")).unwrap().no_shows, 1);
}

#[test]
fn test_modify_keeps_no_shows_and_reopens_day() {
    let roster: Roster = create_test_roster(
        SeasonType::Individual,
        vec![booked_today("100", "Ng"), booked_today("101", "Ortiz")],
    );
    let finalized: Roster = apply(&roster, Command::FinalizeAttendance, today())
        .unwrap()
        .new_roster;

    let reopened: TransitionResult =
        apply(&finalized, Command::ModifyAttendance, today()).unwrap();

    assert!(reopened.is_change());
    assert!(!reopened.new_roster.is_finalized_on(today()));
    for worker in &reopened.new_roster.workers {
        assert_eq!(worker.booking_status, BookingStatus::NoShow);
        assert_eq!(worker.no_shows, 1);
    }
}

#[test]
fn test_modify_when_not_finalized_changes_nothing() {
    let roster: Roster =
        create_test_roster(SeasonType::Individual, vec![booked_today("100", "Ng")]);

    let result: TransitionResult = apply(&roster, Command::ModifyAttendance, today()).unwrap();

    assert!(!result.is_change());
    assert_eq!(result.new_roster, roster);
}

#[test]
fn test_refinalize_after_modify_rechecks_assignments() {
    let roster: Roster = create_test_roster(
        SeasonType::Individual,
        vec![assigned(showed_today("100", "Ng"))],
    );
    let finalized: Roster = apply(&roster, Command::FinalizeAttendance, today())
        .unwrap()
        .new_roster;
    let reopened: Roster = apply(&finalized, Command::ModifyAttendance, today())
        .unwrap()
        .new_roster;
    let cleared: Roster = apply(
        &reopened,
        Command::AssignRouteManager {
            worker_number: number("100"),
            manager: None,
        },
        today(),
    )
    .unwrap()
    .new_roster;

    let err: CoreError = apply(&cleared, Command::FinalizeAttendance, today()).unwrap_err();

    assert_eq!(err, CoreError::UnassignedWorkers { count: 1 });
}
