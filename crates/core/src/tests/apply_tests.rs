// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    booked_today, create_test_roster, create_test_worker, day, number, showed_today, today,
};
use crate::{
    Command, ConfirmationCall, CoreError, FollowUp, Roster, SinkTarget, TransitionResult, apply,
};
use doorbook_domain::{
    AttendanceToday, BookingStatus, DomainError, SeasonType, TerminationReason, WillCallReason,
};
use doorbook_events::ChangeEvent;

#[test]
fn test_mark_showed_sets_attendance_and_counts_day() {
    let roster: Roster =
        create_test_roster(SeasonType::Individual, vec![booked_today("100", "Ng")]);

    let result: TransitionResult = apply(
        &roster,
        Command::MarkShowed {
            worker_number: number("100"),
        },
        today(),
    )
    .unwrap();

    let worker = result.new_roster.worker(&number("100")).unwrap();
    assert_eq!(worker.attendance, AttendanceToday::Showed { date: today() });
    assert_eq!(worker.days_worked, 1);
    assert!(matches!(worker.booking_status, BookingStatus::Today { .. }));
    assert_eq!(
        result.follow_up,
        Some(FollowUp::ChooseNextBooking {
            worker_number: number("100"),
            earliest: day("2026-06-16"),
        })
    );
}

#[test]
fn test_mark_showed_emits_roster_changed_event() {
    let roster: Roster =
        create_test_roster(SeasonType::Individual, vec![booked_today("100", "Ng")]);

    let result: TransitionResult = apply(
        &roster,
        Command::MarkShowed {
            worker_number: number("100"),
        },
        today(),
    )
    .unwrap();

    match result.event.unwrap() {
        ChangeEvent::RosterChanged {
            action,
            date,
            affected,
        } => {
            assert_eq!(action.name, "MarkShowed");
            assert!(action.details.unwrap().contains("100"));
            assert_eq!(date, today());
            assert_eq!(affected, vec![number("100")]);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_mark_showed_twice_counts_one_day() {
    let roster: Roster =
        create_test_roster(SeasonType::Individual, vec![booked_today("100", "Ng")]);
    let command = Command::MarkShowed {
        worker_number: number("100"),
    };

    let first: TransitionResult = apply(&roster, command.clone(), today()).unwrap();
    let second: TransitionResult = apply(&first.new_roster, command, today()).unwrap();

    assert!(!second.is_change());
    assert!(second.follow_up.is_some());
    assert_eq!(second.new_roster, first.new_roster);
    assert_eq!(
        second.new_roster.worker(&number("100")).unwrap().days_worked,
        1
    );
}

#[test]
fn test_mark_showed_accepts_calendar_booking_for_today() {
    let worker = create_test_worker(
        "100",
        "Ng",
        BookingStatus::Calendar {
            booked_date: today(),
        },
    );
    let roster: Roster = create_test_roster(SeasonType::Individual, vec![worker]);

    let result = apply(
        &roster,
        Command::MarkShowed {
            worker_number: number("100"),
        },
        today(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_mark_showed_rejects_worker_not_due() {
    let worker = create_test_worker(
        "100",
        "Ng",
        BookingStatus::Calendar {
            booked_date: day("2026-06-16"),
        },
    );
    let roster: Roster = create_test_roster(SeasonType::Individual, vec![worker]);

    let result = apply(
        &roster,
        Command::MarkShowed {
            worker_number: number("100"),
        },
        today(),
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::NotDueToday {
            worker_number: number("100"),
            date: today(),
        }
    );
}

#[test]
fn test_unknown_worker_is_not_found() {
    let roster: Roster = create_test_roster(SeasonType::Individual, Vec::new());

    let err: CoreError = apply(
        &roster,
        Command::MarkShowed {
            worker_number: number("404"),
        },
        today(),
    )
    .unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn test_rebook_requires_future_date() {
    let roster: Roster =
        create_test_roster(SeasonType::Individual, vec![showed_today("100", "Ng")]);

    for date in [today(), day("2026-06-01")] {
        let err: CoreError = apply(
            &roster,
            Command::Rebook {
                worker_number: number("100"),
                date,
            },
            today(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::DomainViolation(DomainError::RebookDateNotInFuture { .. })
        ));
    }
}

#[test]
fn test_rebook_to_future_date_sets_calendar_status() {
    let roster: Roster =
        create_test_roster(SeasonType::Individual, vec![showed_today("100", "Ng")]);

    let result: TransitionResult = apply(
        &roster,
        Command::Rebook {
            worker_number: number("100"),
            date: day("2026-06-18"),
        },
        today(),
    )
    .unwrap();

    let worker = result.new_roster.worker(&number("100")).unwrap();
    assert_eq!(
        worker.booking_status,
        BookingStatus::Calendar {
            booked_date: day("2026-06-18"),
        }
    );
    assert!(worker.showed_on(today()));
}

#[test]
fn test_mark_will_call_clears_booked_date() {
    let roster: Roster =
        create_test_roster(SeasonType::Individual, vec![showed_today("100", "Ng")]);

    let result: TransitionResult = apply(
        &roster,
        Command::MarkWillCall {
            worker_number: number("100"),
        },
        today(),
    )
    .unwrap();

    let status: BookingStatus = result.new_roster.worker(&number("100")).unwrap().booking_status;
    assert_eq!(
        status,
        BookingStatus::WdrTnb {
            sub_status: WillCallReason::Wdr,
        }
    );
    assert_eq!(status.booked_date(), None);
}

#[test]
fn test_bulk_move_is_all_or_nothing() {
    let roster: Roster = create_test_roster(
        SeasonType::Individual,
        vec![booked_today("100", "Ng"), booked_today("101", "Ortiz")],
    );

    let err: CoreError = apply(
        &roster,
        Command::MoveToSink {
            worker_numbers: vec![number("100"), number("999")],
            target: SinkTarget::Terminated(TerminationReason::Quit),
        },
        today(),
    )
    .unwrap_err();

    assert_eq!(err, CoreError::WorkerNotFound(number("999")));
    assert!(matches!(
        roster.worker(&number("100")).unwrap().booking_status,
        BookingStatus::Today { .. }
    ));
}

#[test]
fn test_bulk_move_to_sink_ignores_duplicates() {
    let roster: Roster = create_test_roster(
        SeasonType::Individual,
        vec![booked_today("100", "Ng"), booked_today("101", "Ortiz")],
    );

    let result: TransitionResult = apply(
        &roster,
        Command::MoveToSink {
            worker_numbers: vec![number("100"), number("101"), number("100")],
            target: SinkTarget::Terminated(TerminationReason::Fired),
        },
        today(),
    )
    .unwrap();

    for worker in &result.new_roster.workers {
        assert_eq!(
            worker.booking_status,
            BookingStatus::QuitFired {
                sub_status: TerminationReason::Fired,
            }
        );
    }
    match result.event.unwrap() {
        ChangeEvent::RosterChanged { affected, .. } => assert_eq!(affected.len(), 2),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_empty_selection_is_rejected() {
    let roster: Roster =
        create_test_roster(SeasonType::Individual, vec![booked_today("100", "Ng")]);

    let err: CoreError = apply(
        &roster,
        Command::MoveToDate {
            worker_numbers: Vec::new(),
            date: day("2026-06-20"),
        },
        today(),
    )
    .unwrap_err();

    assert_eq!(err, CoreError::EmptySelection);
}

#[test]
fn test_move_to_date_rebooks_out_of_sink() {
    let worker = create_test_worker(
        "100",
        "Ng",
        BookingStatus::WdrTnb {
            sub_status: WillCallReason::Tnb,
        },
    );
    let roster: Roster = create_test_roster(SeasonType::Individual, vec![worker]);

    let result: TransitionResult = apply(
        &roster,
        Command::MoveToDate {
            worker_numbers: vec![number("100")],
            date: day("2026-06-20"),
        },
        today(),
    )
    .unwrap();

    assert_eq!(
        result.new_roster.worker(&number("100")).unwrap().booking_status,
        BookingStatus::Calendar {
            booked_date: day("2026-06-20"),
        }
    );
}

#[test]
fn test_confirmation_applies_to_next_day_bookings() {
    let next_day = create_test_worker(
        "100",
        "Ng",
        BookingStatus::NextDay {
            booked_date: today(),
        },
    );
    let tomorrow = create_test_worker(
        "101",
        "Ortiz",
        BookingStatus::Calendar {
            booked_date: day("2026-06-16"),
        },
    );
    let roster: Roster = create_test_roster(SeasonType::Individual, vec![next_day, tomorrow]);

    let first: TransitionResult = apply(
        &roster,
        Command::RecordConfirmation {
            worker_number: number("100"),
            call: ConfirmationCall::ToggleConfirmed,
        },
        today(),
    )
    .unwrap();
    let second: TransitionResult = apply(
        &first.new_roster,
        Command::RecordConfirmation {
            worker_number: number("101"),
            call: ConfirmationCall::LeftMessage,
        },
        today(),
    )
    .unwrap();

    let roster: Roster = second.new_roster;
    assert!(roster.worker(&number("100")).unwrap().confirmation.confirmed);
    assert_eq!(
        roster.worker(&number("101")).unwrap().confirmation.left_message,
        1
    );
    assert_eq!(
        roster.worker(&number("101")).unwrap().booking_status,
        BookingStatus::Calendar {
            booked_date: day("2026-06-16"),
        }
    );
}

#[test]
fn test_confirmation_rejects_other_bookings() {
    let roster: Roster =
        create_test_roster(SeasonType::Individual, vec![booked_today("100", "Ng")]);

    let err: CoreError = apply(
        &roster,
        Command::RecordConfirmation {
            worker_number: number("100"),
            call: ConfirmationCall::NotAvailable,
        },
        today(),
    )
    .unwrap_err();

    assert_eq!(err, CoreError::NotBookedForNextDay(number("100")));
}

#[test]
fn test_finalized_day_rejects_attendance_changes() {
    let mut roster: Roster =
        create_test_roster(SeasonType::Individual, vec![booked_today("100", "Ng")]);
    roster.finalized_on = Some(today());

    let err: CoreError = apply(
        &roster,
        Command::MarkShowed {
            worker_number: number("100"),
        },
        today(),
    )
    .unwrap_err();

    assert_eq!(err, CoreError::AttendanceFinalized(today()));
}

#[test]
fn test_finalized_day_still_allows_rebooking() {
    let mut roster: Roster =
        create_test_roster(SeasonType::Individual, vec![showed_today("100", "Ng")]);
    roster.finalized_on = Some(today());

    let result = apply(
        &roster,
        Command::Rebook {
            worker_number: number("100"),
            date: day("2026-06-17"),
        },
        today(),
    );

    assert!(result.is_ok());
}
