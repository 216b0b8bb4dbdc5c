// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use crate::{Args, CliCommand, commands};
use clap::Parser;
use doorbook::FixedClock;
use doorbook_console::{ConsoleConfig, ConsoleSession, InMemoryBookings};
use doorbook_domain::{BookingStatus, CalendarDay, SeasonType, Worker, WorkerNumber};
use doorbook_events::ChangeNotifier;
use doorbook_store::{StorageKey, Store};
use serde_json::Value;
use std::path::PathBuf;

fn today() -> CalendarDay {
    "2026-06-15".parse().unwrap()
}

fn open_session(clock: &FixedClock) -> ConsoleSession<&FixedClock> {
    let mut worker: Worker = Worker::new(WorkerNumber::new("100"), "Ana", "Ng");
    worker.booking_status = BookingStatus::Today {
        booked_date: today(),
    };

    let mut store: Store = Store::in_memory(ChangeNotifier::new());
    store.set(StorageKey::ConsoleWorkers, &vec![worker]).unwrap();

    ConsoleSession::open(
        store,
        clock,
        ConsoleConfig::new(7, SeasonType::Individual),
        InMemoryBookings::new(Vec::new()),
    )
    .unwrap()
}

#[test]
fn test_global_options_follow_the_subcommand() {
    let args: Args = Args::try_parse_from([
        "doorbook",
        "payout-preview",
        "--bookings",
        "export.csv",
        "--database",
        "console.db",
        "--utc-offset",
        "-5",
    ])
    .unwrap();

    assert_eq!(args.database, Some(PathBuf::from("console.db")));
    assert_eq!(args.utc_offset, -5);
    assert!(matches!(
        args.command,
        CliCommand::PayoutPreview { ref bookings } if bookings == &PathBuf::from("export.csv")
    ));
}

#[test]
fn test_board_alias_and_missing_subcommand() {
    let args: Args = Args::try_parse_from(["doorbook", "board"]).unwrap();
    assert!(matches!(args.command, CliCommand::Roster));

    assert!(Args::try_parse_from(["doorbook"]).is_err());
}

#[test]
fn test_first_rollover_reports_first_run() {
    let clock: FixedClock = FixedClock::new(today());
    let mut session = open_session(&clock);

    let output: Value = commands::run(&mut session, &CliCommand::Rollover).unwrap();

    assert_eq!(output["outcome"], "firstRun");
    assert_eq!(output["today"], "2026-06-15");
}

#[test]
fn test_mark_showed_prompts_for_next_booking() {
    let clock: FixedClock = FixedClock::new(today());
    let mut session = open_session(&clock);

    let output: Value = commands::run(
        &mut session,
        &CliCommand::MarkShowed {
            worker_number: String::from("100"),
        },
    )
    .unwrap();

    assert_eq!(output["changed"], true);
    assert_eq!(output["followUp"]["prompt"], "chooseNextBooking");
    assert_eq!(output["followUp"]["workerNumber"], "100");
    assert_eq!(output["persistence"], "Persisted");
}

#[test]
fn test_finalize_moves_absent_workers_to_no_show() {
    let clock: FixedClock = FixedClock::new(today());
    let mut session = open_session(&clock);

    commands::run(&mut session, &CliCommand::Finalize).unwrap();
    let board: Value = commands::run(&mut session, &CliCommand::Roster).unwrap();

    assert_eq!(board["finalized"], true);
    assert_eq!(board["booked"], serde_json::json!([]));
    assert_eq!(board["no_show"][0]["worker_number"], "100");
    assert_eq!(board["no_show"][0]["no_shows"], 1);
}

#[test]
fn test_unknown_worker_is_an_error() {
    let clock: FixedClock = FixedClock::new(today());
    let mut session = open_session(&clock);

    let result = commands::run(
        &mut session,
        &CliCommand::MarkShowed {
            worker_number: String::from("999"),
        },
    );

    assert!(result.is_err());
}

#[test]
fn test_import_workers_from_a_sheet() {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "doorbook_cli_import_{}.csv",
        std::process::id()
    ));
    std::fs::write(
        &path,
        "Id,First,Last,Cell,Home,Email,Address,City,Status,Days,A,R,S,C,Shuttle\n\
         100,Ana,Ng,,,,,,Alumni,,,,,,\n\
         200,Ben,Oduya,,,,,,Rookie,4,,,,,\n",
    )
    .unwrap();

    let clock: FixedClock = FixedClock::new(today());
    let mut session = open_session(&clock);
    let output: Value = commands::run(
        &mut session,
        &CliCommand::ImportWorkers { sheet: path.clone() },
    )
    .unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(output["added"], 1);
    assert_eq!(output["skippedExisting"], 1);
    assert_eq!(session.roster().workers.len(), 2);
}

#[test]
fn test_assign_takes_a_manager_or_a_cart() {
    let args: Args =
        Args::try_parse_from(["doorbook", "assign", "100", "--manager", "Dana Whitfield"])
            .unwrap();
    assert!(matches!(
        args.command,
        CliCommand::Assign { ref manager, cart: None, .. }
            if manager.as_deref() == Some("Dana Whitfield")
    ));

    let args: Args = Args::try_parse_from(["doorbook", "assign", "100", "--cart", "2"]).unwrap();
    assert!(matches!(
        args.command,
        CliCommand::Assign {
            manager: None,
            cart: Some(2),
            ..
        }
    ));

    assert!(Args::try_parse_from(["doorbook", "assign", "100"]).is_err());
    assert!(
        Args::try_parse_from(["doorbook", "assign", "100", "-m", "Dana", "--cart", "1"]).is_err()
    );
}

#[test]
fn test_a_worked_day_can_be_closed_from_the_command_line() {
    let clock: FixedClock = FixedClock::new(today());
    let mut session = open_session(&clock);

    commands::run(
        &mut session,
        &CliCommand::MarkShowed {
            worker_number: String::from("100"),
        },
    )
    .unwrap();
    let assigned: Value = commands::run(
        &mut session,
        &CliCommand::Assign {
            worker_number: String::from("100"),
            manager: Some(String::from("Dana Whitfield")),
            cart: None,
        },
    )
    .unwrap();
    let finalized: Value = commands::run(&mut session, &CliCommand::Finalize).unwrap();

    assert_eq!(assigned["changed"], true);
    assert_eq!(finalized["changed"], true);
    assert!(session.roster().is_finalized_on(today()));
    let board: Value = commands::run(&mut session, &CliCommand::Roster).unwrap();
    assert_eq!(board["showed"][0]["worker_number"], "100");
    assert_eq!(board["no_show"], serde_json::json!([]));
}

#[test]
fn test_cart_zero_is_rejected() {
    let clock: FixedClock = FixedClock::new(today());
    let mut session = open_session(&clock);

    let result = commands::run(
        &mut session,
        &CliCommand::Assign {
            worker_number: String::from("100"),
            manager: None,
            cart: Some(0),
        },
    );

    assert!(result.is_err());
}
