// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::{Action, ChangeEvent, ChangeNotifier};
use doorbook_domain::{CalendarDay, WorkerNumber};
use tokio::sync::broadcast::error::TryRecvError;

fn key_written(key: &str) -> ChangeEvent {
    ChangeEvent::KeyWritten {
        key: String::from(key),
    }
}

#[test]
fn test_action_creation_with_details() {
    let action: Action = Action::new(
        String::from("MarkShowed"),
        Some(String::from("Marked 1001 as showed")),
    );

    assert_eq!(action.name, "MarkShowed");
    assert_eq!(action.details.as_deref(), Some("Marked 1001 as showed"));
}

#[test]
fn test_notifier_creation() {
    let notifier: ChangeNotifier = ChangeNotifier::new();
    assert_eq!(notifier.subscriber_count(), 0);
}

#[test]
fn test_notify_without_subscribers_does_not_panic() {
    let notifier: ChangeNotifier = ChangeNotifier::new();
    notifier.notify(&key_written("console_workers"));
}

#[test]
fn test_notify_with_subscriber() {
    let notifier: ChangeNotifier = ChangeNotifier::new();
    let mut rx = notifier.subscribe();

    notifier.notify(&key_written("console_workers"));

    match rx.try_recv() {
        Ok(ChangeEvent::KeyWritten { key }) => assert_eq!(key, "console_workers"),
        other => panic!("Expected KeyWritten, got {other:?}"),
    }
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn test_multiple_subscribers_each_receive_events() {
    let notifier: ChangeNotifier = ChangeNotifier::new();
    let mut rx1 = notifier.subscribe();
    let mut rx2 = notifier.subscribe();

    notifier.notify(&ChangeEvent::KeyRemoved {
        key: String::from("routeAssignments"),
    });

    assert!(matches!(rx1.try_recv(), Ok(ChangeEvent::KeyRemoved { .. })));
    assert!(matches!(rx2.try_recv(), Ok(ChangeEvent::KeyRemoved { .. })));
}

#[test]
fn test_slow_subscriber_lags_instead_of_blocking() {
    let notifier: ChangeNotifier = ChangeNotifier::with_capacity(2);
    let mut rx = notifier.subscribe();

    for key in ["a", "b", "c", "d"] {
        notifier.notify(&key_written(key));
    }

    assert!(matches!(rx.try_recv(), Err(TryRecvError::Lagged(2))));
    assert_eq!(rx.try_recv().unwrap().key(), Some("c"));
}

#[test]
fn test_roster_event_serializes_with_type_tag() {
    let event: ChangeEvent = ChangeEvent::roster_changed(
        Action::new(String::from("FinalizeAttendance"), None),
        CalendarDay::from_ymd(2026, 6, 3).unwrap(),
        vec![WorkerNumber::new("1001")],
    );

    let json: serde_json::Value = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "roster_changed");
    assert_eq!(json["date"], "2026-06-03");
    assert_eq!(json["affected"][0], "1001");
    assert_eq!(event.key(), None);
}
