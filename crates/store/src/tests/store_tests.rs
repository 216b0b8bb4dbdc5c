// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::day;
use crate::{PersistenceError, StorageKey, Store};
use doorbook_domain::{CalendarDay, Worker, WorkerNumber};
use doorbook_events::{ChangeEvent, ChangeNotifier};
use tokio::sync::broadcast::error::TryRecvError;

#[test]
fn test_missing_key_returns_default() {
    let mut store: Store = Store::in_memory(ChangeNotifier::new());

    let workers: Vec<Worker> = store.get(StorageKey::ConsoleWorkers, Vec::new()).unwrap();
    let marker: Option<CalendarDay> = store.get_optional(StorageKey::LastAppDate).unwrap();

    assert!(workers.is_empty());
    assert_eq!(marker, None);
}

#[test]
fn test_values_round_trip_as_json() {
    let mut store: Store = Store::in_memory(ChangeNotifier::new());
    let workers: Vec<Worker> = vec![Worker::new(WorkerNumber::new("100"), "Ana", "Ng")];

    store.set(StorageKey::ConsoleWorkers, &workers).unwrap();
    store.set(StorageKey::LastAppDate, &day("2026-06-15")).unwrap();

    let loaded: Vec<Worker> = store.get(StorageKey::ConsoleWorkers, Vec::new()).unwrap();
    assert_eq!(loaded, workers);
    assert_eq!(
        store.get_optional::<CalendarDay>(StorageKey::LastAppDate).unwrap(),
        Some(day("2026-06-15"))
    );
    assert!(store.contains(StorageKey::LastAppDate).unwrap());
}

#[test]
fn test_set_announces_the_written_key() {
    let notifier: ChangeNotifier = ChangeNotifier::new();
    let mut rx = notifier.subscribe();
    let mut store: Store = Store::in_memory(notifier);

    store
        .set(StorageKey::AttendanceFinalizedOn(day("2026-06-15")), "true")
        .unwrap();

    assert_eq!(
        rx.try_recv().unwrap(),
        ChangeEvent::KeyWritten {
            key: String::from("attendanceFinalized_2026-06-15"),
        }
    );
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn test_remove_announces_only_present_keys() {
    let notifier: ChangeNotifier = ChangeNotifier::new();
    let mut store: Store = Store::in_memory(notifier.clone());
    store.set(StorageKey::RouteAssignments, &[1, 2, 3]).unwrap();
    let mut rx = notifier.subscribe();

    assert!(store.remove(StorageKey::RouteAssignments).unwrap());
    assert!(!store.remove(StorageKey::RouteAssignments).unwrap());

    assert_eq!(
        rx.try_recv().unwrap().key(),
        Some("routeAssignments")
    );
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn test_set_by_name_rejects_unknown_keys() {
    let notifier: ChangeNotifier = ChangeNotifier::new();
    let mut rx = notifier.subscribe();
    let mut store: Store = Store::in_memory(notifier);

    let err: PersistenceError = store
        .set_by_name("theme", &serde_json::json!("dark"))
        .unwrap_err();
    let key: StorageKey = store
        .set_by_name("mapAssignments", &serde_json::json!({"R12": "100"}))
        .unwrap();

    assert_eq!(err, PersistenceError::UnrecognizedKey(String::from("theme")));
    assert_eq!(key, StorageKey::MapAssignments);
    assert_eq!(rx.try_recv().unwrap().key(), Some("mapAssignments"));
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn test_undecodable_value_is_a_serialization_error() {
    let mut store: Store = Store::in_memory(ChangeNotifier::new());
    store.set(StorageKey::LastAppDate, "not a date").unwrap();

    let result = store.get_optional::<CalendarDay>(StorageKey::LastAppDate);

    assert!(matches!(
        result,
        Err(PersistenceError::SerializationError(_))
    ));
}

#[test]
fn test_archived_days_are_distinct_and_sorted() {
    let mut store: Store = Store::in_memory(ChangeNotifier::new());
    store
        .set(StorageKey::AttendanceFinalizedOn(day("2026-06-15")), "true")
        .unwrap();
    store
        .set(StorageKey::RouteAssignmentsOn(day("2026-06-15")), &[1])
        .unwrap();
    store
        .set(StorageKey::MapAssignmentsOn(day("2026-06-12")), &[1])
        .unwrap();
    store.set(StorageKey::LastAppDate, &day("2026-06-16")).unwrap();

    assert_eq!(
        store.archived_days().unwrap(),
        vec![day("2026-06-12"), day("2026-06-15")]
    );
}
