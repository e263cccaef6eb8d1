use std::collections::BTreeSet;

use blume::engine::Engine;
use blume::io::store::{FileStore, MemoryStore};
use blume::model::task::{RecurrenceKind, Task};
use blume::ops::task_ops::DeleteRequest;
use blume::ops::visibility;
use blume::util::dates;
use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn weekly_series_lifecycle() {
    let mut engine = Engine::new(MemoryStore::default());
    let folder_id = engine.create_folder("Work", "#FFAA00").unwrap();

    let ids = engine.create_task(
        "Wochenbericht",
        Some(&folder_id),
        None,
        dates::today(),
        Some(RecurrenceKind::Weekly),
    );
    assert_eq!(ids.len(), 52);
    assert_eq!(engine.tasks().len(), 52);

    let series_id = engine.tasks()[0].series_id.clone().expect("series id");
    assert!(
        engine
            .tasks()
            .iter()
            .all(|t| t.series_id.as_deref() == Some(series_id.as_str()))
    );
    assert!(
        engine
            .tasks()
            .iter()
            .all(|t| t.folder_id.as_deref() == Some(folder_id.as_str()))
    );
    for pair in engine.tasks().windows(2) {
        assert_eq!(pair[1].date - pair[0].date, Duration::days(7));
    }

    // deleting one instance leaves the rest of the series alone
    assert!(engine.delete_task(&ids[10]));
    assert_eq!(engine.tasks().len(), 51);
    assert!(
        engine
            .tasks()
            .iter()
            .all(|t| t.series_id.as_deref() == Some(series_id.as_str()))
    );

    // with more than one member alive, deletion requires a choice
    match engine.request_delete(&ids[0]) {
        DeleteRequest::ChoiceRequired { series_id: s, members } => {
            assert_eq!(s, series_id);
            assert_eq!(members, 51);
        }
        other => panic!("expected choice, got {other:?}"),
    }

    // taking the series-wide option removes exactly the series
    assert_eq!(engine.delete_series(&series_id), 51);
    assert!(engine.tasks().is_empty());
}

#[test]
fn overdue_carry_forward_with_original_label() {
    // task dated 2023-01-01, viewed with "today" = 2023-01-05
    let today = day("2023-01-05");
    let mut tasks = vec![Task::new(
        "1".to_string(),
        "Blumen gießen".to_string(),
        day("2023-01-01"),
    )];
    let no_filter = BTreeSet::new();

    let visible = visibility::tasks_for_day(&tasks, today, today, &no_filter);
    assert_eq!(visible.len(), 1);
    assert!(visibility::is_overdue(visible[0], today));
    assert_eq!(visibility::overdue_label(visible[0]), "1.Januar, Sonntag");

    // completing it on day 5 removes it from today's list; it remains
    // only on its original date
    tasks[0].completed = true;
    assert!(visibility::tasks_for_day(&tasks, today, today, &no_filter).is_empty());
    let original = visibility::tasks_for_day(&tasks, day("2023-01-01"), today, &no_filter);
    assert_eq!(original.len(), 1);
    assert_eq!(original[0].date, day("2023-01-01"));
}

#[test]
fn state_survives_restart_through_file_store() {
    let dir = TempDir::new().expect("tempdir");

    let folder_id;
    {
        let store = FileStore::open(dir.path()).expect("open store");
        let mut engine = Engine::new(store);
        folder_id = engine.create_folder("Privat", "#FFB6C1").unwrap();
        engine.create_task(
            "Zahnarzt",
            Some(&folder_id),
            Some("9 Uhr"),
            dates::today(),
            None,
        );
    }

    let store = FileStore::open(dir.path()).expect("reopen store");
    let engine = Engine::new(store);
    assert_eq!(engine.folders().len(), 1);
    assert_eq!(engine.folders()[0].name, "Privat");
    assert_eq!(engine.tasks().len(), 1);
    assert_eq!(engine.tasks()[0].folder_id.as_deref(), Some(folder_id.as_str()));
    assert_eq!(engine.tasks()[0].time.as_deref(), Some("9 Uhr"));
}

#[test]
fn corrupt_blob_on_disk_does_not_prevent_startup() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("blume.todos.json"), "{broken").expect("write");

    let store = FileStore::open(dir.path()).expect("open store");
    let engine = Engine::new(store);
    assert!(engine.tasks().is_empty());
}
