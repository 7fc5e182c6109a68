use std::collections::BTreeMap;

use swot::{PlannerData, PlannerStore, StoreError, Task, TaskUpdate};
use tempfile::TempDir;

fn temp_store() -> (TempDir, PlannerStore) {
    let dir = TempDir::new().expect("temp dir should be created");
    let store =
        PlannerStore::new(dir.path().join("planner_data.json")).expect("store should open");
    (dir, store)
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn task_id(store: &PlannerStore, name: &str) -> String {
    store
        .data()
        .expect("data should load")
        .tasks
        .iter()
        .find(|t| t.name == name)
        .map(|t| t.id.clone())
        .expect("task should exist")
}

#[test]
fn load_initializes_missing_file_with_empty_document() {
    let (dir, store) = temp_store();

    let data = store.load().expect("load should initialize");
    assert_eq!(data, PlannerData::default());
    // The empty document is persisted, not just returned
    let on_disk = std::fs::read_to_string(dir.path().join("planner_data.json")).unwrap();
    let parsed: PlannerData = serde_json::from_str(&on_disk).unwrap();
    assert_eq!(parsed, PlannerData::default());
}

#[test]
fn load_fails_on_unparseable_document() {
    let (dir, store) = temp_store();
    std::fs::write(dir.path().join("planner_data.json"), "{not json").unwrap();

    let err = store.load().expect_err("corrupt file should fail");
    assert!(matches!(err, StoreError::Parse(_)));
}

#[test]
fn save_then_load_round_trips_structurally() {
    let (_dir, store) = temp_store();

    let mut journal = BTreeMap::new();
    journal.insert("2026-08-29".to_string(), "revised chapter 3".to_string());
    let doc = PlannerData {
        tasks: vec![Task::new(
            "read notes".to_string(),
            "2026-09-01".to_string(),
            Some("missing-subject".to_string()),
        )],
        subjects: Vec::new(),
        journal,
        completion_log: BTreeMap::new(),
    };

    store.save(&doc).expect("save should succeed");
    assert_eq!(store.load().expect("load should succeed"), doc);
}

#[test]
fn add_and_delete_preserve_count_and_insertion_order() {
    let (_dir, store) = temp_store();

    for name in ["alpha", "beta", "gamma"] {
        store
            .add_task(name.to_string(), String::new(), None)
            .unwrap();
    }
    let beta = task_id(&store, "beta");
    store.delete_task(&beta).unwrap();

    let names: Vec<String> = store
        .data()
        .unwrap()
        .tasks
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["alpha".to_string(), "gamma".to_string()]);
}

#[test]
fn update_after_delete_is_a_silent_noop() {
    let (_dir, store) = temp_store();
    store
        .add_task("doomed".to_string(), String::new(), None)
        .unwrap();
    let id = task_id(&store, "doomed");
    store.delete_task(&id).unwrap();

    store
        .update_task(TaskUpdate {
            id,
            completed: Some(true),
            ..Default::default()
        })
        .expect("missing target must still succeed");

    let data = store.data().unwrap();
    assert!(data.tasks.is_empty());
    assert!(data.journal.is_empty());
}

#[test]
fn delete_task_twice_is_not_an_error() {
    let (_dir, store) = temp_store();
    store
        .add_task("once".to_string(), String::new(), None)
        .unwrap();
    let id = task_id(&store, "once");
    store.delete_task(&id).unwrap();
    store.delete_task(&id).expect("second delete is a no-op");
}

#[test]
fn update_merges_only_present_fields() {
    let (_dir, store) = temp_store();
    store
        .add_task("physics revision".to_string(), "2026-09-05".to_string(), None)
        .unwrap();
    let id = task_id(&store, "physics revision");

    store
        .update_task(TaskUpdate {
            id: id.clone(),
            date: Some("2026-09-06".to_string()),
            ..Default::default()
        })
        .unwrap();

    let task = store.data().unwrap().tasks.remove(0);
    assert_eq!(task.id, id);
    assert_eq!(task.name, "physics revision");
    assert_eq!(task.date, "2026-09-06");
    assert!(!task.completed);
}

#[test]
fn completing_a_task_logs_it_to_todays_journal() {
    let (_dir, store) = temp_store();
    store
        .add_task("finish essay".to_string(), String::new(), None)
        .unwrap();
    let id = task_id(&store, "finish essay");

    store
        .update_task(TaskUpdate {
            id,
            completed: Some(true),
            ..Default::default()
        })
        .unwrap();

    let entry = store.journal_entry(&today()).unwrap();
    assert_eq!(entry, "Completed tasks:\n- finish essay\n");
}

#[test]
fn completing_the_same_task_twice_logs_exactly_once() {
    let (_dir, store) = temp_store();
    store
        .add_task("flashcards".to_string(), String::new(), None)
        .unwrap();
    let id = task_id(&store, "flashcards");

    for _ in 0..2 {
        store
            .update_task(TaskUpdate {
                id: id.clone(),
                completed: Some(true),
                ..Default::default()
            })
            .unwrap();
    }

    let entry = store.journal_entry(&today()).unwrap();
    assert_eq!(entry.matches("- flashcards\n").count(), 1);
}

#[test]
fn two_distinct_tasks_with_the_same_name_each_get_a_line() {
    let (_dir, store) = temp_store();
    store
        .add_task("review".to_string(), String::new(), None)
        .unwrap();
    store
        .add_task("review".to_string(), String::new(), None)
        .unwrap();

    for task in store.data().unwrap().tasks {
        store
            .update_task(TaskUpdate {
                id: task.id,
                completed: Some(true),
                ..Default::default()
            })
            .unwrap();
    }

    let entry = store.journal_entry(&today()).unwrap();
    assert_eq!(entry.matches("- review\n").count(), 2);
}

#[test]
fn increment_pomodoro_counts_each_session() {
    let (_dir, store) = temp_store();
    store
        .add_task("deep work".to_string(), String::new(), None)
        .unwrap();
    let id = task_id(&store, "deep work");

    for _ in 0..4 {
        store.increment_pomodoro(&id).unwrap();
    }
    // Unknown id is absorbed without touching anything
    store.increment_pomodoro("no-such-task").unwrap();

    assert_eq!(store.data().unwrap().tasks[0].pomodoro_sessions, 4);
}

#[test]
fn add_chapter_to_missing_subject_changes_nothing_but_succeeds() {
    let (_dir, store) = temp_store();
    store.add_subject("History".to_string()).unwrap();

    store
        .add_chapter("not-a-subject", "The Interregnum".to_string())
        .expect("missing subject must still succeed");

    let subjects = store.data().unwrap().subjects;
    assert_eq!(subjects.len(), 1);
    assert!(subjects[0].chapters.is_empty());
}

#[test]
fn delete_subject_discards_chapters_but_leaves_dangling_task_references() {
    let (_dir, store) = temp_store();
    store.add_subject("Biology".to_string()).unwrap();
    let subject_id = store.data().unwrap().subjects[0].id.clone();
    store
        .add_chapter(&subject_id, "Cell division".to_string())
        .unwrap();
    store
        .add_task(
            "label diagrams".to_string(),
            String::new(),
            Some(subject_id.clone()),
        )
        .unwrap();

    store.delete_subject(&subject_id).unwrap();

    let data = store.data().unwrap();
    assert!(data.subjects.is_empty());
    assert_eq!(data.tasks.len(), 1);
    // The reference dangles; the UI renders it as "N/A"
    assert_eq!(data.tasks[0].subject_id.as_deref(), Some(subject_id.as_str()));
}

#[test]
fn delete_chapter_is_a_noop_when_either_id_is_absent() {
    let (_dir, store) = temp_store();
    store.add_subject("Maths".to_string()).unwrap();
    let subject_id = store.data().unwrap().subjects[0].id.clone();
    store
        .add_chapter(&subject_id, "Integration".to_string())
        .unwrap();
    let chapter_id = store.data().unwrap().subjects[0].chapters[0].id.clone();

    store.delete_chapter(&subject_id, "wrong-chapter").unwrap();
    store.delete_chapter("wrong-subject", &chapter_id).unwrap();
    assert_eq!(store.data().unwrap().subjects[0].chapters.len(), 1);

    store.delete_chapter(&subject_id, &chapter_id).unwrap();
    assert!(store.data().unwrap().subjects[0].chapters.is_empty());
}

#[test]
fn journal_entry_for_unknown_date_is_empty() {
    let (_dir, store) = temp_store();
    assert_eq!(store.journal_entry("1999-12-31").unwrap(), "");
}

#[test]
fn save_journal_replaces_a_plain_entry() {
    let (_dir, store) = temp_store();

    store.save_journal("hello".to_string()).unwrap();
    assert_eq!(store.journal_entry(&today()).unwrap(), "hello");

    store.save_journal("rewritten".to_string()).unwrap();
    assert_eq!(store.journal_entry(&today()).unwrap(), "rewritten");
}

#[test]
fn save_journal_prepends_above_logged_completions() {
    let (_dir, store) = temp_store();

    let mut doc = store.load().unwrap();
    doc.journal
        .insert(today(), "Completed tasks:\n- X\n".to_string());
    store.save(&doc).unwrap();

    store.save_journal("hello".to_string()).unwrap();
    assert_eq!(
        store.journal_entry(&today()).unwrap(),
        "hello\n\nCompleted tasks:\n- X\n"
    );
}

#[test]
fn completion_lines_survive_a_later_journal_save() {
    let (_dir, store) = temp_store();
    store
        .add_task("memorize verbs".to_string(), String::new(), None)
        .unwrap();
    let id = task_id(&store, "memorize verbs");
    store
        .update_task(TaskUpdate {
            id,
            completed: Some(true),
            ..Default::default()
        })
        .unwrap();

    store.save_journal("long day".to_string()).unwrap();

    let entry = store.journal_entry(&today()).unwrap();
    assert!(entry.starts_with("long day\n\nCompleted tasks:"));
    assert!(entry.contains("- memorize verbs\n"));
}
