//! End-to-end scenarios for the task board engine: repository CRUD,
//! persistence round-trips, the drop resolver, edit sessions, and
//! corrupt-store recovery. Each test runs against its own temp store.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use taskdeck::board::drag::{DragGesture, DropOutcome};
use taskdeck::board::edit::{CommitOutcome, EditSession};
use taskdeck::board::repo::Board;
use taskdeck::board::search::visible;
use taskdeck::io::store::{Store, TASKS_KEY};
use taskdeck::model::task::{Priority, Status, Task, TaskDraft};

fn open_board(dir: &TempDir) -> Board {
    Board::open(Store::open(dir.path()).unwrap())
}

fn draft(title: &str, desc: &str) -> TaskDraft {
    TaskDraft {
        title: title.into(),
        desc: desc.into(),
        ..Default::default()
    }
}

fn stored_raw(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join(TASKS_KEY)).unwrap()
}

// ===========================================================================
// Persistence round-trips
// ===========================================================================

#[test]
fn save_then_load_reproduces_the_collection() {
    let dir = TempDir::new().unwrap();
    let mut board = open_board(&dir);

    let a = board.create(draft("Alpha", "first")).unwrap();
    let b = board
        .create(TaskDraft {
            title: "Beta".into(),
            due: "2026-09-15".parse().ok(),
            prio: Priority::P1,
            ..Default::default()
        })
        .unwrap();
    let c = board.create(draft("Gamma", "")).unwrap();

    // Mutate order and state in between
    board.set_status(&b.id, Status::InProgress).unwrap();
    board.delete(&c.id).unwrap();
    board
        .update(&a.id, draft("Alpha prime", "updated"))
        .unwrap();

    let reopened = open_board(&dir);
    let tasks: Vec<&Task> = reopened.tasks().collect();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, a.id);
    assert_eq!(tasks[0].title, "Alpha prime");
    assert_eq!(tasks[0].desc, "updated");
    assert_eq!(tasks[0].created_at, a.created_at);
    assert_eq!(tasks[1].id, b.id);
    assert_eq!(tasks[1].status, Status::InProgress);
    assert_eq!(tasks[1].due, "2026-09-15".parse().ok());
    assert_eq!(tasks[1].prio, Priority::P1);
}

#[test]
fn corrupt_store_loads_as_an_empty_board() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(TASKS_KEY), "not json at all {{{").unwrap();

    // Scenario D: no error surfaces, the board is just empty
    let board = open_board(&dir);
    assert!(board.is_empty());
}

#[test]
fn a_valid_json_non_array_also_fails_soft() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(TASKS_KEY), r#"{"id":"x"}"#).unwrap();
    let board = open_board(&dir);
    assert!(board.is_empty());
}

// ===========================================================================
// Repository semantics
// ===========================================================================

#[test]
fn scenario_a_new_task_appears_only_in_todo() {
    let dir = TempDir::new().unwrap();
    let mut board = open_board(&dir);
    let before_todo = board.count_in(Status::Todo);

    board
        .create(TaskDraft {
            title: "Write report".into(),
            prio: Priority::P1,
            ..Default::default()
        })
        .unwrap();

    assert_eq!(board.count_in(Status::Todo), before_todo + 1);
    assert_eq!(board.count_in(Status::InProgress), 0);
    assert_eq!(board.count_in(Status::Done), 0);
}

#[test]
fn set_status_persists_only_on_the_first_call() {
    let dir = TempDir::new().unwrap();
    let mut board = open_board(&dir);
    let task = board.create(draft("Alpha", "")).unwrap();

    assert!(board.set_status(&task.id, Status::InProgress).unwrap());
    let first = stored_raw(&dir);

    assert!(!board.set_status(&task.id, Status::InProgress).unwrap());
    assert_eq!(stored_raw(&dir), first);
}

#[test]
fn stale_ids_are_silent_noops_everywhere() {
    let dir = TempDir::new().unwrap();
    let mut board = open_board(&dir);
    let task = board.create(draft("Doomed", "")).unwrap();
    board.delete(&task.id).unwrap();

    // delete again
    assert!(!board.delete(&task.id).unwrap());
    // move
    assert!(!board.set_status(&task.id, Status::Done).unwrap());
    // drop
    let mut drag = DragGesture::default();
    drag.start(task.id.clone());
    assert_eq!(
        drag.drop_on(&mut board, Status::Done, None).unwrap(),
        DropOutcome::Ignored
    );
    // edit-commit
    let mut session = EditSession::default();
    assert!(!session.open(&board, &task.id));
    assert_eq!(session.commit(&mut board).unwrap(), CommitOutcome::NotEditing);
}

// ===========================================================================
// Search projection
// ===========================================================================

#[test]
fn scenario_c_search_is_scoped_per_column() {
    let dir = TempDir::new().unwrap();
    let mut board = open_board(&dir);
    board.create(draft("Alpha", "")).unwrap();
    let beta = board.create(draft("Beta", "")).unwrap();
    board.set_status(&beta.id, Status::Done).unwrap();

    let todo = visible(board.tasks(), Status::Todo, "alp");
    let done = visible(board.tasks(), Status::Done, "alp");
    let todo_titles: Vec<&str> = todo.iter().map(|t| t.title.as_str()).collect();

    assert_eq!(todo_titles, ["Alpha"]);
    assert!(done.is_empty());
}

#[test]
fn search_matches_done_tasks_by_description() {
    let dir = TempDir::new().unwrap();
    let mut board = open_board(&dir);
    let pie = board.create(draft("Bake", "apple pie")).unwrap();
    board.create(draft("Shop", "pears")).unwrap();
    board.set_status(&pie.id, Status::Done).unwrap();

    let hits = visible(board.tasks(), Status::Done, "APPLE");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, pie.id);
}

// ===========================================================================
// Drop resolver
// ===========================================================================

#[test]
fn scenario_b_drop_moves_without_touching_other_fields() {
    let dir = TempDir::new().unwrap();
    let mut board = open_board(&dir);
    let task = board.create(draft("Draft", "notes")).unwrap();

    let mut drag = DragGesture::default();
    drag.start(task.id.clone());
    let outcome = drag
        .drop_on(&mut board, Status::InProgress, None)
        .unwrap();
    drag.end();

    assert_eq!(outcome, DropOutcome::Moved);
    let moved = board.get(&task.id).unwrap();
    assert_eq!(moved.status, Status::InProgress);
    assert_eq!(moved.title, "Draft");
    assert_eq!(moved.desc, "notes");
    assert_eq!(moved.created_at, task.created_at);
}

#[test]
fn same_column_drop_never_writes_or_mutates() {
    let dir = TempDir::new().unwrap();
    let mut board = open_board(&dir);
    let task = board.create(draft("Parked", "")).unwrap();
    let raw_before = stored_raw(&dir);

    let mut drag = DragGesture::default();
    drag.start(task.id.clone());
    let outcome = drag.drop_on(&mut board, Status::Todo, None).unwrap();
    drag.end();

    assert_eq!(outcome, DropOutcome::Ignored);
    let after = board.get(&task.id).unwrap();
    assert_eq!(after.title, "Parked");
    assert_eq!(after.created_at, task.created_at);
    assert_eq!(stored_raw(&dir), raw_before);
}

// ===========================================================================
// Edit session
// ===========================================================================

#[test]
fn scenario_e_discard_leaves_no_trace() {
    let dir = TempDir::new().unwrap();
    let mut board = open_board(&dir);
    let task = board.create(draft("Stable", "desc")).unwrap();
    let snapshot: Vec<Task> = board.tasks().cloned().collect();
    let raw_before = stored_raw(&dir);

    let mut session = EditSession::default();
    assert!(session.open(&board, &task.id));
    {
        let d = session.draft_mut().unwrap();
        d.title = "Tampered".into();
        d.desc = "tampered".into();
        d.prio = Priority::P1;
    }
    session.discard();

    let after: Vec<Task> = board.tasks().cloned().collect();
    assert_eq!(snapshot, after);
    assert_eq!(stored_raw(&dir), raw_before);
}

#[test]
fn commit_against_a_deleted_task_degrades_to_a_noop() {
    let dir = TempDir::new().unwrap();
    let mut board = open_board(&dir);
    let task = board.create(draft("Ephemeral", "")).unwrap();

    let mut session = EditSession::default();
    session.open(&board, &task.id);
    session.draft_mut().unwrap().title = "Edited".into();

    // Deleted in "another tab" while the modal is open
    board.delete(&task.id).unwrap();

    assert_eq!(session.commit(&mut board).unwrap(), CommitOutcome::TaskGone);
    assert!(board.is_empty());
}

// ===========================================================================
// Cross-process visibility
// ===========================================================================

#[test]
fn a_second_board_over_the_same_store_sees_committed_writes() {
    let dir = TempDir::new().unwrap();
    let mut writer = open_board(&dir);
    let task = writer.create(draft("Shared", "")).unwrap();
    writer.set_status(&task.id, Status::Done).unwrap();

    let mut reader = open_board(&dir);
    assert_eq!(reader.get(&task.id).unwrap().status, Status::Done);

    // The writer keeps going; an explicit reload picks it up
    writer.update(&task.id, draft("Shared v2", "")).unwrap();
    reader.reload();
    assert_eq!(reader.get(&task.id).unwrap().title, "Shared v2");
}
