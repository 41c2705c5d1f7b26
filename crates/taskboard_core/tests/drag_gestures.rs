use std::cell::{Cell, RefCell};
use taskboard_core::{
    reconcile, Board, BoardService, BoardStorage, BoardStore, Column, CommitResult, DragOutcome,
    RepoResult, Task, TaskId,
};

/// In-memory storage that counts persisted writes.
#[derive(Default)]
struct CountingStorage {
    record: RefCell<Option<String>>,
    writes: Cell<usize>,
}

impl BoardStorage for CountingStorage {
    fn read_record(&self, _key: &str) -> RepoResult<Option<String>> {
        Ok(self.record.borrow().clone())
    }

    fn write_record(&self, _key: &str, value: &str) -> RepoResult<()> {
        self.writes.set(self.writes.get() + 1);
        *self.record.borrow_mut() = Some(value.to_string());
        Ok(())
    }
}

fn task(id: &str) -> Task {
    Task::with_id(TaskId::new(id), id.to_uppercase(), "").unwrap()
}

fn ids(board: &Board, column: Column) -> Vec<&str> {
    board
        .column(column)
        .iter()
        .map(|task| task.id.as_str())
        .collect()
}

fn service_with(storage: &CountingStorage, board: Board) -> BoardService<&CountingStorage> {
    let mut service = BoardService::new(storage);
    service.replace_board(board);
    service
}

fn abc_board() -> Board {
    Board::new().with_column(Column::Todo, vec![task("a"), task("b"), task("c")])
}

#[test]
fn drop_on_self_is_noop_without_persist() {
    let storage = CountingStorage::default();
    let mut service = service_with(&storage, abc_board());
    let before = service.board().clone();
    let writes_before = storage.writes.get();

    assert!(service.gesture_start("b"));
    service.gesture_over("b");
    assert_eq!(service.gesture_end(Some("b")), CommitResult::Unchanged);

    assert_eq!(service.board(), &before);
    assert_eq!(storage.writes.get(), writes_before);
    assert!(!service.drag_session().is_dragging());
}

#[test]
fn cross_column_drop_onto_task_inserts_at_its_position() {
    let storage = CountingStorage::default();
    let mut service = service_with(
        &storage,
        Board::new()
            .with_column(Column::Todo, vec![task("x"), task("y")])
            .with_column(Column::InProgress, vec![task("z")]),
    );
    let writes_before = storage.writes.get();

    assert!(service.gesture_start("x"));
    assert!(service.gesture_over("z"));
    assert_eq!(service.gesture_end(Some("z")), CommitResult::Committed);

    let board = service.board();
    assert_eq!(ids(board, Column::Todo), vec!["y"]);
    assert_eq!(ids(board, Column::InProgress), vec!["x", "z"]);
    assert_eq!(board.total_len(), 3);
    assert_eq!(storage.writes.get(), writes_before + 1);
    assert_eq!(&service.load(), board);
}

#[test]
fn reorder_first_to_after_last() {
    let storage = CountingStorage::default();
    let mut service = service_with(&storage, abc_board());

    service.gesture_start("a");
    service.gesture_over("c");
    assert_eq!(service.gesture_end(Some("c")), CommitResult::Committed);

    assert_eq!(ids(service.board(), Column::Todo), vec!["b", "c", "a"]);
}

#[test]
fn reorder_last_to_before_first() {
    let storage = CountingStorage::default();
    let mut service = service_with(&storage, abc_board());

    service.gesture_start("c");
    service.gesture_over("a");
    assert_eq!(service.gesture_end(Some("a")), CommitResult::Committed);

    assert_eq!(ids(service.board(), Column::Todo), vec!["c", "a", "b"]);
}

#[test]
fn view_tracks_working_copy_until_commit() {
    let storage = CountingStorage::default();
    let mut service = service_with(&storage, abc_board());

    service.gesture_start("a");
    service.gesture_over("DONE");

    assert_eq!(ids(service.view(), Column::Done), vec!["a"]);
    assert_eq!(ids(service.board(), Column::Todo), vec!["a", "b", "c"]);
    assert_eq!(
        service.drag_session().active_task().map(|task| task.title.as_str()),
        Some("A")
    );

    service.gesture_end(Some("DONE"));
    assert_eq!(service.view(), service.board());
    assert_eq!(ids(service.board(), Column::Done), vec!["a"]);
}

#[test]
fn end_without_target_discards_all_splices() {
    let storage = CountingStorage::default();
    let mut service = service_with(&storage, abc_board());
    let before = service.board().clone();
    let writes_before = storage.writes.get();

    service.gesture_start("a");
    service.gesture_over("IN_PROGRESS");
    service.gesture_over("DONE");
    assert_eq!(service.gesture_end(None), CommitResult::Discarded);

    assert_eq!(service.board(), &before);
    assert_eq!(service.view(), &before);
    assert_eq!(storage.writes.get(), writes_before);
}

#[test]
fn end_over_stale_identifier_discards() {
    let storage = CountingStorage::default();
    let mut service = service_with(&storage, abc_board());
    let before = service.board().clone();

    service.gesture_start("a");
    assert_eq!(service.gesture_end(Some("gone")), CommitResult::Discarded);
    assert_eq!(service.board(), &before);
}

#[test]
fn start_on_unknown_task_is_ignored() {
    let storage = CountingStorage::default();
    let mut service = service_with(&storage, abc_board());

    assert!(!service.gesture_start("ghost"));
    assert!(!service.gesture_over("DONE"));
    assert_eq!(service.gesture_end(Some("DONE")), CommitResult::Discarded);
}

#[test]
fn move_back_to_source_column_is_unchanged() {
    let storage = CountingStorage::default();
    let mut service = service_with(&storage, abc_board());
    let writes_before = storage.writes.get();

    service.gesture_start("c");
    service.gesture_over("DONE");
    service.gesture_over("TODO");
    assert_eq!(service.gesture_end(Some("TODO")), CommitResult::Unchanged);

    assert_eq!(ids(service.board(), Column::Todo), vec!["a", "b", "c"]);
    assert_eq!(storage.writes.get(), writes_before);
}

#[test]
fn delete_during_drag_takes_repair_path() {
    let storage = CountingStorage::default();
    let mut service = service_with(&storage, abc_board());

    service.gesture_start("a");
    service.gesture_over("DONE");
    service.delete_task("TODO", "b");
    assert_eq!(service.gesture_end(Some("DONE")), CommitResult::Repaired);

    let board = service.board();
    assert_eq!(ids(board, Column::Todo), vec!["a", "c"]);
    assert!(board.column(Column::Done).is_empty());
    assert!(!board.contains(&TaskId::new("b")));
}

#[test]
fn reconcile_refuses_duplicated_task() {
    let storage = CountingStorage::default();
    let mut store = BoardStore::open(&storage);
    store.replace_board(
        Board::new()
            .with_column(Column::Todo, vec![task("a")])
            .with_column(Column::Done, vec![task("b")]),
    );
    let before = store.board().clone();

    let corrupted = Board::new()
        .with_column(Column::Todo, vec![task("a")])
        .with_column(Column::Done, vec![task("a"), task("b")]);
    let result = reconcile(&mut store, DragOutcome::Moved { working: corrupted });

    assert_eq!(result, CommitResult::Repaired);
    assert_eq!(store.board(), &before);
}

#[test]
fn reconcile_refuses_vanished_task() {
    let storage = CountingStorage::default();
    let mut store = BoardStore::open(&storage);
    store.replace_board(abc_board());

    let lossy = Board::new().with_column(Column::Todo, vec![task("a"), task("b")]);
    let result = reconcile(&mut store, DragOutcome::Moved { working: lossy });

    assert_eq!(result, CommitResult::Repaired);
    assert_eq!(store.board().len(Column::Todo), 3);
}

#[test]
fn reorder_commit_only_touches_its_column() {
    let storage = CountingStorage::default();
    let mut store = BoardStore::open(&storage);
    store.replace_board(
        Board::new()
            .with_column(Column::Todo, vec![task("a"), task("b")])
            .with_column(Column::Done, vec![task("c")]),
    );

    // Other columns in the working copy are ignored for a reorder.
    let working = Board::new().with_column(Column::Todo, vec![task("b"), task("a")]);
    let result = reconcile(
        &mut store,
        DragOutcome::Reordered {
            column: Column::Todo,
            working,
        },
    );

    assert_eq!(result, CommitResult::Committed);
    assert_eq!(ids(store.board(), Column::Todo), vec!["b", "a"]);
    assert_eq!(ids(store.board(), Column::Done), vec!["c"]);
}

#[test]
fn restarting_gesture_discards_previous_working_copy() {
    let storage = CountingStorage::default();
    let mut service = service_with(&storage, abc_board());

    service.gesture_start("a");
    service.gesture_over("DONE");
    assert!(service.gesture_start("b"));

    assert_eq!(ids(service.view(), Column::Todo), vec!["a", "b", "c"]);
    assert_eq!(
        service.drag_session().active_task_id(),
        Some(&TaskId::new("b"))
    );
    service.gesture_cancel();
    assert_eq!(service.view(), service.board());
}
