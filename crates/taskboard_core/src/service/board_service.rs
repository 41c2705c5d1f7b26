//! Board use-case service.
//!
//! # Responsibility
//! - Expose the task mutation contract and gesture callbacks to UI callers.
//! - Route finished gestures through the commit reconciler.
//! - Provide the board to render: working copy mid-gesture, committed otherwise.
//!
//! # Invariants
//! - Methods take `&mut self`, so events are handled one at a time.
//! - Identifiers from callers are opaque; unresolved ones are silent no-ops.

use crate::drag::commit::{reconcile, CommitResult};
use crate::drag::session::DragSession;
use crate::model::board::Board;
use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::repo::board_repo::BoardStorage;
use crate::store::board_store::BoardStore;

/// Caller-facing facade over one board.
pub struct BoardService<S: BoardStorage> {
    store: BoardStore<S>,
    drag: DragSession,
}

impl<S: BoardStorage> BoardService<S> {
    /// Opens the board persisted in `storage`.
    pub fn new(storage: S) -> Self {
        Self::from_store(BoardStore::open(storage))
    }

    pub fn from_store(store: BoardStore<S>) -> Self {
        Self {
            store,
            drag: DragSession::new(),
        }
    }

    /// Committed board.
    pub fn board(&self) -> &Board {
        self.store.board()
    }

    /// Board to render right now.
    pub fn view(&self) -> &Board {
        self.drag
            .working_board()
            .unwrap_or_else(|| self.store.board())
    }

    /// Re-reads the persisted board without changing session state.
    pub fn load(&self) -> Board {
        self.store.load()
    }

    pub fn store(&self) -> &BoardStore<S> {
        &self.store
    }

    pub fn drag_session(&self) -> &DragSession {
        &self.drag
    }

    /// Creates a task at the end of `column`.
    pub fn add_task(
        &mut self,
        column: &str,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Task, TaskValidationError> {
        self.store.add_task(column, title, description)
    }

    pub fn delete_task(&mut self, column: &str, task_id: &str) {
        self.store.delete_task(column, &TaskId::new(task_id));
    }

    /// Partially updates title and/or description.
    pub fn update_task(
        &mut self,
        column: &str,
        task_id: &str,
        new_title: Option<&str>,
        new_description: Option<&str>,
    ) -> Result<(), TaskValidationError> {
        self.store
            .update_task(column, &TaskId::new(task_id), new_title, new_description)
    }

    pub fn replace_board(&mut self, board: Board) {
        self.store.replace_board(board);
    }

    /// Picks up `task_id`. Returns `false` when it is not on the board.
    pub fn gesture_start(&mut self, task_id: &str) -> bool {
        self.drag.on_gesture_start(self.store.board(), task_id)
    }

    /// Pointer moved over `target`. Returns whether the view changed.
    pub fn gesture_over(&mut self, target: &str) -> bool {
        self.drag.on_gesture_over(target)
    }

    /// Drops over `target` (or nowhere) and commits the result.
    pub fn gesture_end(&mut self, target: Option<&str>) -> CommitResult {
        let outcome = self.drag.on_gesture_end(target);
        reconcile(&mut self.store, outcome)
    }

    pub fn gesture_cancel(&mut self) {
        self.drag.cancel();
    }
}
