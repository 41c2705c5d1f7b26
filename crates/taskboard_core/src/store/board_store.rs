//! Board state store.
//!
//! # Responsibility
//! - Hold the committed column -> task list mapping.
//! - Provide task CRUD and wholesale board replacement.
//! - Persist the full board after every mutation.
//!
//! # Invariants
//! - Generated task ids never collide with ids seen by this store.
//! - Missing, unreadable or malformed storage loads as the empty board.
//! - Persist failures are logged and swallowed.
//! - While the last persist failed, storage is stale and never re-read over
//!   the in-memory board.

use crate::model::board::{Board, Column};
use crate::model::task::{normalize_title, Task, TaskId, TaskValidationError};
use crate::repo::board_repo::{decode_board, encode_board, BoardStorage, BOARD_STORAGE_KEY};
use log::{debug, error, info, warn};
use std::collections::HashSet;

/// Committed board plus the storage it is persisted to.
pub struct BoardStore<S: BoardStorage> {
    storage: S,
    board: Board,
    issued_ids: HashSet<TaskId>,
    /// Set when the last persist failed.
    unsaved: bool,
}

impl<S: BoardStorage> BoardStore<S> {
    /// Opens a store and loads the persisted board.
    pub fn open(storage: S) -> Self {
        let board = read_board(&storage).unwrap_or_default();
        info!(
            "event=store_open module=store status=ok tasks={}",
            board.total_len()
        );
        let issued_ids = collect_ids(&board);
        Self {
            storage,
            board,
            issued_ids,
            unsaved: false,
        }
    }

    /// Committed board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Underlying storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the persisted board, falling back to the empty board.
    ///
    /// Does not touch in-memory state.
    pub fn load(&self) -> Board {
        read_board(&self.storage).unwrap_or_default()
    }

    /// Whether the in-memory board has changes the storage does not hold.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Replaces the committed board with the persisted record.
    ///
    /// The in-memory board is kept when no usable record exists or when the
    /// last persist failed.
    pub fn reload(&mut self) -> &Board {
        if self.unsaved {
            warn!("event=store_reload module=store status=skipped reason=unsaved_changes");
            return &self.board;
        }
        match read_board(&self.storage) {
            Some(board) => {
                self.issued_ids.extend(collect_ids(&board));
                self.board = board;
                info!("event=store_reload module=store status=ok");
            }
            None => {
                warn!("event=store_reload module=store status=skipped reason=no_usable_record");
            }
        }
        &self.board
    }

    /// Appends a new task to `column`.
    ///
    /// # Errors
    /// - `UnknownColumn` when `column` is not a known wire id.
    /// - `EmptyTitle` when `title` is blank after trim.
    pub fn add_task(
        &mut self,
        column: &str,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Task, TaskValidationError> {
        let column = Column::parse(column)?;
        let id = self.fresh_id();
        let task = Task::with_id(id, title, description)?;

        self.issued_ids.insert(task.id.clone());
        self.board.column_mut(column).push(task.clone());
        debug!(
            "event=task_add module=store status=ok column={} task_id={}",
            column, task.id
        );
        self.persist();
        Ok(task)
    }

    /// Removes `task_id` from `column`. Missing tasks are ignored.
    pub fn delete_task(&mut self, column: &str, task_id: &TaskId) {
        let Ok(column) = Column::parse(column) else {
            debug!("event=task_delete module=store status=skipped reason=unknown_column");
            return;
        };

        let tasks = self.board.column_mut(column);
        let before = tasks.len();
        tasks.retain(|task| &task.id != task_id);
        if tasks.len() == before {
            debug!(
                "event=task_delete module=store status=noop column={} task_id={}",
                column, task_id
            );
        }
        self.persist();
    }

    /// Applies a partial update to the task `task_id` in `column`.
    ///
    /// Omitted fields are left unchanged. Missing tasks are ignored.
    ///
    /// # Errors
    /// - `EmptyTitle` when `new_title` is supplied but blank; nothing changes.
    pub fn update_task(
        &mut self,
        column: &str,
        task_id: &TaskId,
        new_title: Option<&str>,
        new_description: Option<&str>,
    ) -> Result<(), TaskValidationError> {
        let Ok(column) = Column::parse(column) else {
            debug!("event=task_update module=store status=skipped reason=unknown_column");
            return Ok(());
        };
        let new_title = new_title
            .map(|title| normalize_title(title.to_string()))
            .transpose()?;

        match self
            .board
            .column_mut(column)
            .iter_mut()
            .find(|task| &task.id == task_id)
        {
            Some(task) => {
                if let Some(title) = new_title {
                    task.title = title;
                }
                if let Some(description) = new_description {
                    task.description = description.to_string();
                }
            }
            None => debug!(
                "event=task_update module=store status=noop column={} task_id={}",
                column, task_id
            ),
        }
        self.persist();
        Ok(())
    }

    /// Replaces all three columns in one step.
    ///
    /// Repeated task ids in `board` keep only their first occurrence.
    pub fn replace_board(&mut self, board: Board) {
        let (board, dropped) = board.normalized();
        if dropped > 0 {
            warn!(
                "event=board_replace module=store status=degraded reason=duplicate_ids dropped={}",
                dropped
            );
        }
        self.issued_ids.extend(collect_ids(&board));
        self.board = board;
        self.persist();
    }

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = TaskId::generate();
            if !self.issued_ids.contains(&id) {
                return id;
            }
        }
    }

    fn persist(&mut self) {
        let result = encode_board(&self.board)
            .and_then(|raw| self.storage.write_record(BOARD_STORAGE_KEY, &raw));
        match result {
            Ok(()) => {
                self.unsaved = false;
                debug!("event=board_persist module=store status=ok");
            }
            Err(err) => {
                self.unsaved = true;
                error!(
                    "event=board_persist module=store status=error error={}",
                    err
                );
            }
        }
    }
}

fn read_board<S: BoardStorage>(storage: &S) -> Option<Board> {
    match storage.read_record(BOARD_STORAGE_KEY) {
        Ok(Some(raw)) => match decode_board(&raw) {
            Ok(board) => Some(board),
            Err(err) => {
                warn!("event=board_load module=store status=degraded error={}", err);
                None
            }
        },
        Ok(None) => {
            debug!("event=board_load module=store status=empty");
            None
        }
        Err(err) => {
            error!("event=board_load module=store status=error error={}", err);
            None
        }
    }
}

fn collect_ids(board: &Board) -> HashSet<TaskId> {
    board
        .iter()
        .flat_map(|(_, tasks)| tasks.iter().map(|task| task.id.clone()))
        .collect()
}
