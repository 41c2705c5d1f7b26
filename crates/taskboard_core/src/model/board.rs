//! Board and column model.
//!
//! # Responsibility
//! - Define the fixed column enumeration and the three-column board.
//! - Resolve opaque hit-test identifiers to containers.
//! - Provide the list splicing primitives used by drag gestures.
//!
//! # Invariants
//! - Column order is `TODO`, `IN_PROGRESS`, `DONE`.
//! - Splicing helpers never duplicate or drop a task.

use crate::model::task::{Task, TaskId, TaskValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Wire id for the to-do column.
pub const COLUMN_TODO: &str = "TODO";
/// Wire id for the in-progress column.
pub const COLUMN_IN_PROGRESS: &str = "IN_PROGRESS";
/// Wire id for the done column.
pub const COLUMN_DONE: &str = "DONE";

/// Fixed board column.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Column {
    /// Default column for new tasks.
    #[default]
    #[serde(rename = "TODO")]
    Todo,
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    #[serde(rename = "DONE")]
    Done,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 3] = [Column::Todo, Column::InProgress, Column::Done];

    /// Stable wire identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => COLUMN_TODO,
            Self::InProgress => COLUMN_IN_PROGRESS,
            Self::Done => COLUMN_DONE,
        }
    }

    /// User-facing column heading.
    pub fn title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Parses a wire identifier. Matching is exact.
    pub fn parse(value: &str) -> Result<Self, TaskValidationError> {
        match value {
            COLUMN_TODO => Ok(Self::Todo),
            COLUMN_IN_PROGRESS => Ok(Self::InProgress),
            COLUMN_DONE => Ok(Self::Done),
            other => Err(TaskValidationError::UnknownColumn(other.to_string())),
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = TaskValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Resolved hit-test identifier supplied by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DragTarget {
    /// The column container itself.
    Column(Column),
    /// A task card, resolved through its owning column.
    Task(TaskId),
}

impl DragTarget {
    /// Classifies an opaque identifier.
    ///
    /// Column wire ids map to `Column`; any other non-empty string is treated
    /// as a task id. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        match Column::parse(raw) {
            Ok(column) => Some(Self::Column(column)),
            Err(_) => Some(Self::Task(TaskId::new(raw))),
        }
    }
}

/// Three-column board snapshot.
///
/// Serialized as `{"TODO": [...], "IN_PROGRESS": [...], "DONE": [...]}`;
/// absent columns deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(rename = "TODO", default)]
    todo: Vec<Task>,
    #[serde(rename = "IN_PROGRESS", default)]
    in_progress: Vec<Task>,
    #[serde(rename = "DONE", default)]
    done: Vec<Task>,
}

impl Board {
    /// Empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column assignment.
    pub fn with_column(mut self, column: Column, tasks: Vec<Task>) -> Self {
        self.set_column(column, tasks);
        self
    }

    pub fn column(&self, column: Column) -> &[Task] {
        match column {
            Column::Todo => &self.todo,
            Column::InProgress => &self.in_progress,
            Column::Done => &self.done,
        }
    }

    pub(crate) fn column_mut(&mut self, column: Column) -> &mut Vec<Task> {
        match column {
            Column::Todo => &mut self.todo,
            Column::InProgress => &mut self.in_progress,
            Column::Done => &mut self.done,
        }
    }

    pub fn set_column(&mut self, column: Column, tasks: Vec<Task>) {
        *self.column_mut(column) = tasks;
    }

    /// Task count for one column.
    pub fn len(&self, column: Column) -> usize {
        self.column(column).len()
    }

    /// Task count across all columns.
    pub fn total_len(&self) -> usize {
        Column::ALL.iter().map(|column| self.len(*column)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }

    /// Iterates columns in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Column, &[Task])> + '_ {
        Column::ALL
            .into_iter()
            .map(move |column| (column, self.column(column)))
    }

    /// Returns the column currently owning `task_id`.
    pub fn find_container(&self, task_id: &TaskId) -> Option<Column> {
        self.iter()
            .find(|(_, tasks)| tasks.iter().any(|task| &task.id == task_id))
            .map(|(column, _)| column)
    }

    /// Resolves a hit-test target to its container.
    ///
    /// A column resolves to itself, a task to its owning column.
    pub fn resolve(&self, target: &DragTarget) -> Option<Column> {
        match target {
            DragTarget::Column(column) => Some(*column),
            DragTarget::Task(task_id) => self.find_container(task_id),
        }
    }

    /// Index of `task_id` within `column`.
    pub fn position(&self, column: Column, task_id: &TaskId) -> Option<usize> {
        self.column(column)
            .iter()
            .position(|task| &task.id == task_id)
    }

    pub fn find_task(&self, task_id: &TaskId) -> Option<&Task> {
        self.iter()
            .flat_map(|(_, tasks)| tasks.iter())
            .find(|task| &task.id == task_id)
    }

    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.find_task(task_id).is_some()
    }

    /// Returns the id set, or `None` when any id occurs more than once.
    pub fn unique_task_ids(&self) -> Option<HashSet<&TaskId>> {
        let mut ids = HashSet::with_capacity(self.total_len());
        for (_, tasks) in self.iter() {
            for task in tasks {
                if !ids.insert(&task.id) {
                    return None;
                }
            }
        }
        Some(ids)
    }

    /// Returns a copy with repeated ids removed and the number dropped.
    ///
    /// The first occurrence in column display order wins.
    pub fn normalized(&self) -> (Board, usize) {
        let mut seen = HashSet::with_capacity(self.total_len());
        let mut dropped = 0;
        let mut board = Board::new();
        for (column, tasks) in self.iter() {
            let kept = board.column_mut(column);
            for task in tasks {
                if seen.insert(task.id.clone()) {
                    kept.push(task.clone());
                } else {
                    dropped += 1;
                }
            }
        }
        (board, dropped)
    }

    /// Moves `task_id` into `target`, at `index` or appended when `None`.
    ///
    /// Returns `false` without mutating when the task is not on the board.
    pub fn move_to_column(
        &mut self,
        task_id: &TaskId,
        target: Column,
        index: Option<usize>,
    ) -> bool {
        let Some(source) = self.find_container(task_id) else {
            return false;
        };
        let Some(from) = self.position(source, task_id) else {
            return false;
        };
        let task = self.column_mut(source).remove(from);
        let items = self.column_mut(target);
        let to = index.map_or(items.len(), |index| index.min(items.len()));
        items.insert(to, task);
        true
    }
}

/// Removes the element at `from` and reinserts it at `to`.
///
/// `to` is clamped to the last valid slot. Out-of-range `from` is a no-op.
pub fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}
