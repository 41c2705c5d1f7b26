//! Task domain model.
//!
//! # Responsibility
//! - Define the task record stored in board columns.
//! - Validate user-supplied task fields before they reach the board.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is never blank after trim.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque task identifier.
///
/// Fresh ids are UUID v4 strings. Ids read back from storage are accepted as
/// any non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing identifier string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Validation errors for task creation and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Column identifier is not one of `TODO|IN_PROGRESS|DONE`.
    UnknownColumn(String),
    /// Title is empty after trim.
    EmptyTitle,
    /// Task id is empty.
    EmptyId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownColumn(value) => write!(
                f,
                "unknown column `{value}`; expected TODO|IN_PROGRESS|DONE"
            ),
            Self::EmptyTitle => write!(f, "task title must not be blank"),
            Self::EmptyId => write!(f, "task id must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Free-form body. Older records may omit it.
    #[serde(default)]
    pub description: String,
}

impl Task {
    /// Creates a task with a generated id.
    ///
    /// # Errors
    /// - Returns `EmptyTitle` when `title` is blank after trim.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(TaskId::generate(), title, description)
    }

    /// Creates a task with a caller-provided id.
    ///
    /// The stored title is trimmed.
    pub fn with_id(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        let title = normalize_title(title.into())?;
        let task = Self {
            id,
            title,
            description: description.into(),
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks task invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.as_str().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Trims a title and rejects blank input.
pub fn normalize_title(title: String) -> Result<String, TaskValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    if trimmed.len() == title.len() {
        return Ok(title);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{normalize_title, Task, TaskId, TaskValidationError};

    #[test]
    fn new_task_trims_title_and_generates_id() {
        let task = Task::new("  Fix bug  ", "").unwrap();
        assert_eq!(task.title, "Fix bug");
        assert!(!task.id.as_str().is_empty());
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = Task::new("   ", "body").unwrap_err();
        assert_eq!(err, TaskValidationError::EmptyTitle);
        assert_eq!(
            normalize_title("\t".to_string()).unwrap_err(),
            TaskValidationError::EmptyTitle
        );
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = Task::with_id(TaskId::new(""), "title", "").unwrap_err();
        assert_eq!(err, TaskValidationError::EmptyId);
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(TaskId::generate(), TaskId::generate());
    }

    #[test]
    fn missing_description_deserializes_as_empty() {
        let task: Task = serde_json::from_str(r#"{"id":"a1","title":"x"}"#).unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.id, TaskId::from("a1"));
    }
}
