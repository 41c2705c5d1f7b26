//! Board record storage contract, SQLite implementation and JSON codec.
//!
//! # Responsibility
//! - Store one serialized board under a fixed key.
//! - Encode boards losslessly and decode stored records leniently.
//!
//! # Invariants
//! - Well-formed records round-trip unchanged.
//! - Malformed columns or entries are dropped, never surfaced as errors.
//! - Decoded boards never contain a task id twice.

use crate::db::DbError;
use crate::model::board::{Board, Column};
use crate::model::task::Task;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key holding the serialized board.
pub const BOARD_STORAGE_KEY: &str = "task-state";

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-level failure for board record reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialize(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize board: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted board data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Synchronous key-value storage used for board persistence.
pub trait BoardStorage {
    /// Returns the raw record for `key`, or `None` when absent.
    fn read_record(&self, key: &str) -> RepoResult<Option<String>>;
    /// Inserts or overwrites the record for `key`.
    fn write_record(&self, key: &str, value: &str) -> RepoResult<()>;
}

impl<T: BoardStorage + ?Sized> BoardStorage for &T {
    fn read_record(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read_record(key)
    }

    fn write_record(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).write_record(key, value)
    }
}

/// SQLite-backed key-value storage over the `kv_store` table.
pub struct SqliteBoardStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBoardStorage<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BoardStorage for SqliteBoardStorage<'_> {
    fn read_record(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_record(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Serializes a board into its persisted JSON shape.
pub fn encode_board(board: &Board) -> RepoResult<String> {
    serde_json::to_string(board).map_err(RepoError::Serialize)
}

/// Decodes a persisted board record.
///
/// Per-column and per-entry problems are repaired in place: a column that is
/// absent or not an array becomes empty, entries that are not valid tasks are
/// skipped, and repeated ids keep only their first occurrence.
///
/// # Errors
/// - `InvalidData` when the record is not JSON or not a JSON object.
pub fn decode_board(raw: &str) -> RepoResult<Board> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| RepoError::InvalidData(format!("record is not valid JSON: {err}")))?;
    let Value::Object(mut record) = value else {
        return Err(RepoError::InvalidData(
            "record is not a JSON object".to_string(),
        ));
    };

    let mut board = Board::new();
    for column in Column::ALL {
        let tasks = match record.remove(column.as_str()) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => decode_entries(column, entries),
            Some(_) => {
                warn!(
                    "event=board_decode module=repo status=degraded column={} reason=not_an_array",
                    column
                );
                Vec::new()
            }
        };
        board.set_column(column, tasks);
    }

    let (board, dropped) = board.normalized();
    if dropped > 0 {
        warn!(
            "event=board_decode module=repo status=degraded reason=duplicate_ids dropped={}",
            dropped
        );
    }
    Ok(board)
}

fn decode_entries(column: Column, entries: Vec<Value>) -> Vec<Task> {
    let total = entries.len();
    let tasks: Vec<Task> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<Task>(entry).ok())
        .filter(|task| task.validate().is_ok())
        .collect();

    let skipped = total - tasks.len();
    if skipped > 0 {
        warn!(
            "event=board_decode module=repo status=degraded column={} reason=invalid_entries skipped={}",
            column, skipped
        );
    }
    tasks
}
