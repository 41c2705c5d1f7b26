//! Core domain logic for the task board.
//! This crate is the single source of truth for board invariants.

pub mod db;
pub mod drag;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use drag::commit::{reconcile, CommitResult};
pub use drag::session::{DragOutcome, DragSession};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::board::{Board, Column, DragTarget};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::board_repo::{
    BoardStorage, RepoError, RepoResult, SqliteBoardStorage, BOARD_STORAGE_KEY,
};
pub use service::board_service::BoardService;
pub use store::board_store::BoardStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
