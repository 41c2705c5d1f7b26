//! Domain model for the task board.
//!
//! # Responsibility
//! - Define canonical task, column and board structures.
//! - Provide pure list-splicing helpers shared by store and drag logic.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - A task id appears at most once across all board columns.

pub mod board;
pub mod task;
