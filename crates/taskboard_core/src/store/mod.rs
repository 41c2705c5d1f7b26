//! Authoritative board state.
//!
//! # Responsibility
//! - Own the committed board and its durable record.
//! - Expose the task mutation contract used by the presentation layer.
//!
//! # Invariants
//! - Every mutation is followed by a synchronous persist.
//! - Persist failures never undo an in-memory mutation.

pub mod board_store;
