//! Durable storage for the board record.
//!
//! # Responsibility
//! - Define the synchronous key-value contract the board store persists through.
//! - Isolate SQLite and JSON record details from store/drag logic.
//!
//! # Invariants
//! - Reads never fail on malformed records; decoding degrades to defaults.

pub mod board_repo;
