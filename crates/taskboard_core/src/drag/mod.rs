//! Drag-and-drop gesture handling.
//!
//! # Responsibility
//! - Model one gesture as an explicit `Idle -> Dragging -> Idle` machine.
//! - Reconcile a finished gesture against the committed board.
//!
//! # Invariants
//! - Gesture events are processed serially; there is at most one session.
//! - Commits always replace the full board in one store call.

pub mod commit;
pub mod session;
