//! Core use-case services.
//!
//! # Responsibility
//! - Combine the board store and drag session into one caller-facing API.
//! - Keep presentation layers decoupled from storage and gesture internals.

pub mod board_service;
