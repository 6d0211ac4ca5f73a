//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate in-memory state, storage writes and derived statistics.
//! - Keep CLI and other front ends decoupled from storage details.

pub mod habit_tracker;
