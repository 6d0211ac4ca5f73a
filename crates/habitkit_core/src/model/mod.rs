//! Domain model for habits and their day-keyed records.
//!
//! # Responsibility
//! - Define the canonical persisted shapes (habits, completions, notes).
//! - Keep calendar-day keys separate from audit instants.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - Date-keyed lookups compare `DayKey` values, never instants.

pub mod day;
pub mod entry;
pub mod habit;
