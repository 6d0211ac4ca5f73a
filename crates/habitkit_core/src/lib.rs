//! Core domain logic for habitkit.
//! This crate is the single source of truth for habit-tracking invariants.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod stats;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::day::{DayKey, DayKeyError};
pub use model::entry::{Completion, CompletionId, HabitNote, NoteId};
pub use model::habit::{
    Habit, HabitCategory, HabitId, HabitValidationError, NewHabit, TargetFrequency,
};
pub use service::habit_tracker::{HabitTracker, TrackerError, TrackerResult, RECENT_NOTES_DEFAULT};
pub use stats::achievement::{AchievementId, AchievementStats, AchievementStatus};
pub use stats::calendar::{CalendarDay, MonthCalendar};
pub use stats::insight::{Insight, Quote};
pub use stats::{GlobalStats, TodayStats, WeeklyEntry};
pub use store::kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use store::snapshot::{CollectionKey, Snapshot, SnapshotStore};
pub use store::{StoreError, StoreResult};

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
