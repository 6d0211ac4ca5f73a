//! Day-keyed records attached to a habit: completions and notes.
//!
//! # Invariants
//! - At most one completion per `(habit_id, date)`.
//! - At most one note per `(habit_id, date)`; re-saving keeps `id` and
//!   `created_at`.

use super::day::DayKey;
use super::habit::HabitId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CompletionId = Uuid;
pub type NoteId = Uuid;

/// Record that a habit was done on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    pub id: CompletionId,
    pub habit_id: HabitId,
    pub date: DayKey,
    /// Instant of the toggle that created this record.
    pub completed_at: DateTime<Utc>,
}

impl Completion {
    pub fn new(habit_id: HabitId, date: DayKey, completed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            habit_id,
            date,
            completed_at,
        }
    }

    pub fn matches(&self, habit_id: HabitId, date: DayKey) -> bool {
        self.habit_id == habit_id && self.date == date
    }
}

/// Free-text journal entry for one habit on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitNote {
    pub id: NoteId,
    pub habit_id: HabitId,
    pub date: DayKey,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl HabitNote {
    pub fn new(
        habit_id: HabitId,
        date: DayKey,
        note: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            habit_id,
            date,
            note: note.into(),
            created_at,
        }
    }

    pub fn matches(&self, habit_id: HabitId, date: DayKey) -> bool {
        self.habit_id == habit_id && self.date == date
    }
}
