//! Habit state manager.
//!
//! # Responsibility
//! - Own the habit, completion and note collections for one user.
//! - Apply mutations and write the changed collections through to storage.
//! - Answer derived queries (streaks, daily/weekly stats, achievements).
//!
//! # Invariants
//! - At most one completion and one note per `(habit_id, date)`.
//! - Deleting a habit removes every completion and note that references it.
//! - Unknown ids in delete, toggle and note-save operations are silent no-ops.
//! - A mutation returns only after its snapshot write completed.
//!
//! # See also
//! - `crate::stats` for the pure statistics functions.

use crate::clock::{Clock, SystemClock};
use crate::model::day::DayKey;
use crate::model::entry::{Completion, HabitNote, NoteId};
use crate::model::habit::{Habit, HabitCategory, HabitId, NewHabit};
use crate::stats::achievement::{AchievementBook, AchievementId, AchievementStats, AchievementStatus};
use crate::stats::calendar::{month_calendar, MonthCalendar};
use crate::stats::insight::{insights, quote_of_the_day, Insight, Quote};
use crate::stats::{self, GlobalStats, StatsInput, TodayStats, WeeklyEntry};
use crate::store::kv::KeyValueStore;
use crate::store::snapshot::SnapshotStore;
use crate::store::StoreError;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of notes returned by `recent_notes` when callers have no preference.
pub const RECENT_NOTES_DEFAULT: usize = 5;

pub type TrackerResult<T> = Result<T, TrackerError>;

#[derive(Debug)]
pub enum TrackerError {
    /// Loading or writing a snapshot failed.
    Store(StoreError),
    /// Requested calendar month does not exist.
    InvalidMonth { year: i32, month: u32 },
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidMonth { year, month } => write!(f, "invalid month {year}-{month:02}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidMonth { .. } => None,
        }
    }
}

impl From<StoreError> for TrackerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Single owner of all habit state.
pub struct HabitTracker<S: KeyValueStore, C: Clock = SystemClock> {
    store: SnapshotStore<S>,
    clock: C,
    habits: Vec<Habit>,
    completions: Vec<Completion>,
    notes: Vec<HabitNote>,
    achievements: AchievementBook,
    last_unlocked: Vec<AchievementId>,
}

impl<S: KeyValueStore> HabitTracker<S, SystemClock> {
    /// Loads state using the local wall clock.
    pub fn open(store: S) -> TrackerResult<Self> {
        Self::load(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> HabitTracker<S, C> {
    /// Loads the three collections from `store`.
    ///
    /// # Errors
    /// - `TrackerError::Store` when a stored blob is malformed or the
    ///   backend fails. There is no recovery path.
    pub fn load(store: S, clock: C) -> TrackerResult<Self> {
        let store = SnapshotStore::new(store);
        let snapshot = store.load()?;

        let mut tracker = Self {
            store,
            clock,
            habits: snapshot.habits,
            completions: snapshot.completions,
            notes: snapshot.notes,
            achievements: AchievementBook::new(),
            last_unlocked: Vec::new(),
        };
        // Achievements already met at load are not reported as fresh unlocks.
        let stats = AchievementStats::from_global(tracker.habits.len(), &tracker.global_stats());
        tracker.achievements.refresh(&stats, tracker.clock.now());
        Ok(tracker)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn today(&self) -> DayKey {
        self.clock.today()
    }

    /// Releases the storage backend.
    pub fn into_store(self) -> S {
        self.store.into_backend()
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn completions(&self) -> &[Completion] {
        &self.completions
    }

    pub fn notes(&self) -> &[HabitNote] {
        &self.notes
    }

    pub fn habit(&self, habit_id: HabitId) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == habit_id)
    }

    /// Appends a habit with a fresh id and the current instant.
    ///
    /// `new_habit` is trusted as-is; `NewHabit::new` owns name validation.
    pub fn add_habit(&mut self, new_habit: NewHabit) -> TrackerResult<Habit> {
        let habit = new_habit.into_habit(self.clock.now());
        self.habits.push(habit.clone());
        self.store.save_habits(&self.habits)?;

        info!(
            "event=habit_add module=tracker status=ok habit_id={} category={} habits={}",
            habit.id,
            habit.category,
            self.habits.len()
        );
        self.refresh_achievements();
        Ok(habit)
    }

    /// Removes a habit with its completions and notes.
    ///
    /// Returns whether a habit with `habit_id` existed.
    pub fn delete_habit(&mut self, habit_id: HabitId) -> TrackerResult<bool> {
        let habits_before = self.habits.len();
        let completions_before = self.completions.len();
        let notes_before = self.notes.len();

        self.habits.retain(|habit| habit.id != habit_id);
        self.completions
            .retain(|completion| completion.habit_id != habit_id);
        self.notes.retain(|note| note.habit_id != habit_id);

        let removed_habit = self.habits.len() != habits_before;
        let removed_completions = completions_before - self.completions.len();
        let removed_notes = notes_before - self.notes.len();

        if !removed_habit && removed_completions == 0 && removed_notes == 0 {
            debug!("event=habit_delete module=tracker status=noop habit_id={habit_id}");
            return Ok(false);
        }

        self.store.save_habits(&self.habits)?;
        self.store.save_completions(&self.completions)?;
        self.store.save_notes(&self.notes)?;

        info!(
            "event=habit_delete module=tracker status=ok habit_id={habit_id} completions_removed={removed_completions} notes_removed={removed_notes}"
        );
        self.refresh_achievements();
        Ok(removed_habit)
    }

    /// Flips the completion state of `habit_id` on `date`.
    ///
    /// Returns `true` when the habit is completed after the call. An unknown
    /// `habit_id` is a no-op returning `false`.
    pub fn toggle_habit_completion(&mut self, habit_id: HabitId, date: DayKey) -> TrackerResult<bool> {
        if self.habit(habit_id).is_none() {
            debug!("event=completion_toggle module=tracker status=noop habit_id={habit_id}");
            return Ok(false);
        }

        let existing = self
            .completions
            .iter()
            .position(|completion| completion.matches(habit_id, date));

        let completed = match existing {
            Some(index) => {
                self.completions.remove(index);
                false
            }
            None => {
                self.completions
                    .push(Completion::new(habit_id, date, self.clock.now()));
                true
            }
        };
        self.store.save_completions(&self.completions)?;

        info!(
            "event=completion_toggle module=tracker status=ok habit_id={habit_id} date={date} completed={completed}"
        );
        self.refresh_achievements();
        Ok(completed)
    }

    /// Upserts the note for `(habit_id, date)`.
    ///
    /// An existing note keeps its `id` and `created_at`; only the text changes.
    /// Returns `None` without writing when `habit_id` is unknown.
    pub fn save_note(
        &mut self,
        habit_id: HabitId,
        date: DayKey,
        text: impl Into<String>,
    ) -> TrackerResult<Option<HabitNote>> {
        if self.habit(habit_id).is_none() {
            debug!("event=note_save module=tracker status=noop habit_id={habit_id}");
            return Ok(None);
        }

        let text = text.into();
        let (saved, created) = match self
            .notes
            .iter_mut()
            .find(|note| note.matches(habit_id, date))
        {
            Some(note) => {
                note.note = text;
                (note.clone(), false)
            }
            None => {
                let note = HabitNote::new(habit_id, date, text, self.clock.now());
                self.notes.push(note.clone());
                (note, true)
            }
        };
        self.store.save_notes(&self.notes)?;

        info!(
            "event=note_save module=tracker status=ok note_id={} habit_id={habit_id} date={date} created={created} chars={}",
            saved.id,
            saved.note.chars().count()
        );
        Ok(Some(saved))
    }

    /// Removes a note by id; returns whether it existed.
    pub fn delete_note(&mut self, note_id: NoteId) -> TrackerResult<bool> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != note_id);
        if self.notes.len() == before {
            debug!("event=note_delete module=tracker status=noop note_id={note_id}");
            return Ok(false);
        }

        self.store.save_notes(&self.notes)?;
        info!("event=note_delete module=tracker status=ok note_id={note_id}");
        Ok(true)
    }

    pub fn is_habit_completed(&self, habit_id: HabitId, date: DayKey) -> bool {
        self.completions
            .iter()
            .any(|completion| completion.matches(habit_id, date))
    }

    /// Consecutive completed days ending today; `0` when today is open.
    pub fn habit_streak(&self, habit_id: HabitId) -> u32 {
        stats::habit_streak(&self.completions, habit_id, self.today())
    }

    pub fn today_stats(&self) -> TodayStats {
        stats::today_stats(&self.stats_input())
    }

    pub fn weekly_data(&self) -> Vec<WeeklyEntry> {
        stats::weekly_data(&self.stats_input())
    }

    pub fn global_stats(&self) -> GlobalStats {
        stats::global_stats(&self.stats_input())
    }

    /// Achievement statuses as of the latest mutation.
    pub fn achievements(&self) -> &[AchievementStatus] {
        self.achievements.statuses()
    }

    /// Achievements first unlocked by the most recent mutation.
    pub fn recently_unlocked(&self) -> &[AchievementId] {
        &self.last_unlocked
    }

    /// Habits in any of `categories`; an empty filter returns all habits.
    pub fn habits_in_categories(&self, categories: &[HabitCategory]) -> Vec<&Habit> {
        self.habits
            .iter()
            .filter(|habit| categories.is_empty() || categories.contains(&habit.category))
            .collect()
    }

    pub fn note_for(&self, habit_id: HabitId, date: DayKey) -> Option<&HabitNote> {
        self.notes.iter().find(|note| note.matches(habit_id, date))
    }

    /// Notes of one habit, newest day first, at most `limit` entries.
    pub fn recent_notes(&self, habit_id: HabitId, limit: usize) -> Vec<&HabitNote> {
        let mut notes: Vec<&HabitNote> = self
            .notes
            .iter()
            .filter(|note| note.habit_id == habit_id)
            .collect();
        notes.sort_by(|left, right| right.date.cmp(&left.date));
        notes.truncate(limit);
        notes
    }

    /// Month grid of completions, optionally highlighting one habit.
    pub fn month_calendar(
        &self,
        year: i32,
        month: u32,
        habit_filter: Option<HabitId>,
    ) -> TrackerResult<MonthCalendar> {
        month_calendar(&self.completions, year, month, habit_filter, self.today())
            .ok_or(TrackerError::InvalidMonth { year, month })
    }

    pub fn insights(&self) -> Vec<Insight> {
        let input = self.stats_input();
        let today = stats::today_stats(&input);
        insights(&stats::weekly_data(&input), &today, today.global.max_streak)
    }

    pub fn quote_of_the_day(&self) -> Quote {
        quote_of_the_day(self.today())
    }

    fn stats_input(&self) -> StatsInput<'_> {
        StatsInput::new(&self.habits, &self.completions, self.today(), |instant| {
            self.clock.day_of(instant)
        })
    }

    fn refresh_achievements(&mut self) {
        let stats = AchievementStats::from_global(self.habits.len(), &self.global_stats());
        self.last_unlocked = self.achievements.refresh(&stats, self.clock.now());
        for id in &self.last_unlocked {
            info!(
                "event=achievement_unlock module=tracker status=ok achievement={}",
                id.as_str()
            );
        }
    }
}
