//! Derived statistics over habits and completions.
//!
//! # Responsibility
//! - Compute streaks, daily and weekly completion rates, perfect days and
//!   global aggregates.
//!
//! # Invariants
//! - Every function is pure; "today" is always passed in explicitly.
//! - Rates are percentages in `[0, 100]`; a zero denominator yields `0`.
//! - Streaks use daily consecutiveness for every habit, weekly ones included.
//! - Weekly rates divide by the current habit count for all seven days.

pub mod achievement;
pub mod calendar;
pub mod insight;

use crate::model::day::DayKey;
use crate::model::entry::Completion;
use crate::model::habit::{Habit, HabitId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Number of days covered by the weekly series, today included.
pub const WEEK_DAYS: i64 = 7;

/// Borrowed view of the collections plus precomputed creation days.
#[derive(Debug, Clone)]
pub struct StatsInput<'a> {
    pub habits: &'a [Habit],
    pub completions: &'a [Completion],
    pub today: DayKey,
    created_days: Vec<DayKey>,
}

impl<'a> StatsInput<'a> {
    /// `day_of` maps a habit's creation instant to its local calendar day.
    pub fn new(
        habits: &'a [Habit],
        completions: &'a [Completion],
        today: DayKey,
        day_of: impl Fn(DateTime<Utc>) -> DayKey,
    ) -> Self {
        let created_days = habits.iter().map(|habit| day_of(habit.created_at)).collect();
        Self {
            habits,
            completions,
            today,
            created_days,
        }
    }
}

/// Completion summary for the current day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayStats {
    pub date: DayKey,
    pub completed_count: usize,
    pub total_habits: usize,
    pub completion_rate: f64,
    pub global: GlobalStats,
}

/// One day of the seven-day series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyEntry {
    pub date: DayKey,
    /// Short weekday label, e.g. `Mon`.
    pub day: String,
    pub completed: usize,
    pub total: usize,
    pub rate: f64,
}

/// Aggregates across all habits and all recorded history.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub weekly_average: f64,
    pub max_streak: u32,
    pub total_completions: usize,
    pub perfect_days: usize,
}

/// `part / whole * 100`, or `0` when `whole` is zero.
pub fn completion_rate(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Consecutive completed days for `habit_id`, walking back from `today`.
///
/// Returns `0` when `today` itself has no completion.
pub fn habit_streak(completions: &[Completion], habit_id: HabitId, today: DayKey) -> u32 {
    let days: HashSet<DayKey> = completions
        .iter()
        .filter(|completion| completion.habit_id == habit_id)
        .map(|completion| completion.date)
        .collect();

    let mut streak = 0;
    let mut cursor = today;
    while days.contains(&cursor) {
        streak += 1;
        cursor = cursor.previous();
    }
    streak
}

/// Number of completions recorded on `day`, across all habits.
pub fn completions_on(completions: &[Completion], day: DayKey) -> usize {
    completions
        .iter()
        .filter(|completion| completion.date == day)
        .count()
}

/// Seven entries from six days ago to `today`, oldest first.
pub fn weekly_data(input: &StatsInput<'_>) -> Vec<WeeklyEntry> {
    let total = input.habits.len();
    (0..WEEK_DAYS)
        .rev()
        .map(|days_back| {
            let date = input.today.offset(-days_back);
            let completed = completions_on(input.completions, date);
            WeeklyEntry {
                date,
                day: date.weekday_label(),
                completed,
                total,
                rate: completion_rate(completed, total),
            }
        })
        .collect()
}

/// Counts days whose completions equal the habits existing by that day.
///
/// A day with no eligible habits never counts.
pub fn perfect_days(input: &StatsInput<'_>) -> usize {
    let mut per_day: BTreeMap<DayKey, usize> = BTreeMap::new();
    for completion in input.completions {
        *per_day.entry(completion.date).or_default() += 1;
    }

    per_day
        .into_iter()
        .filter(|(day, completed)| {
            let eligible = input
                .created_days
                .iter()
                .filter(|created| *created <= day)
                .count();
            eligible > 0 && *completed == eligible
        })
        .count()
}

/// Largest current streak among all habits, `0` without habits.
pub fn max_streak(input: &StatsInput<'_>) -> u32 {
    input
        .habits
        .iter()
        .map(|habit| habit_streak(input.completions, habit.id, input.today))
        .max()
        .unwrap_or(0)
}

pub fn global_stats(input: &StatsInput<'_>) -> GlobalStats {
    let weekly = weekly_data(input);
    let weekly_average = weekly.iter().map(|entry| entry.rate).sum::<f64>() / weekly.len() as f64;

    GlobalStats {
        weekly_average,
        max_streak: max_streak(input),
        total_completions: input.completions.len(),
        perfect_days: perfect_days(input),
    }
}

pub fn today_stats(input: &StatsInput<'_>) -> TodayStats {
    let completed_count = completions_on(input.completions, input.today);
    let total_habits = input.habits.len();

    TodayStats {
        date: input.today,
        completed_count,
        total_habits,
        completion_rate: completion_rate(completed_count, total_habits),
        global: global_stats(input),
    }
}
