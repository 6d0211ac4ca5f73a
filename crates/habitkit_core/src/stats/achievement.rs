//! Achievement catalog and unlock bookkeeping.
//!
//! # Invariants
//! - The catalog is a closed set; each entry pairs static metadata with a
//!   pure predicate over `AchievementStats`.
//! - `unlocked` is recomputed on every refresh and may turn false again.
//! - `unlocked_at` keeps the first unlock instant once set.

use super::GlobalStats;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Inputs every achievement predicate is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStats {
    pub total_habits: usize,
    pub perfect_days: usize,
    pub max_streak: u32,
    pub total_completions: usize,
    pub weekly_average: f64,
}

impl AchievementStats {
    pub fn from_global(total_habits: usize, global: &GlobalStats) -> Self {
        Self {
            total_habits,
            perfect_days: global.perfect_days,
            max_streak: global.max_streak,
            total_completions: global.total_completions,
            weekly_average: global.weekly_average,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstHabit,
    PerfectDay,
    StreakMaster,
    HabitCollector,
    ConsistencyKing,
    PowerUser,
}

impl AchievementId {
    pub const ALL: [AchievementId; 6] = [
        Self::FirstHabit,
        Self::PerfectDay,
        Self::StreakMaster,
        Self::HabitCollector,
        Self::ConsistencyKing,
        Self::PowerUser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstHabit => "first_habit",
            Self::PerfectDay => "perfect_day",
            Self::StreakMaster => "streak_master",
            Self::HabitCollector => "habit_collector",
            Self::ConsistencyKing => "consistency_king",
            Self::PowerUser => "power_user",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::FirstHabit => "Getting Started",
            Self::PerfectDay => "Perfect Day",
            Self::StreakMaster => "Streak Master",
            Self::HabitCollector => "Habit Collector",
            Self::ConsistencyKing => "Consistency Champion",
            Self::PowerUser => "Power User",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::FirstHabit => "Create your first habit",
            Self::PerfectDay => "Complete all habits in a single day",
            Self::StreakMaster => "Maintain a 7-day streak on any habit",
            Self::HabitCollector => "Create 5 different habits",
            Self::ConsistencyKing => "Complete habits for 30 days total",
            Self::PowerUser => "Maintain 80% completion rate for a week",
        }
    }

    /// Badge color name for renderers.
    pub fn color(self) -> &'static str {
        match self {
            Self::FirstHabit => "blue",
            Self::PerfectDay => "yellow",
            Self::StreakMaster => "orange",
            Self::HabitCollector => "green",
            Self::ConsistencyKing => "purple",
            Self::PowerUser => "pink",
        }
    }

    pub fn is_met(self, stats: &AchievementStats) -> bool {
        match self {
            Self::FirstHabit => stats.total_habits >= 1,
            Self::PerfectDay => stats.perfect_days >= 1,
            Self::StreakMaster => stats.max_streak >= 7,
            Self::HabitCollector => stats.total_habits >= 5,
            Self::ConsistencyKing => stats.total_completions >= 30,
            Self::PowerUser => stats.weekly_average >= 80.0,
        }
    }
}

/// Evaluated state of one achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStatus {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Remembers first-unlock instants across refreshes.
#[derive(Debug, Clone, Default)]
pub struct AchievementBook {
    first_unlocked: HashMap<AchievementId, DateTime<Utc>>,
    statuses: Vec<AchievementStatus>,
}

impl AchievementBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-evaluates every predicate and returns ids unlocked for the first time.
    pub fn refresh(&mut self, stats: &AchievementStats, now: DateTime<Utc>) -> Vec<AchievementId> {
        let mut newly_unlocked = Vec::new();
        let statuses: Vec<AchievementStatus> = AchievementId::ALL
            .into_iter()
            .map(|id| {
                let unlocked = id.is_met(stats);
                if unlocked && !self.first_unlocked.contains_key(&id) {
                    self.first_unlocked.insert(id, now);
                    newly_unlocked.push(id);
                }
                AchievementStatus {
                    id,
                    title: id.title(),
                    description: id.description(),
                    color: id.color(),
                    unlocked,
                    unlocked_at: self.first_unlocked.get(&id).copied(),
                }
            })
            .collect();
        self.statuses = statuses;
        newly_unlocked
    }

    /// Statuses from the latest refresh, in catalog order.
    pub fn statuses(&self) -> &[AchievementStatus] {
        &self.statuses
    }

    pub fn unlocked_count(&self) -> usize {
        self.statuses.iter().filter(|status| status.unlocked).count()
    }
}
