//! Habit domain model.
//!
//! # Responsibility
//! - Define the user-defined recurring activity record.
//! - Provide the caller-side builder that normalizes user input.
//!
//! # Invariants
//! - `id` is stable and never reused for another habit.
//! - A habit is immutable after creation; only deletion changes it.
//! - `name` is non-empty. This is enforced by `NewHabit::new`, not by the
//!   tracker's `add_habit`.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Stable identifier of a habit.
pub type HabitId = Uuid;

/// Fixed set of habit categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitCategory {
    Health,
    Fitness,
    Productivity,
    Learning,
    Social,
    Mindfulness,
    Creativity,
    Other,
}

impl HabitCategory {
    pub const ALL: [HabitCategory; 8] = [
        Self::Health,
        Self::Fitness,
        Self::Productivity,
        Self::Learning,
        Self::Social,
        Self::Mindfulness,
        Self::Creativity,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Fitness => "fitness",
            Self::Productivity => "productivity",
            Self::Learning => "learning",
            Self::Social => "social",
            Self::Mindfulness => "mindfulness",
            Self::Creativity => "creativity",
            Self::Other => "other",
        }
    }

    /// Preset color name assigned to new habits of this category.
    pub fn preset_color(self) -> &'static str {
        match self {
            Self::Health => "green",
            Self::Fitness => "red",
            Self::Productivity => "blue",
            Self::Learning => "purple",
            Self::Social => "pink",
            Self::Mindfulness => "teal",
            Self::Creativity => "orange",
            Self::Other => "gray",
        }
    }

    /// Preset icon assigned to new habits of this category.
    pub fn preset_icon(self) -> &'static str {
        match self {
            Self::Health => "🩺",
            Self::Fitness => "💪",
            Self::Productivity => "⚡",
            Self::Learning => "📚",
            Self::Social => "👥",
            Self::Mindfulness => "🧘",
            Self::Creativity => "🎨",
            Self::Other => "📋",
        }
    }
}

impl Display for HabitCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for HabitCategory {
    type Err = HabitValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| HabitValidationError::UnknownCategory(value.to_string()))
    }
}

/// How often a habit is meant to be done.
///
/// Streaks and weekly rates currently score both variants with daily
/// consecutiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFrequency {
    #[default]
    Daily,
    Weekly,
}

impl TargetFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl Display for TargetFrequency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TargetFrequency {
    type Err = HabitValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            _ => Err(HabitValidationError::UnknownFrequency(value.to_string())),
        }
    }
}

/// Validation errors raised while building habit input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    EmptyName,
    UnknownCategory(String),
    UnknownFrequency(String),
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "habit name cannot be empty"),
            Self::UnknownCategory(value) => write!(
                f,
                "unknown category `{value}`; expected health|fitness|productivity|learning|social|mindfulness|creativity|other"
            ),
            Self::UnknownFrequency(value) => {
                write!(f, "unknown frequency `{value}`; expected daily|weekly")
            }
        }
    }
}

impl Error for HabitValidationError {}

/// Persisted habit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub category: HabitCategory,
    /// Color name (e.g. `green`), free-form for renderers.
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub target_frequency: TargetFrequency,
}

/// User-supplied fields for a habit that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub category: HabitCategory,
    pub color: String,
    pub icon: String,
    pub target_frequency: TargetFrequency,
}

impl NewHabit {
    /// Normalizes the name and fills color/icon from category presets.
    ///
    /// # Errors
    /// - `EmptyName` when the name is blank after trimming.
    pub fn new(
        name: &str,
        category: HabitCategory,
        target_frequency: TargetFrequency,
    ) -> Result<Self, HabitValidationError> {
        let name = normalize_habit_name(name);
        if name.is_empty() {
            return Err(HabitValidationError::EmptyName);
        }

        Ok(Self {
            name,
            category,
            color: category.preset_color().to_string(),
            icon: category.preset_icon().to_string(),
            target_frequency,
        })
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Materializes the record with a fresh id and creation instant.
    pub fn into_habit(self, created_at: DateTime<Utc>) -> Habit {
        Habit {
            id: Uuid::new_v4(),
            name: self.name,
            category: self.category,
            color: self.color,
            icon: self.icon,
            created_at,
            target_frequency: self.target_frequency,
        }
    }
}

/// Trims and collapses internal whitespace runs to single spaces.
pub fn normalize_habit_name(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
}
