//! Calendar-day key used for every date-keyed lookup.
//!
//! # Responsibility
//! - Represent one local calendar day without a time component.
//! - Serialize as `YYYY-MM-DD` for stored blobs and CLI input.
//!
//! # Invariants
//! - Equality is calendar-day equality; no timezone is attached.
//! - Parsing rejects anything that is not a zero-padded `YYYY-MM-DD` day.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Calendar day in `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

/// Error returned when a day key cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayKeyError {
    input: String,
}

impl Display for DayKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid day `{}`; expected YYYY-MM-DD", self.input)
    }
}

impl Error for DayKeyError {}

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a day from year/month/day parts, `None` when the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// Day immediately before this one.
    pub fn previous(self) -> Self {
        self.offset(-1)
    }

    /// Day shifted by `days` (negative values go back in time).
    pub fn offset(self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Short English weekday label (`Mon`..`Sun`).
    pub fn weekday_label(self) -> String {
        self.0.format("%a").to_string()
    }

    /// Day number counted from the common era, used for stable rotation.
    pub fn ordinal(self) -> i32 {
        self.0.num_days_from_ce()
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = DayKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        // chrono accepts non-padded fields; stored keys must compare as text too.
        if trimmed.len() != 10 {
            return Err(DayKeyError {
                input: value.to_string(),
            });
        }
        NaiveDate::parse_from_str(trimmed, DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DayKeyError {
                input: value.to_string(),
            })
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::DayKey;

    #[test]
    fn parse_and_display_use_zero_padded_form() {
        let day: DayKey = "2024-03-05".parse().unwrap();
        assert_eq!(day.to_string(), "2024-03-05");
        assert!("2024-3-5".parse::<DayKey>().is_err());
        assert!("2024-02-30".parse::<DayKey>().is_err());
    }

    #[test]
    fn previous_crosses_month_and_year_boundaries() {
        let day = DayKey::from_ymd(2024, 1, 1).unwrap();
        assert_eq!(day.previous().to_string(), "2023-12-31");
        assert_eq!(day.offset(-6).to_string(), "2023-12-26");
    }

    #[test]
    fn weekday_label_is_short_english_name() {
        let monday = DayKey::from_ymd(2024, 6, 3).unwrap();
        assert_eq!(monday.weekday_label(), "Mon");
    }

    #[test]
    fn serde_uses_plain_string() {
        let day = DayKey::from_ymd(2024, 6, 3).unwrap();
        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, "\"2024-06-03\"");
        let back: DayKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, day);
    }
}
