//! Month grid of completion activity.
//!
//! # Invariants
//! - One cell per day of the month, in order.
//! - `leading_blanks` is the weekday index of the 1st with Sunday as 0.
//! - `completions` counts every habit; `completed` honors the habit filter.

use crate::model::day::DayKey;
use crate::model::entry::Completion;
use crate::model::habit::HabitId;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: DayKey,
    pub completions: usize,
    pub completed: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

/// Builds the grid for `year`/`month`; `None` when the month does not exist.
pub fn month_calendar(
    completions: &[Completion],
    year: i32,
    month: u32,
    habit_filter: Option<HabitId>,
    today: DayKey,
) -> Option<MonthCalendar> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let leading_blanks = first.weekday().num_days_from_sunday();

    let days = first
        .iter_days()
        .take_while(|date| date.month() == month)
        .map(|date| {
            let date = DayKey::new(date);
            let on_day = completions.iter().filter(|completion| completion.date == date);
            let completed = match habit_filter {
                Some(habit_id) => on_day.clone().any(|completion| completion.habit_id == habit_id),
                None => on_day.clone().next().is_some(),
            };
            CalendarDay {
                date,
                completions: on_day.count(),
                completed,
                is_today: date == today,
            }
        })
        .collect();

    Some(MonthCalendar {
        year,
        month,
        leading_blanks,
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::month_calendar;
    use crate::model::day::DayKey;
    use crate::model::entry::Completion;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn february_leap_year_grid() {
        let today = DayKey::from_ymd(2024, 2, 10).unwrap();
        let habit_a = Uuid::new_v4();
        let habit_b = Uuid::new_v4();
        let completions = vec![
            Completion::new(habit_a, today, Utc::now()),
            Completion::new(habit_b, today, Utc::now()),
            Completion::new(habit_b, today.previous(), Utc::now()),
        ];

        let grid = month_calendar(&completions, 2024, 2, Some(habit_a), today).unwrap();
        assert_eq!(grid.days.len(), 29);
        // 2024-02-01 was a Thursday.
        assert_eq!(grid.leading_blanks, 4);

        let tenth = &grid.days[9];
        assert!(tenth.is_today);
        assert!(tenth.completed);
        assert_eq!(tenth.completions, 2);

        let ninth = &grid.days[8];
        assert!(!ninth.completed);
        assert_eq!(ninth.completions, 1);
    }

    #[test]
    fn invalid_month_is_rejected() {
        let today = DayKey::from_ymd(2024, 2, 10).unwrap();
        assert!(month_calendar(&[], 2024, 13, None, today).is_none());
    }
}
