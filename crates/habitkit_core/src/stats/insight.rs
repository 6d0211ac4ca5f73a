//! Progress insights and the daily motivational quote.

use super::{TodayStats, WeeklyEntry};
use crate::model::day::DayKey;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Motivational quotes rotated one per calendar day.
pub const QUOTES: [Quote; 10] = [
    Quote::new("Success is the sum of small efforts repeated day in and day out.", "Robert Collier"),
    Quote::new("We are what we repeatedly do. Excellence, then, is not an act, but a habit.", "Aristotle"),
    Quote::new("The secret of getting ahead is getting started.", "Mark Twain"),
    Quote::new("Don't watch the clock; do what it does. Keep going.", "Sam Levenson"),
    Quote::new("Small daily improvements over time lead to stunning results.", "Robin Sharma"),
    Quote::new("Motivation is what gets you started. Habit is what keeps you going.", "Jim Ryun"),
    Quote::new("Champions keep playing until they get it right.", "Billie Jean King"),
    Quote::new("The only impossible journey is the one you never begin.", "Tony Robbins"),
    Quote::new("Progress, not perfection, is what we should strive for.", "Unknown"),
    Quote::new("Your future is created by what you do today, not tomorrow.", "Robert Kiyosaki"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

impl Quote {
    const fn new(text: &'static str, author: &'static str) -> Self {
        Self { text, author }
    }
}

/// Same quote for the whole day, different quote on consecutive days.
pub fn quote_of_the_day(day: DayKey) -> Quote {
    let index = day.ordinal().rem_euclid(QUOTES.len() as i32) as usize;
    QUOTES[index]
}

/// One observation about recent progress. Percentages are rounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    StrongWeek { average: u32 },
    SteadyWeek { average: u32 },
    StrongestDay { day: String, rate: u32 },
    FocusDay { day: String, rate: u32 },
    LongStreak { days: u32 },
    BuildingStreak { days: u32 },
    PerfectDay { habits: usize },
}

impl Display for Insight {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongWeek { average } => {
                write!(f, "Amazing! You're averaging {average}% completion this week!")
            }
            Self::SteadyWeek { average } => {
                write!(f, "Good progress! You're at {average}% completion this week.")
            }
            Self::StrongestDay { day, rate } => {
                write!(f, "{day}s are your strongest day at {rate}% completion!")
            }
            Self::FocusDay { day, rate } => {
                write!(f, "Focus on improving {day}s - only {rate}% completion.")
            }
            Self::LongStreak { days } => write!(f, "Incredible! Your longest streak is {days} days!"),
            Self::BuildingStreak { days } => write!(f, "Building momentum with a {days}-day streak!"),
            Self::PerfectDay { habits } => {
                write!(f, "Perfect day! You've completed all {habits} habits today!")
            }
        }
    }
}

/// Derives insights in display order: week, best day, worst day, streak, today.
pub fn insights(weekly: &[WeeklyEntry], today: &TodayStats, max_streak: u32) -> Vec<Insight> {
    let mut found = Vec::new();

    if let Some(first) = weekly.first() {
        let average = weekly.iter().map(|entry| entry.rate).sum::<f64>() / weekly.len() as f64;
        // Ties keep the earliest day.
        let best = weekly
            .iter()
            .fold(first, |best, entry| if entry.rate > best.rate { entry } else { best });
        let worst = weekly
            .iter()
            .fold(first, |worst, entry| if entry.rate < worst.rate { entry } else { worst });

        if average > 70.0 {
            found.push(Insight::StrongWeek {
                average: round_percent(average),
            });
        } else if average > 50.0 {
            found.push(Insight::SteadyWeek {
                average: round_percent(average),
            });
        }

        if best.rate > 80.0 {
            found.push(Insight::StrongestDay {
                day: best.day.clone(),
                rate: round_percent(best.rate),
            });
        }

        if worst.rate < 40.0 && average > 40.0 {
            found.push(Insight::FocusDay {
                day: worst.day.clone(),
                rate: round_percent(worst.rate),
            });
        }

        if max_streak >= 7 {
            found.push(Insight::LongStreak { days: max_streak });
        } else if max_streak >= 3 {
            found.push(Insight::BuildingStreak { days: max_streak });
        }
    }

    if today.total_habits > 0 && today.completion_rate >= 100.0 {
        found.push(Insight::PerfectDay {
            habits: today.total_habits,
        });
    }

    found
}

fn round_percent(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::{insights, quote_of_the_day, Insight, QUOTES};
    use crate::model::day::DayKey;
    use crate::stats::{GlobalStats, TodayStats, WeeklyEntry};

    fn week(rates: [f64; 7]) -> Vec<WeeklyEntry> {
        let labels = ["Tue", "Wed", "Thu", "Fri", "Sat", "Sun", "Mon"];
        let start = DayKey::from_ymd(2024, 6, 4).unwrap();
        rates
            .iter()
            .enumerate()
            .map(|(idx, rate)| WeeklyEntry {
                date: start.offset(idx as i64),
                day: labels[idx].to_string(),
                completed: 0,
                total: 1,
                rate: *rate,
            })
            .collect()
    }

    fn today(total_habits: usize, completion_rate: f64) -> TodayStats {
        TodayStats {
            date: DayKey::from_ymd(2024, 6, 10).unwrap(),
            completed_count: 0,
            total_habits,
            completion_rate,
            global: GlobalStats::default(),
        }
    }

    #[test]
    fn strong_week_reports_best_day_and_perfect_today() {
        let found = insights(&week([100.0; 7]), &today(2, 100.0), 7);
        assert_eq!(
            found,
            vec![
                Insight::StrongWeek { average: 100 },
                Insight::StrongestDay {
                    day: "Tue".to_string(),
                    rate: 100
                },
                Insight::LongStreak { days: 7 },
                Insight::PerfectDay { habits: 2 },
            ]
        );
    }

    #[test]
    fn middling_week_flags_focus_day() {
        let found = insights(&week([50.0, 0.0, 100.0, 50.0, 50.0, 100.0, 50.0]), &today(2, 50.0), 3);
        assert!(found.contains(&Insight::SteadyWeek { average: 57 }));
        assert!(found.contains(&Insight::FocusDay {
            day: "Wed".to_string(),
            rate: 0
        }));
        assert!(found.contains(&Insight::BuildingStreak { days: 3 }));
    }

    #[test]
    fn empty_tracker_has_no_insights() {
        assert!(insights(&week([0.0; 7]), &today(0, 0.0), 0).is_empty());
    }

    #[test]
    fn quote_is_stable_within_a_day_and_rotates() {
        let day = DayKey::from_ymd(2024, 6, 10).unwrap();
        assert_eq!(quote_of_the_day(day), quote_of_the_day(day));
        assert_ne!(quote_of_the_day(day), quote_of_the_day(day.previous()));
        assert!(QUOTES.contains(&quote_of_the_day(day)));
    }
}
