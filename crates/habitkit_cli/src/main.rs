//! `habitkit` command-line front end.
//!
//! # Responsibility
//! - Parse commands and render tracker state as text or JSON.
//! - Keep all habit semantics inside `habitkit_core`.

mod config;

use anyhow::{anyhow, bail, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use config::AppConfig;
use habitkit_core::{
    init_logging, AchievementStatus, CalendarDay, DayKey, Habit, HabitCategory, HabitTracker,
    NewHabit, NoteId, SqliteKeyValueStore, TargetFrequency, RECENT_NOTES_DEFAULT,
};
use log::info;
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "habitkit", version, about = "Track daily habits, streaks and achievements")]
struct Cli {
    /// Directory holding the database and logs
    #[arg(long, env = "HABITKIT_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, env = "HABITKIT_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a habit
    Add {
        name: String,
        #[arg(long, default_value = "other")]
        category: HabitCategory,
        #[arg(long, default_value = "daily")]
        frequency: TargetFrequency,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// List habits with today's state and streaks
    List {
        /// Only show these categories (repeatable)
        #[arg(long = "category")]
        categories: Vec<HabitCategory>,
    },
    /// Delete a habit with its completions and notes
    Delete { habit: String },
    /// Mark or unmark a habit as done
    Toggle {
        habit: String,
        /// Day to toggle, defaults to today
        #[arg(long)]
        date: Option<DayKey>,
    },
    /// Manage per-day habit notes
    Note {
        #[command(subcommand)]
        command: NoteCommand,
    },
    /// Today's completion summary and global aggregates
    Stats,
    /// Completion rates for the last seven days
    Week,
    /// Month grid of completions
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        habit: Option<String>,
    },
    /// Achievement progress
    Achievements,
    /// Progress insights and the quote of the day
    Insights,
    /// Print the core library version
    Version,
}

#[derive(Subcommand, Debug)]
enum NoteCommand {
    /// Create or replace the note for a habit and day
    Set {
        habit: String,
        text: String,
        #[arg(long)]
        date: Option<DayKey>,
    },
    /// Delete a note by id
    Delete { note: NoteId },
    /// Show the most recent notes of a habit
    List {
        habit: String,
        #[arg(long, default_value_t = RECENT_NOTES_DEFAULT)]
        limit: usize,
    },
}

type Tracker = HabitTracker<SqliteKeyValueStore>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Command::Version = cli.command {
        println!("habitkit_core version={}", habitkit_core::core_version());
        return Ok(());
    }

    let config = AppConfig::resolve(cli.data_dir, cli.log_level)?;
    if let Err(err) = init_logging(&config.log_level, &config.log_dir()) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let store = SqliteKeyValueStore::open(config.db_path())?;
    let mut tracker = Tracker::open(store)?;
    info!(
        "event=cli_start module=cli status=ok habits={}",
        tracker.habits().len()
    );

    run(&mut tracker, cli.command, cli.json)?;
    announce_unlocks(&tracker);
    Ok(())
}

fn run(tracker: &mut Tracker, command: Command, as_json: bool) -> Result<()> {
    match command {
        Command::Add {
            name,
            category,
            frequency,
            color,
            icon,
        } => {
            let mut new_habit = NewHabit::new(&name, category, frequency)?;
            if let Some(color) = color {
                new_habit = new_habit.with_color(color);
            }
            if let Some(icon) = icon {
                new_habit = new_habit.with_icon(icon);
            }
            let habit = tracker.add_habit(new_habit)?;
            println!("Created {} {} ({})", habit.icon, habit.name, short_id(&habit));
        }
        Command::List { categories } => print_habits(tracker, &categories, as_json)?,
        Command::Delete { habit } => {
            let habit = resolve_habit(tracker, &habit)?.clone();
            tracker.delete_habit(habit.id)?;
            println!("Deleted \"{}\"", habit.name);
        }
        Command::Toggle { habit, date } => {
            let habit = resolve_habit(tracker, &habit)?.clone();
            let date = date.unwrap_or_else(|| tracker.today());
            if tracker.toggle_habit_completion(habit.id, date)? {
                let streak = tracker.habit_streak(habit.id);
                if streak > 1 {
                    println!("{} completed on {date}! {streak} day streak!", habit.name);
                } else {
                    println!("{} completed on {date}!", habit.name);
                }
            } else {
                println!("{} unmarked for {date}", habit.name);
            }
        }
        Command::Note { command } => run_note(tracker, command, as_json)?,
        Command::Stats => {
            let stats = tracker.today_stats();
            if as_json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!(
                    "Today {}: {}/{} done ({:.0}%)",
                    stats.date, stats.completed_count, stats.total_habits, stats.completion_rate
                );
                println!("Weekly average: {:.0}%", stats.global.weekly_average);
                println!("Longest current streak: {} days", stats.global.max_streak);
                println!("Total completions: {}", stats.global.total_completions);
                println!("Perfect days: {}", stats.global.perfect_days);
            }
        }
        Command::Week => {
            let week = tracker.weekly_data();
            if as_json {
                println!("{}", serde_json::to_string_pretty(&week)?);
            } else {
                for entry in &week {
                    let bar = "#".repeat((entry.rate / 10.0).round() as usize);
                    println!(
                        "{} {} {:>3.0}% {:<10} {}/{}",
                        entry.day, entry.date, entry.rate, bar, entry.completed, entry.total
                    );
                }
            }
        }
        Command::Calendar { year, month, habit } => {
            let today = tracker.today().date();
            let habit_id = match habit {
                Some(query) => Some(resolve_habit(tracker, &query)?.id),
                None => None,
            };
            let grid = tracker.month_calendar(
                year.unwrap_or(today.year()),
                month.unwrap_or(today.month()),
                habit_id,
            )?;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                println!("{}-{:02}  (+ done, * today done, _ today open)", grid.year, grid.month);
                println!(" Sun  Mon  Tue  Wed  Thu  Fri  Sat");
                let mut line = "     ".repeat(grid.leading_blanks as usize);
                for (idx, cell) in grid.days.iter().enumerate() {
                    line.push_str(&format!(" {:>2}{} ", idx + 1, calendar_mark(cell)));
                    if (grid.leading_blanks as usize + idx + 1) % 7 == 0 {
                        println!("{}", line.trim_end());
                        line.clear();
                    }
                }
                if !line.is_empty() {
                    println!("{}", line.trim_end());
                }
            }
        }
        Command::Achievements => {
            if as_json {
                println!("{}", serde_json::to_string_pretty(tracker.achievements())?);
            } else {
                for status in tracker.achievements() {
                    println!("{}", achievement_line(status));
                }
            }
        }
        Command::Insights => {
            let quote = tracker.quote_of_the_day();
            let insights = tracker.insights();
            if as_json {
                let payload = json!({ "quote": quote, "insights": insights });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("\"{}\" - {}", quote.text, quote.author);
                for insight in insights {
                    println!("* {insight}");
                }
            }
        }
        Command::Version => println!("habitkit_core version={}", habitkit_core::core_version()),
    }
    Ok(())
}

fn run_note(tracker: &mut Tracker, command: NoteCommand, as_json: bool) -> Result<()> {
    match command {
        NoteCommand::Set { habit, text, date } => {
            let text = text.trim();
            if text.is_empty() {
                bail!("note text cannot be empty");
            }
            let habit_id = resolve_habit(tracker, &habit)?.id;
            let date = date.unwrap_or_else(|| tracker.today());
            match tracker.save_note(habit_id, date, text)? {
                Some(note) => println!("Saved note {} for {date}", note.id),
                None => bail!("habit {habit_id} no longer exists"),
            }
        }
        NoteCommand::Delete { note } => {
            if tracker.delete_note(note)? {
                println!("Deleted note {note}");
            } else {
                println!("No note with id {note}");
            }
        }
        NoteCommand::List { habit, limit } => {
            let habit_id = resolve_habit(tracker, &habit)?.id;
            let notes = tracker.recent_notes(habit_id, limit);
            if as_json {
                println!("{}", serde_json::to_string_pretty(&notes)?);
            } else {
                for note in notes {
                    println!("{} {}  ({})", note.date, note.note, note.id);
                }
            }
        }
    }
    Ok(())
}

fn print_habits(tracker: &Tracker, categories: &[HabitCategory], as_json: bool) -> Result<()> {
    let today = tracker.today();
    let habits = tracker.habits_in_categories(categories);

    if as_json {
        let rows: Vec<_> = habits
            .iter()
            .map(|habit| {
                json!({
                    "habit": habit,
                    "completedToday": tracker.is_habit_completed(habit.id, today),
                    "streak": tracker.habit_streak(habit.id),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if habits.is_empty() {
        println!("No habits yet. Start with `habitkit add \"Drink water\" --category health`.");
        return Ok(());
    }
    for habit in habits {
        let mark = if tracker.is_habit_completed(habit.id, today) {
            "x"
        } else {
            " "
        };
        let streak = tracker.habit_streak(habit.id);
        println!(
            "[{mark}] {} {:<28} {:<13} {:<7} streak {:>3}  {}",
            habit.icon,
            habit.name,
            habit.category,
            habit.target_frequency,
            streak,
            short_id(habit)
        );
    }
    Ok(())
}

/// Finds a habit by id prefix or case-insensitive exact name.
fn resolve_habit<'t>(tracker: &'t Tracker, query: &str) -> Result<&'t Habit> {
    let query = query.trim();
    if query.is_empty() {
        bail!("habit reference cannot be empty");
    }

    let by_name: Vec<&Habit> = tracker
        .habits()
        .iter()
        .filter(|habit| habit.name.eq_ignore_ascii_case(query))
        .collect();
    if let [habit] = by_name.as_slice() {
        return Ok(*habit);
    }

    let lowered = query.to_ascii_lowercase();
    let by_id: Vec<&Habit> = tracker
        .habits()
        .iter()
        .filter(|habit| habit.id.to_string().starts_with(&lowered))
        .collect();
    match by_id.as_slice() {
        [habit] => Ok(*habit),
        [] => Err(anyhow!("no habit matches `{query}`")),
        _ => Err(anyhow!("`{query}` matches several habits; use a longer id")),
    }
}

fn calendar_mark(cell: &CalendarDay) -> char {
    match (cell.is_today, cell.completed) {
        (true, true) => '*',
        (true, false) => '_',
        (false, true) => '+',
        (false, false) => ' ',
    }
}

/// Unlock instants are not persisted, so text output omits them.
fn achievement_line(status: &AchievementStatus) -> String {
    let mark = if status.unlocked { "x" } else { " " };
    format!("[{mark}] {} - {}", status.title, status.description)
}

fn short_id(habit: &Habit) -> String {
    habit.id.to_string().chars().take(8).collect()
}

fn announce_unlocks(tracker: &Tracker) {
    for id in tracker.recently_unlocked() {
        if let Some(status) = tracker
            .achievements()
            .iter()
            .find(|status| status.id == *id)
        {
            println!("Achievement unlocked: {} - {}", status.title, status.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{achievement_line, calendar_mark};
    use chrono::Utc;
    use habitkit_core::{AchievementId, AchievementStatus, CalendarDay, DayKey};

    fn cell(is_today: bool, completed: bool) -> CalendarDay {
        CalendarDay {
            date: DayKey::from_ymd(2024, 6, 10).unwrap(),
            completions: usize::from(completed),
            completed,
            is_today,
        }
    }

    #[test]
    fn calendar_marks_distinguish_today_done_and_open() {
        assert_eq!(calendar_mark(&cell(true, true)), '*');
        assert_eq!(calendar_mark(&cell(true, false)), '_');
        assert_eq!(calendar_mark(&cell(false, true)), '+');
        assert_eq!(calendar_mark(&cell(false, false)), ' ');
    }

    #[test]
    fn achievement_line_has_no_unlock_date() {
        let id = AchievementId::FirstHabit;
        let status = AchievementStatus {
            id,
            title: id.title(),
            description: id.description(),
            color: id.color(),
            unlocked: true,
            unlocked_at: Some(Utc::now()),
        };
        assert_eq!(
            achievement_line(&status),
            "[x] Getting Started - Create your first habit"
        );
    }
}
