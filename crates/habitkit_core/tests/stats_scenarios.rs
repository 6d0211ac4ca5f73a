use habitkit_core::{
    AchievementId, DayKey, FixedClock, HabitCategory, HabitTracker, Insight,
    MemoryKeyValueStore, NewHabit, TargetFrequency,
};

fn today() -> DayKey {
    DayKey::from_ymd(2024, 6, 10).unwrap()
}

fn tracker_at(day: DayKey) -> HabitTracker<MemoryKeyValueStore, FixedClock> {
    HabitTracker::load(MemoryKeyValueStore::new(), FixedClock::at_day(day)).unwrap()
}

fn new_habit(name: &str, frequency: TargetFrequency) -> NewHabit {
    NewHabit::new(name, HabitCategory::Productivity, frequency).unwrap()
}

#[test]
fn empty_tracker_reports_zero_rates() {
    let tracker = tracker_at(today());
    let stats = tracker.today_stats();

    assert_eq!(stats.total_habits, 0);
    assert_eq!(stats.completion_rate, 0.0);
    assert_eq!(stats.global.weekly_average, 0.0);
    assert_eq!(stats.global.perfect_days, 0);
    assert!(tracker.insights().is_empty());
}

#[test]
fn two_habits_completed_today_is_a_perfect_day() {
    let mut tracker = tracker_at(today());
    let first = tracker
        .add_habit(new_habit("Plan day", TargetFrequency::Daily))
        .unwrap();
    let second = tracker
        .add_habit(new_habit("Inbox zero", TargetFrequency::Daily))
        .unwrap();

    tracker.toggle_habit_completion(first.id, today()).unwrap();
    tracker.toggle_habit_completion(second.id, today()).unwrap();

    let stats = tracker.today_stats();
    assert_eq!(stats.completed_count, 2);
    assert_eq!(stats.completion_rate, 100.0);
    assert_eq!(tracker.global_stats().perfect_days, 1);
    assert!(tracker
        .recently_unlocked()
        .contains(&AchievementId::PerfectDay));
    assert!(tracker.insights().contains(&Insight::PerfectDay { habits: 2 }));
}

#[test]
fn streak_counts_back_from_today_and_stops_at_gap() {
    let mut tracker = tracker_at(today());
    let steady = tracker
        .add_habit(new_habit("Steady", TargetFrequency::Daily))
        .unwrap();
    let gappy = tracker
        .add_habit(new_habit("Gappy", TargetFrequency::Daily))
        .unwrap();

    for days_back in 0..3 {
        tracker
            .toggle_habit_completion(steady.id, today().offset(-days_back))
            .unwrap();
    }
    tracker.toggle_habit_completion(gappy.id, today()).unwrap();
    tracker
        .toggle_habit_completion(gappy.id, today().offset(-2))
        .unwrap();

    assert_eq!(tracker.habit_streak(steady.id), 3);
    assert_eq!(tracker.habit_streak(gappy.id), 1);
    assert_eq!(tracker.global_stats().max_streak, 3);
}

#[test]
fn weekly_habits_use_daily_consecutiveness() {
    let mut tracker = tracker_at(today());
    let weekly = tracker
        .add_habit(new_habit("Review week", TargetFrequency::Weekly))
        .unwrap();

    tracker.toggle_habit_completion(weekly.id, today()).unwrap();
    tracker
        .toggle_habit_completion(weekly.id, today().offset(-7))
        .unwrap();

    assert_eq!(tracker.habit_streak(weekly.id), 1);
}

#[test]
fn weekly_data_ends_today_and_uses_current_habit_count() {
    let mut tracker = tracker_at(today());
    let habit = tracker
        .add_habit(new_habit("Deep work", TargetFrequency::Daily))
        .unwrap();
    tracker
        .toggle_habit_completion(habit.id, today().offset(-3))
        .unwrap();
    // Added today, but still counted in every day's denominator.
    tracker
        .add_habit(new_habit("Shutdown ritual", TargetFrequency::Daily))
        .unwrap();

    let week = tracker.weekly_data();
    assert_eq!(week.len(), 7);
    assert_eq!(week.first().unwrap().date, today().offset(-6));
    assert_eq!(week.last().unwrap().date, today());
    assert!(week.windows(2).all(|pair| pair[0].date < pair[1].date));
    assert!(week.iter().all(|entry| entry.total == 2));
    assert_eq!(week[3].rate, 50.0);
    assert!(week
        .iter()
        .all(|entry| (0.0..=100.0).contains(&entry.rate)));
}

#[test]
fn seven_day_streak_unlocks_streak_master() {
    let start = today().offset(-6);
    let mut tracker = tracker_at(start);
    let habit = tracker
        .add_habit(new_habit("Write", TargetFrequency::Daily))
        .unwrap();

    for day in 0..7 {
        let date = tracker.today();
        tracker.toggle_habit_completion(habit.id, date).unwrap();
        if day < 6 {
            tracker.clock_mut().advance_days(1);
        }
    }

    assert_eq!(tracker.today(), today());
    assert_eq!(tracker.habit_streak(habit.id), 7);
    let streak_master = tracker
        .achievements()
        .iter()
        .find(|status| status.id == AchievementId::StreakMaster)
        .unwrap();
    assert!(streak_master.unlocked);
    assert!(streak_master.unlocked_at.is_some());
    let power_user = tracker
        .achievements()
        .iter()
        .find(|status| status.id == AchievementId::PowerUser)
        .unwrap();
    assert!(power_user.unlocked);
}

#[test]
fn deleting_habit_can_relock_but_keeps_first_unlock_time() {
    let mut tracker = tracker_at(today());
    let habit = tracker
        .add_habit(new_habit("Only one", TargetFrequency::Daily))
        .unwrap();
    let unlocked_at = tracker.achievements()[0].unlocked_at;
    assert!(unlocked_at.is_some());

    tracker.delete_habit(habit.id).unwrap();
    let status = &tracker.achievements()[0];
    assert_eq!(status.id, AchievementId::FirstHabit);
    assert!(!status.unlocked);
    assert_eq!(status.unlocked_at, unlocked_at);
}

#[test]
fn month_calendar_marks_selected_habit_days() {
    let mut tracker = tracker_at(today());
    let habit = tracker
        .add_habit(new_habit("Sketch", TargetFrequency::Daily))
        .unwrap();
    tracker.toggle_habit_completion(habit.id, today()).unwrap();

    let grid = tracker.month_calendar(2024, 6, Some(habit.id)).unwrap();
    assert_eq!(grid.days.len(), 30);
    // 2024-06-01 was a Saturday.
    assert_eq!(grid.leading_blanks, 6);
    let tenth = &grid.days[9];
    assert!(tenth.completed && tenth.is_today);
    assert_eq!(grid.days.iter().filter(|cell| cell.completed).count(), 1);

    assert!(tracker.month_calendar(2024, 0, None).is_err());
}
