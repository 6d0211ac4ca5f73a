//! Time source for "now" and "today".
//!
//! # Responsibility
//! - Map instants to local calendar days in one place.
//! - Allow deterministic dates in tests and reproducible runs.

use crate::model::day::DayKey;
use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

/// Source of the current instant and its calendar-day mapping.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day that `instant` falls on in this clock's timezone.
    fn day_of(&self, instant: DateTime<Utc>) -> DayKey;

    fn today(&self) -> DayKey {
        self.day_of(self.now())
    }
}

/// Wall clock in the process' local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn day_of(&self, instant: DateTime<Utc>) -> DayKey {
        DayKey::new(instant.with_timezone(&Local).date_naive())
    }
}

/// Clock frozen at one instant with an explicit UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// Clock at noon UTC of `day`.
    pub fn at_day(day: DayKey) -> Self {
        let noon = day
            .date()
            .and_hms_opt(12, 0, 0)
            .map(|naive| naive.and_utc())
            .unwrap_or_else(Utc::now);
        Self::new(noon, Utc.fix())
    }

    pub fn set_now(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    /// Moves the frozen instant by whole days.
    pub fn advance_days(&mut self, days: i64) {
        self.now += chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn day_of(&self, instant: DateTime<Utc>) -> DayKey {
        DayKey::new(instant.with_timezone(&self.offset).date_naive())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn day_of(&self, instant: DateTime<Utc>) -> DayKey {
        (**self).day_of(instant)
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock};
    use crate::model::day::DayKey;
    use chrono::{FixedOffset, TimeZone, Utc};

    #[test]
    fn at_day_reports_that_day_as_today() {
        let day = DayKey::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(FixedClock::at_day(day).today(), day);
    }

    #[test]
    fn day_of_respects_offset() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 23, 30, 0).unwrap();
        let east = FixedClock::new(instant, FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(east.today().to_string(), "2024-05-02");
    }
}
