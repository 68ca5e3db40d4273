//! Time sources used for day boundaries and elapsed-time accounting.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use parking_lot::Mutex;

/// Source of "now" and of calendar-day boundaries.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day an instant falls on, in the player's timezone.
    fn calendar_day(&self, at: DateTime<Utc>) -> NaiveDate;

    /// Calendar day of [`Clock::now`].
    fn today(&self) -> NaiveDate {
        self.calendar_day(self.now())
    }

    /// Whether two instants fall on the same calendar day.
    fn is_same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.calendar_day(a) == self.calendar_day(b)
    }
}

/// Wall clock using the local timezone for day boundaries.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn calendar_day(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&Local).date_naive()
    }
}

/// Hand-driven clock whose days are UTC days. Used by tests and tooling.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Start the clock at the given instant.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Jump to an instant.
    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock() = at;
    }

    /// Move forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock();
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }

    fn calendar_day(&self, at: DateTime<Utc>) -> NaiveDate {
        at.date_naive()
    }
}

/// Seconds from `start` to `end`, clamped at zero.
pub fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let millis = (end - start).num_milliseconds();
    (millis as f64 / 1000.0).max(0.0)
}
