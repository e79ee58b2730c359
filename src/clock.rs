/// Time source used by the analyzer, streaks and scheduler
///
/// Production code uses `SystemClock`; tests pin time with `FixedClock` so
/// that "today", streak windows and the analyzer's time jitter are stable.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};

pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar day in the local timezone
    fn today(&self) -> NaiveDate {
        local_day(&self.now())
    }
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Normalize a timestamp to the local calendar day it falls on
pub fn local_day(ts: &DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

/// Last microsecond of a local calendar day
///
/// Used as the inclusive end of windows that run "through today", so entries
/// dated later today count while no future day ever does.
pub fn end_of_local_day(day: NaiveDate) -> DateTime<Utc> {
    let next_midnight = day.succ_opt().unwrap_or(day).and_time(NaiveTime::MIN);
    let next = match Local.from_local_datetime(&next_midnight).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&next_midnight),
    };
    next - Duration::microseconds(1)
}
