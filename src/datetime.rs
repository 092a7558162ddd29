use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::{MathError, Result};

/// Read a wall-clock time in the IANA zone `from` and express it in the zone `to`.
///
/// A time repeated by a daylight-saving fall-back resolves to the later instant,
/// which is the standard-time reading. A time skipped by a spring-forward is a
/// domain error, as is an unknown zone name.
pub fn convert_timezone(local: NaiveDateTime, from: &str, to: &str) -> Result<DateTime<Tz>> {
    let from_zone = zone(from)?;
    let to_zone = zone(to)?;
    let start = match from_zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(_, standard) => standard,
        LocalResult::None => {
            return Err(MathError::domain(format!("{local} does not exist in {from}")));
        }
    };
    Ok(start.with_timezone(&to_zone))
}

fn zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| MathError::domain(format!("unknown time zone `{name}`")))
}

/// Time left until a deadline, split into whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Countdown {
    pub fn total_seconds(&self) -> u64 {
        ((self.days * 24 + self.hours) * 60 + self.minutes) * 60 + self.seconds
    }
}

/// Time from `now` until `end`; all zero once `end` has passed.
pub fn countdown_between(now: DateTime<Utc>, end: DateTime<Utc>) -> Countdown {
    let Ok(total) = u64::try_from(end.signed_duration_since(now).num_seconds()) else {
        return Countdown::default();
    };
    Countdown {
        days: total / 86_400,
        hours: total % 86_400 / 3_600,
        minutes: total % 3_600 / 60,
        seconds: total % 60,
    }
}

pub fn countdown_timer(end: DateTime<Utc>) -> Countdown {
    countdown_between(Utc::now(), end)
}

/// Monday-to-Friday dates from `start` through `end` inclusive, skipping `holidays`.
///
/// An `end` before `start` counts nothing.
pub fn working_days(start: NaiveDate, end: NaiveDate, holidays: &[NaiveDate]) -> u64 {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .filter(|day| !holidays.contains(day))
        .count() as u64
}
