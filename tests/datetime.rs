use chrono::{NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Timelike, Utc};
use priyam::MathError;
use priyam::datetime::{Countdown, convert_timezone, countdown_between, countdown_timer, working_days};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn timezone_conversion_follows_offsets() {
    let eastern = convert_timezone(at(2023, 1, 1, 12, 0), "UTC", "US/Eastern").unwrap();
    assert_eq!(eastern.hour(), 7);
    assert_eq!(eastern.naive_local(), at(2023, 1, 1, 7, 0));

    let summer = convert_timezone(at(2023, 7, 1, 12, 0), "UTC", "America/New_York").unwrap();
    assert_eq!(summer.naive_local(), at(2023, 7, 1, 8, 0));

    let utc = convert_timezone(at(2023, 3, 10, 9, 30), "Asia/Kolkata", "UTC").unwrap();
    assert_eq!(utc.naive_utc(), at(2023, 3, 10, 4, 0));
}

#[test]
fn timezone_conversion_around_daylight_saving() {
    // 01:30 happens twice on 2023-11-05 in New York; the standard-time reading wins.
    let repeated = convert_timezone(at(2023, 11, 5, 1, 30), "America/New_York", "UTC").unwrap();
    assert_eq!(repeated.naive_utc(), at(2023, 11, 5, 6, 30));

    // 02:30 never happens on 2023-03-12.
    assert!(matches!(
        convert_timezone(at(2023, 3, 12, 2, 30), "America/New_York", "UTC"),
        Err(MathError::Domain(_))
    ));
}

#[test]
fn unknown_zone_is_domain_error() {
    let noon = at(2023, 1, 1, 12, 0);
    assert!(matches!(convert_timezone(noon, "Mars/Olympus", "UTC"), Err(MathError::Domain(_))));
    assert!(matches!(convert_timezone(noon, "UTC", ""), Err(MathError::Domain(_))));
}

#[test]
fn countdown_splits_remaining_time() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let end = now + TimeDelta::days(1) + TimeDelta::hours(2) + TimeDelta::minutes(30) + TimeDelta::seconds(5);
    let left = countdown_between(now, end);
    assert_eq!(
        left,
        Countdown {
            days: 1,
            hours: 2,
            minutes: 30,
            seconds: 5
        }
    );
    assert_eq!(left.total_seconds(), 95_405);

    assert_eq!(countdown_between(end, now), Countdown::default());
    assert_eq!(countdown_between(now, now), Countdown::default());
}

#[test]
fn countdown_from_the_clock() {
    let end = Utc::now() + TimeDelta::days(1) + TimeDelta::hours(2) + TimeDelta::minutes(30) + TimeDelta::seconds(30);
    let left = countdown_timer(end);
    assert_eq!((left.days, left.hours, left.minutes), (1, 2, 30));
    assert_eq!(countdown_timer(Utc::now() - TimeDelta::hours(1)), Countdown::default());
}

#[test]
fn working_days_skip_weekends_and_holidays() {
    // 2023-01-01 is a Sunday and 2023-01-10 a Tuesday.
    assert_eq!(working_days(day(2023, 1, 1), day(2023, 1, 10), &[]), 7);
    assert_eq!(working_days(day(2023, 1, 1), day(2023, 1, 10), &[day(2023, 1, 2)]), 6);
    // A holiday on a Saturday changes nothing.
    assert_eq!(working_days(day(2023, 1, 1), day(2023, 1, 10), &[day(2023, 1, 7)]), 7);
    assert_eq!(working_days(day(2023, 1, 7), day(2023, 1, 8), &[]), 0);
    assert_eq!(working_days(day(2023, 1, 10), day(2023, 1, 1), &[]), 0);
    assert_eq!(working_days(day(2024, 2, 29), day(2024, 2, 29), &[]), 1);
}
