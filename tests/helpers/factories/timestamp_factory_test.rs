use super::timestamp_factory::TimestampFactory;
use chrono::{Datelike, Timelike, Weekday};

#[test]
fn test_utc_datetime() {
    let dt = TimestampFactory::utc_datetime(2024, 1, 15, 12, 30, 45);

    assert_eq!(dt.year(), 2024);
    assert_eq!(dt.month(), 1);
    assert_eq!(dt.day(), 15);
    assert_eq!(dt.hour(), 12);
    assert_eq!(dt.minute(), 30);
    assert_eq!(dt.second(), 45);
}

#[test]
fn test_utc_date() {
    let dt = TimestampFactory::utc_date(2024, 1, 15);
    assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));
}

#[test]
fn test_utc_weekday() {
    let dt = TimestampFactory::utc_weekday(2024, 1, 15, Weekday::Mon);
    assert_eq!(dt.weekday(), Weekday::Mon);
    assert_eq!(dt.hour(), 12);
}

#[test]
fn test_offsets() {
    let base = TimestampFactory::utc_datetime(2024, 1, 15, 23, 59, 50);

    assert_eq!(TimestampFactory::plus_seconds(base, 20).day(), 16);
    assert_eq!(TimestampFactory::plus_minutes(base, 1).minute(), 0);
    assert_eq!(TimestampFactory::plus_hours(base, 2).hour(), 1);
    assert_eq!(
        TimestampFactory::utc_millis(2024, 1, 15, 0, 0, 0, 1_500).second(),
        1
    );
}
