use chrono::{DateTime, Datelike, Duration, TimeZone, Utc, Weekday};

/// Factory for creating test timestamps with known dates
pub struct TimestampFactory;

impl TimestampFactory {
    /// Create timestamp for a specific UTC date/time
    pub fn utc_datetime(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .unwrap()
    }

    /// Create timestamp for start of day
    pub fn utc_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Self::utc_datetime(year, month, day, 0, 0, 0)
    }

    /// Create timestamp at noon of a specific weekday, asserting the weekday
    pub fn utc_weekday(year: i32, month: u32, day: u32, weekday: Weekday) -> DateTime<Utc> {
        let dt = Self::utc_datetime(year, month, day, 12, 0, 0);
        assert_eq!(dt.weekday(), weekday);
        dt
    }

    /// Create timestamp with a millisecond component
    pub fn utc_millis(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
        millis: i64,
    ) -> DateTime<Utc> {
        Self::utc_datetime(year, month, day, hour, min, sec) + Duration::milliseconds(millis)
    }

    /// Offset a timestamp by a number of seconds
    pub fn plus_seconds(base: DateTime<Utc>, seconds: i64) -> DateTime<Utc> {
        base + Duration::seconds(seconds)
    }

    /// Offset a timestamp by a number of minutes
    pub fn plus_minutes(base: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
        base + Duration::minutes(minutes)
    }

    /// Offset a timestamp by a number of hours
    pub fn plus_hours(base: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
        base + Duration::hours(hours)
    }
}
