use super::granularity::Granularity;
use super::time::TimeConfig;
use chrono::{
    DateTime, Datelike, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, TimeZone,
    Timelike, Utc, Weekday,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open `[start, end)` window a bucket covers, plus its sortable label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BucketInterval {
    pub granularity: Granularity,
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BucketInterval {
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Label pattern per granularity. Every pattern is fixed width, so labels of
/// one granularity sort lexicographically in chronological order.
pub fn label_format(gran: Granularity) -> &'static str {
    match gran {
        Granularity::Second => "%Y-%m-%dT%H:%M:%S",
        Granularity::Minute => "%Y-%m-%dT%H:%M",
        Granularity::Hour => "%Y-%m-%dT%H:00",
        Granularity::Day => "%Y-%m-%d",
        Granularity::Week => "W%Y-%m-%d",
        Granularity::Month => "%Y-%m",
        Granularity::Year => "%Y",
    }
}

/// Calendar-aware time bucketing implementation
#[derive(Debug, Clone)]
pub struct CalendarTimeBucketer {
    config: TimeConfig,
    tz: Option<Tz>,
}

impl CalendarTimeBucketer {
    pub fn new(config: TimeConfig) -> Self {
        let tz = config.parse_timezone();
        Self { config, tz }
    }

    pub fn config(&self) -> &TimeConfig {
        &self.config
    }

    /// Resolve the bucket `ts` falls into at the given granularity.
    pub fn resolve(&self, ts: DateTime<Utc>, gran: Granularity) -> BucketInterval {
        match self.tz {
            Some(tz) => self.resolve_in(ts.with_timezone(&tz), gran),
            None => self.resolve_in(ts, gran),
        }
    }

    /// Calculate the bucket start for a given granularity
    pub fn bucket_of(&self, ts: DateTime<Utc>, gran: Granularity) -> DateTime<Utc> {
        self.resolve(ts, gran).start
    }

    fn resolve_in<T>(&self, dt: DateTime<T>, gran: Granularity) -> BucketInterval
    where
        T: TimeZone,
        T::Offset: fmt::Display,
    {
        let start = self.bucket_start(&dt, gran);
        let end = bucket_end(&start, gran);
        BucketInterval {
            granularity: gran,
            label: start.format(label_format(gran)).to_string(),
            start: start.with_timezone(&Utc),
            end: end.with_timezone(&Utc),
        }
    }

    fn bucket_start<T: TimeZone>(&self, dt: &DateTime<T>, gran: Granularity) -> DateTime<T> {
        let local = dt.naive_local();
        let date = local.date();
        let naive = match gran {
            Granularity::Second => date.and_hms_opt(local.hour(), local.minute(), local.second()),
            Granularity::Minute => date.and_hms_opt(local.hour(), local.minute(), 0),
            Granularity::Hour => date.and_hms_opt(local.hour(), 0, 0),
            Granularity::Day => date.and_hms_opt(0, 0, 0),
            Granularity::Week => {
                let back = days_since_week_start(date.weekday(), self.config.week_start);
                (date - Duration::days(back)).and_hms_opt(0, 0, 0)
            }
            Granularity::Month => date.with_day(1).and_then(|d| d.and_hms_opt(0, 0, 0)),
            Granularity::Year => {
                NaiveDate::from_ymd_opt(date.year(), 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
            }
        };

        // A local boundary that cannot be represented keeps the bucket anchored
        // at the timestamp itself, which still satisfies start <= ts.
        naive
            .and_then(|n| localize(&dt.timezone(), n, Some(dt)))
            .unwrap_or_else(|| dt.clone())
    }
}

fn bucket_end<T: TimeZone>(start: &DateTime<T>, gran: Granularity) -> DateTime<T> {
    let calendar_step = match gran {
        Granularity::Second => return start.clone() + Duration::seconds(1),
        Granularity::Minute => return start.clone() + Duration::minutes(1),
        Granularity::Hour => return start.clone() + Duration::hours(1),
        Granularity::Day => start.naive_local().checked_add_signed(Duration::days(1)),
        Granularity::Week => start.naive_local().checked_add_signed(Duration::days(7)),
        Granularity::Month => start.naive_local().checked_add_months(Months::new(1)),
        Granularity::Year => start.naive_local().checked_add_months(Months::new(12)),
    };

    calendar_step
        .and_then(|n| localize(&start.timezone(), n, None))
        .unwrap_or_else(|| start.clone() + Duration::seconds(gran.unit_seconds() as i64))
}

/// Map a wall-clock time back onto the timeline.
///
/// Inside a DST fold the later instant is chosen only when it does not pass
/// `not_after`; inside a gap the first valid instant an hour later is used.
fn localize<T: TimeZone>(
    tz: &T,
    naive: NaiveDateTime,
    not_after: Option<&DateTime<T>>,
) -> Option<DateTime<T>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(a, b) => {
            let (early, late) = if a <= b { (a, b) } else { (b, a) };
            match not_after {
                Some(limit) if late <= *limit => Some(late),
                _ => Some(early),
            }
        }
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest(),
    }
}

pub(super) fn days_since_week_start(day: Weekday, week_start: Weekday) -> i64 {
    ((day.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7) as i64
}
