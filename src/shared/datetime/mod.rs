pub mod granularity;
pub mod time;
pub mod time_bucketing;


pub use granularity::{FALLBACK_GRANULARITY, Granularity, GranularityChoice};
pub use time::TimeConfig;
pub use time_bucketing::{BucketInterval, CalendarTimeBucketer};
