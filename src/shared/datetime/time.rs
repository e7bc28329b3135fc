use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Calendar settings used when truncating timestamps into buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeConfig {
    /// Timezone for calendar-based calculations (None = UTC)
    #[serde(default)]
    pub timezone: Option<String>,
    /// First day of a week bucket
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
}

fn default_week_start() -> Weekday {
    Weekday::Mon
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            timezone: None,
            week_start: default_week_start(),
        }
    }
}

impl TimeConfig {
    /// Parse timezone string to chrono_tz::Tz
    pub fn parse_timezone(&self) -> Option<Tz> {
        self.timezone
            .as_ref()
            .and_then(|tz_str| tz_str.parse().ok())
    }

    /// Returns the configured timezone string when it does not name a known zone.
    pub fn invalid_timezone(&self) -> Option<&str> {
        match &self.timezone {
            Some(tz) if tz.parse::<Tz>().is_err() => Some(tz.as_str()),
            _ => None,
        }
    }
}
