use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Granularity used when a configured value is not recognised.
pub const FALLBACK_GRANULARITY: Granularity = Granularity::Day;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Time units a bucket can span, ordered from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    pub const ALL: [Granularity; 7] = [
        Granularity::Second,
        Granularity::Minute,
        Granularity::Hour,
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Second => "second",
            Granularity::Minute => "minute",
            Granularity::Hour => "hour",
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }

    /// All granularities from the finest up to and including `self`.
    pub fn ladder(&self) -> Vec<Granularity> {
        Self::ALL.iter().copied().filter(|g| g <= self).collect()
    }

    /// Nominal length of one unit in seconds.
    ///
    /// Months and years use the mean Gregorian lengths, so rates computed
    /// against them are smooth across short and long months.
    pub fn unit_seconds(&self) -> f64 {
        match self {
            Granularity::Second => 1.0,
            Granularity::Minute => 60.0,
            Granularity::Hour => 3_600.0,
            Granularity::Day => SECONDS_PER_DAY,
            Granularity::Week => 7.0 * SECONDS_PER_DAY,
            Granularity::Month => 30.436_875 * SECONDS_PER_DAY,
            Granularity::Year => 365.242_5 * SECONDS_PER_DAY,
        }
    }

    /// Resolves a configured value, failing closed to [`FALLBACK_GRANULARITY`].
    pub fn resolve_configured(raw: &str) -> GranularityChoice {
        match raw.parse::<Granularity>() {
            Ok(granularity) => GranularityChoice {
                granularity,
                rejected: None,
            },
            Err(_) => {
                warn!(
                    target: "snel_rollup::granularity",
                    requested = raw,
                    fallback = FALLBACK_GRANULARITY.as_str(),
                    "Unsupported granularity; falling back"
                );
                GranularityChoice {
                    granularity: FALLBACK_GRANULARITY,
                    rejected: Some(raw.to_string()),
                }
            }
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGranularity(pub String);

impl fmt::Display for UnknownGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown granularity '{}'", self.0)
    }
}

impl std::error::Error for UnknownGranularity {}

impl FromStr for Granularity {
    type Err = UnknownGranularity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "second" => Ok(Granularity::Second),
            "minute" => Ok(Granularity::Minute),
            "hour" => Ok(Granularity::Hour),
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "year" => Ok(Granularity::Year),
            _ => Err(UnknownGranularity(s.to_string())),
        }
    }
}

/// Outcome of resolving a configured granularity.
///
/// `rejected` holds the original value when the fallback was applied, so
/// configuration mistakes stay visible to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GranularityChoice {
    pub granularity: Granularity,
    pub rejected: Option<String>,
}

impl GranularityChoice {
    pub fn fell_back(&self) -> bool {
        self.rejected.is_some()
    }
}
