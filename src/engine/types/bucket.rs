use super::key_fields::KeyFields;
use crate::shared::datetime::{BucketInterval, Granularity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Arrival rate for one granularity, in events per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEstimate {
    pub rate: u64,
    /// Set when the rate is extrapolated from less than one full unit of history.
    pub is_forecast: bool,
}

impl RateEstimate {
    pub fn placeholder() -> Self {
        Self {
            rate: 0,
            is_forecast: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueCounter {
    pub distinct: BTreeSet<String>,
    pub total: u64,
}

impl UniqueCounter {
    pub fn observe(&mut self, value: &str) {
        if !self.distinct.contains(value) {
            self.distinct.insert(value.to_string());
        }
        self.total += 1;
    }
}

/// Derived per-bucket state rewritten on every merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    pub recent_timestamps: VecDeque<DateTime<Utc>>,
    pub averages: BTreeMap<Granularity, RateEstimate>,
    pub calculation_series: BTreeMap<String, Vec<f64>>,
    pub unique_counters: BTreeMap<String, UniqueCounter>,
}

/// Stored aggregate for one (key fields, interval) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub key_fields: KeyFields,
    pub interval: BucketInterval,
    pub count: u64,
    pub stats: BucketStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Bumped on every merge; only compare-and-retry stores look at it.
    #[serde(default)]
    pub version: u64,
}

impl Bucket {
    pub fn id(&self) -> BucketId {
        BucketId::new(&self.key_fields, &self.interval)
    }
}

/// Storage identity of a bucket.
///
/// The interval start rather than the label is used, since wall-clock labels
/// repeat inside a DST fold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketId {
    pub key: String,
    pub granularity: Granularity,
    pub start: DateTime<Utc>,
}

impl BucketId {
    pub fn new(key_fields: &KeyFields, interval: &BucketInterval) -> Self {
        Self {
            key: key_fields.canonical(),
            granularity: interval.granularity,
            start: interval.start,
        }
    }
}
