use crate::engine::core::accumulate::SummaryStats;
use crate::shared::datetime::Granularity;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Reduced view over every bucket matched by a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupReport {
    pub overview: Overview,
    pub time_series: Vec<SeriesPoint>,
    pub meta: ReportMeta,
    pub calculations: BTreeMap<String, SummaryStats>,
    pub uniques: BTreeMap<String, UniqueSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub count: usize,
    pub avg: BTreeMap<Granularity, AvgSummary>,
}

/// Mean rate for one ladder level across the matched buckets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvgSummary {
    pub val: f64,
    pub has_forecast: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub t: String,
    pub val: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMeta {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: DurationSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationSummary {
    pub ms: i64,
    /// Human-readable form, e.g. `1h 30m`.
    pub formatted: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UniqueSummary {
    pub unique: u64,
    pub total: u64,
    pub duplicated: u64,
}
