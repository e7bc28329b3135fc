use super::report::{
    AvgSummary, DurationSummary, Overview, ReportMeta, RollupReport, SeriesPoint, UniqueSummary,
};
use crate::engine::core::accumulate::{NumericSummary, SummaryStats};
use crate::engine::schema::{RollupSchema, TrackedField};
use crate::engine::types::Bucket;
use crate::shared::datetime::Granularity;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Folds scanned buckets into a report. `None` when no bucket matched.
///
/// Buckets with an empty label are malformed: they are left out of the time
/// series, and `overview.count` counts only the points that remain. Every
/// other section reduces over all scanned buckets.
pub fn reduce(buckets: &[Bucket], schema: &RollupSchema) -> Option<RollupReport> {
    let meta = report_meta(buckets)?;

    let time_series: Vec<SeriesPoint> = buckets
        .iter()
        .filter(|bucket| {
            let labeled = !bucket.interval.label.is_empty();
            if !labeled {
                warn!(
                    target: "snel_rollup::query",
                    key = %bucket.key_fields.canonical(),
                    start = %bucket.interval.start,
                    "Leaving bucket without a label out of the time series"
                );
            }
            labeled
        })
        .map(|bucket| SeriesPoint {
            t: bucket.interval.label.clone(),
            val: bucket.count,
        })
        .collect();

    Some(RollupReport {
        overview: Overview {
            count: time_series.len(),
            avg: average_rates(buckets, &schema.ladder()),
        },
        time_series,
        meta,
        calculations: summarize_calculations(buckets, schema.calculations()),
        uniques: summarize_uniques(buckets, schema.unique_fields()),
    })
}

fn report_meta(buckets: &[Bucket]) -> Option<ReportMeta> {
    let start = buckets.iter().map(|b| b.interval.start).min()?;
    let end = buckets.iter().map(|b| b.interval.end).max()?;
    Some(ReportMeta {
        start,
        end,
        duration: describe_duration(start, end),
    })
}

fn describe_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> DurationSummary {
    let span = end - start;
    DurationSummary {
        ms: span.num_milliseconds(),
        formatted: humantime::format_duration(span.to_std().unwrap_or_default()).to_string(),
    }
}

fn average_rates(buckets: &[Bucket], ladder: &[Granularity]) -> BTreeMap<Granularity, AvgSummary> {
    ladder
        .iter()
        .map(|gran| {
            let estimates: Vec<_> = buckets
                .iter()
                .filter_map(|b| b.stats.averages.get(gran))
                .collect();
            let summary = if estimates.is_empty() {
                AvgSummary {
                    val: 0.0,
                    has_forecast: true,
                }
            } else {
                let total: f64 = estimates.iter().map(|e| e.rate as f64).sum();
                AvgSummary {
                    val: round3(total / estimates.len() as f64),
                    has_forecast: estimates.iter().any(|e| e.is_forecast),
                }
            };
            (*gran, summary)
        })
        .collect()
}

fn summarize_calculations(
    buckets: &[Bucket],
    fields: &[TrackedField],
) -> BTreeMap<String, SummaryStats> {
    fields
        .iter()
        .map(|field| {
            let mut summary = NumericSummary::new();
            for bucket in buckets {
                if let Some(series) = bucket.stats.calculation_series.get(&field.output) {
                    summary.add_batch(series);
                }
            }
            (field.output.clone(), summary.finish())
        })
        .collect()
}

fn summarize_uniques(
    buckets: &[Bucket],
    fields: &[TrackedField],
) -> BTreeMap<String, UniqueSummary> {
    fields
        .iter()
        .map(|field| {
            let mut distinct: BTreeSet<&str> = BTreeSet::new();
            let mut total = 0u64;
            for counter in buckets
                .iter()
                .filter_map(|b| b.stats.unique_counters.get(&field.output))
            {
                distinct.extend(counter.distinct.iter().map(String::as_str));
                total += counter.total;
            }
            let unique = distinct.len() as u64;
            (
                field.output.clone(),
                UniqueSummary {
                    unique,
                    total,
                    duplicated: total.saturating_sub(unique),
                },
            )
        })
        .collect()
}

pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
