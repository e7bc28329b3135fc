use super::delta::EventDelta;
use super::window::{estimate_rates, push_bounded};
use crate::engine::types::BucketStats;
use crate::shared::datetime::Granularity;

/// Pure merge: returns the state after folding `delta` into `existing`.
pub fn merge(
    existing: &BucketStats,
    delta: &EventDelta,
    window_size: usize,
    ladder: &[Granularity],
) -> BucketStats {
    let mut next = existing.clone();
    apply(&mut next, delta, window_size, ladder);
    next
}

/// In-place variant of [`merge`], used by stores applying a merge under a lock.
pub fn apply(
    stats: &mut BucketStats,
    delta: &EventDelta,
    window_size: usize,
    ladder: &[Granularity],
) {
    push_bounded(&mut stats.recent_timestamps, delta.timestamp, window_size);
    stats.averages = estimate_rates(&stats.recent_timestamps, ladder);

    for (output, value) in &delta.calculations {
        stats
            .calculation_series
            .entry(output.clone())
            .or_default()
            .push(*value);
    }

    for (output, value) in &delta.uniques {
        stats
            .unique_counters
            .entry(output.clone())
            .or_default()
            .observe(value);
    }
}
