use crate::engine::types::RateEstimate;
use crate::shared::datetime::Granularity;
use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, VecDeque};

/// Appends `ts` and evicts the oldest entries beyond `window_size`.
pub fn push_bounded(window: &mut VecDeque<DateTime<Utc>>, ts: DateTime<Utc>, window_size: usize) {
    window.push_back(ts);
    while window.len() > window_size {
        window.pop_front();
    }
}

/// Time between the oldest and newest entry, in units of `gran`.
pub fn elapsed_units(window: &VecDeque<DateTime<Utc>>, gran: Granularity) -> f64 {
    match (window.front(), window.back()) {
        (Some(oldest), Some(newest)) => span_seconds(*newest - *oldest) / gran.unit_seconds(),
        _ => 0.0,
    }
}

/// Span in seconds at the finest precision that does not overflow.
fn span_seconds(span: Duration) -> f64 {
    match span.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        None => match span.num_microseconds() {
            Some(micros) => micros as f64 / 1e6,
            None => span.num_milliseconds() as f64 / 1e3,
        },
    }
}

/// Rate for one granularity: `ceil(len / elapsed)`.
///
/// Without a positive span there is nothing to extrapolate from, so the
/// estimate is a zero placeholder flagged as forecast. A measured rate over
/// less than one unit is also flagged as forecast.
pub fn estimate_rate(window: &VecDeque<DateTime<Utc>>, gran: Granularity) -> RateEstimate {
    let elapsed = elapsed_units(window, gran);
    if !elapsed.is_finite() || elapsed <= 0.0 {
        return RateEstimate::placeholder();
    }

    let raw = (window.len() as f64 / elapsed).ceil();
    if !raw.is_finite() {
        return RateEstimate::placeholder();
    }

    RateEstimate {
        rate: raw as u64,
        is_forecast: elapsed < 1.0,
    }
}

pub fn estimate_rates(
    window: &VecDeque<DateTime<Utc>>,
    ladder: &[Granularity],
) -> BTreeMap<Granularity, RateEstimate> {
    ladder
        .iter()
        .map(|g| (*g, estimate_rate(window, *g)))
        .collect()
}
