use crate::engine::core::accumulate::{self, EventDelta};
use crate::engine::types::{Bucket, BucketStats, KeyFields, RateEstimate};
use crate::shared::datetime::{CalendarTimeBucketer, Granularity, TimeConfig};
use crate::test_helpers::factories::TimestampFactory;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

pub struct BucketFactory {
    key_fields: KeyFields,
    granularity: Granularity,
    at: DateTime<Utc>,
    count: u64,
    label: Option<String>,
    series: Vec<(String, Vec<f64>)>,
    uniques: Vec<(String, Vec<String>)>,
    rates: Vec<(Granularity, RateEstimate)>,
    window_size: usize,
}

impl BucketFactory {
    pub fn new() -> Self {
        Self {
            key_fields: KeyFields::new(),
            granularity: Granularity::Minute,
            at: TimestampFactory::utc_datetime(2024, 5, 1, 12, 0, 0),
            count: 1,
            label: None,
            series: Vec::new(),
            uniques: Vec::new(),
            rates: Vec::new(),
            window_size: 500,
        }
    }

    pub fn with_key(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.key_fields.insert(name, value);
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Any instant inside the bucket; the interval is resolved from it.
    pub fn at(mut self, ts: DateTime<Utc>) -> Self {
        self.at = ts;
        self
    }

    pub fn starting_minutes_later(mut self, minutes: i64) -> Self {
        self.at += Duration::minutes(minutes);
        self
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    /// Overrides the resolved label, e.g. to simulate a malformed record.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_series(mut self, output: &str, values: &[f64]) -> Self {
        self.series.push((output.to_string(), values.to_vec()));
        self
    }

    pub fn with_uniques(mut self, output: &str, values: &[&str]) -> Self {
        self.uniques.push((
            output.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        ));
        self
    }

    pub fn with_rate(mut self, granularity: Granularity, rate: u64, is_forecast: bool) -> Self {
        self.rates
            .push((granularity, RateEstimate { rate, is_forecast }));
        self
    }

    pub fn create(self) -> Bucket {
        let key_fields = if self.key_fields.is_empty() {
            KeyFields::new().with("id", "k1")
        } else {
            self.key_fields
        };

        let mut interval =
            CalendarTimeBucketer::new(TimeConfig::default()).resolve(self.at, self.granularity);
        if let Some(label) = self.label {
            interval.label = label;
        }

        let mut stats = accumulate::merge(
            &BucketStats::default(),
            &EventDelta::at(interval.start),
            self.window_size,
            &self.granularity.ladder(),
        );
        for (granularity, estimate) in self.rates {
            stats.averages.insert(granularity, estimate);
        }
        for (output, values) in self.series {
            stats.calculation_series.insert(output, values);
        }
        for (output, values) in self.uniques {
            let counter = stats.unique_counters.entry(output).or_default();
            for value in &values {
                counter.observe(value);
            }
        }

        Bucket {
            key_fields,
            created_at: interval.start,
            updated_at: interval.start,
            interval,
            count: self.count,
            stats,
            version: 0,
        }
    }
}
