use crate::engine::types::{Bucket, KeyFields};
use crate::shared::datetime::Granularity;
use chrono::{DateTime, Utc};

/// Selects buckets of one granularity lying fully inside `[start, end]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketFilter {
    pub key_fields: KeyFields,
    pub granularity: Granularity,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BucketFilter {
    pub fn new(
        key_fields: KeyFields,
        granularity: Granularity,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            key_fields,
            granularity,
            start,
            end,
        }
    }

    pub fn matches(&self, bucket: &Bucket) -> bool {
        bucket.interval.granularity == self.granularity
            && bucket.interval.start >= self.start
            && bucket.interval.end <= self.end
            && bucket.key_fields.matches(&self.key_fields)
    }
}

/// Orders scan results by label, then by start for labels repeated in a DST fold.
pub fn sort_by_label(buckets: &mut [Bucket]) {
    buckets.sort_by(|a, b| {
        a.interval
            .label
            .cmp(&b.interval.label)
            .then(a.interval.start.cmp(&b.interval.start))
    });
}
