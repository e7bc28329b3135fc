use crate::engine::core::accumulate::{self, EventDelta};
use crate::engine::types::{Bucket, BucketStats, KeyFields};
use crate::shared::datetime::{BucketInterval, Granularity};
use chrono::{DateTime, Utc};

/// Everything a store needs to fold one event into a bucket without calling
/// back into the engine.
#[derive(Debug, Clone)]
pub struct MergeOps {
    pub delta: EventDelta,
    pub window_size: usize,
    pub ladder: Vec<Granularity>,
    pub at: DateTime<Utc>,
}

impl MergeOps {
    pub fn new(delta: EventDelta, window_size: usize, ladder: Vec<Granularity>) -> Self {
        let at = delta.timestamp;
        Self {
            delta,
            window_size,
            ladder,
            at,
        }
    }

    /// Applies the event to an existing bucket.
    pub fn apply(&self, bucket: &mut Bucket) {
        bucket.count += 1;
        accumulate::apply(&mut bucket.stats, &self.delta, self.window_size, &self.ladder);
        bucket.updated_at = self.at;
        bucket.version += 1;
    }

    /// The bucket to insert when this event is the first in its interval.
    pub fn seed(&self, key_fields: &KeyFields, interval: &BucketInterval) -> Bucket {
        Bucket {
            key_fields: key_fields.clone(),
            interval: interval.clone(),
            count: 1,
            stats: accumulate::merge(
                &BucketStats::default(),
                &self.delta,
                self.window_size,
                &self.ladder,
            ),
            created_at: self.at,
            updated_at: self.at,
            version: 0,
        }
    }
}
