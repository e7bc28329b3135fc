use crate::engine::errors::RollupError;
use crate::engine::schema::RollupSchema;
use crate::engine::storage::{BucketStore, MergeOps, with_timeout};
use crate::engine::types::{Bucket, Event};
use crate::shared::clock::Clock;
use crate::shared::datetime::{BucketInterval, CalendarTimeBucketer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Result of recording one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    /// True when the event opened a new bucket.
    pub created: bool,
    pub interval: BucketInterval,
}

/// Write path: folds events into the bucket for (key fields, current interval).
///
/// Buckets are addressed by arrival time from the clock, never by a timestamp
/// carried in the event.
pub struct BucketRecorder {
    schema: Arc<RollupSchema>,
    store: Arc<dyn BucketStore>,
    clock: Arc<dyn Clock>,
    bucketer: CalendarTimeBucketer,
    timeout: Duration,
}

impl BucketRecorder {
    pub fn new(
        schema: Arc<RollupSchema>,
        store: Arc<dyn BucketStore>,
        clock: Arc<dyn Clock>,
        timeout: Duration,
    ) -> Self {
        let bucketer = schema.bucketer();
        Self {
            schema,
            store,
            clock,
            bucketer,
            timeout,
        }
    }

    pub async fn record(&self, event: &Event) -> Result<RecordOutcome, RollupError> {
        let key_fields = self.schema.extract_keys(event)?;
        let now = self.clock.now();
        let delta = self.schema.extract_delta(event, now)?;
        let interval = self.bucketer.resolve(now, self.schema.granularity());

        let ops = MergeOps::new(delta, self.schema.window_size(), self.schema.ladder());
        let seed = ops.seed(&key_fields, &interval);

        let outcome = with_timeout(
            self.timeout,
            self.store
                .upsert_bucket(&key_fields, &interval, seed, &ops),
        )
        .await?;

        debug!(
            target: "snel_rollup::store",
            key = %key_fields.canonical(),
            label = %interval.label,
            created = outcome.created(),
            "Recorded event"
        );

        Ok(RecordOutcome {
            created: outcome.created(),
            interval,
        })
    }

    /// Records events in order, stopping at the first failure.
    pub async fn record_batch(&self, events: &[Event]) -> Result<Vec<RecordOutcome>, RollupError> {
        let mut outcomes = Vec::with_capacity(events.len());
        for event in events {
            outcomes.push(self.record(event).await?);
        }
        info!(
            target: "snel_rollup::store",
            events = events.len(),
            created = outcomes.iter().filter(|o| o.created).count(),
            "Recorded batch"
        );
        Ok(outcomes)
    }

    /// The bucket this event would merge into if recorded now.
    pub async fn current_bucket(&self, event: &Event) -> Result<Option<Bucket>, RollupError> {
        let key_fields = self.schema.extract_keys(event)?;
        let interval = self
            .bucketer
            .resolve(self.clock.now(), self.schema.granularity());
        let found = with_timeout(
            self.timeout,
            self.store.find_bucket(&key_fields, &interval),
        )
        .await?;
        Ok(found)
    }
}
