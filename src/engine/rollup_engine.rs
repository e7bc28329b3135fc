use crate::engine::errors::RollupError;
use crate::engine::query::{RollupReader, RollupReport};
use crate::engine::schema::RollupSchema;
use crate::engine::storage::BucketStore;
use crate::engine::store::{BucketRecorder, RecordOutcome};
use crate::engine::types::{Bucket, Event, KeyFields};
use crate::shared::clock::{Clock, SystemClock};
use crate::shared::config::StorageConfig;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Write and read paths over one schema, clock and store.
pub struct RollupEngine {
    schema: Arc<RollupSchema>,
    recorder: BucketRecorder,
    reader: RollupReader,
}

impl RollupEngine {
    pub fn new(schema: RollupSchema, store: Arc<dyn BucketStore>, storage: &StorageConfig) -> Self {
        Self::with_clock(schema, store, Arc::new(SystemClock), storage)
    }

    pub fn with_clock(
        schema: RollupSchema,
        store: Arc<dyn BucketStore>,
        clock: Arc<dyn Clock>,
        storage: &StorageConfig,
    ) -> Self {
        let schema = Arc::new(schema);
        Self {
            recorder: BucketRecorder::new(
                Arc::clone(&schema),
                Arc::clone(&store),
                clock,
                storage.timeout,
            ),
            reader: RollupReader::new(Arc::clone(&schema), store, storage.timeout),
            schema,
        }
    }

    pub fn schema(&self) -> &RollupSchema {
        &self.schema
    }

    pub async fn record(&self, event: &Event) -> Result<RecordOutcome, RollupError> {
        self.recorder.record(event).await
    }

    pub async fn record_batch(&self, events: &[Event]) -> Result<Vec<RecordOutcome>, RollupError> {
        self.recorder.record_batch(events).await
    }

    pub async fn current_bucket(&self, event: &Event) -> Result<Option<Bucket>, RollupError> {
        self.recorder.current_bucket(event).await
    }

    pub async fn query(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        key_filter: &KeyFields,
    ) -> Result<Option<RollupReport>, RollupError> {
        self.reader.query(start, end, key_filter).await
    }
}
