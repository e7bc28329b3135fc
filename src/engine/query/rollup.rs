use super::reduce::reduce;
use super::report::RollupReport;
use crate::engine::errors::{RollupError, ValidationError};
use crate::engine::schema::RollupSchema;
use crate::engine::storage::{BucketFilter, BucketStore, with_timeout};
use crate::engine::types::KeyFields;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Read path. Never mutates storage.
pub struct RollupReader {
    schema: Arc<RollupSchema>,
    store: Arc<dyn BucketStore>,
    timeout: Duration,
}

impl RollupReader {
    pub fn new(schema: Arc<RollupSchema>, store: Arc<dyn BucketStore>, timeout: Duration) -> Self {
        Self {
            schema,
            store,
            timeout,
        }
    }

    /// Reduces every bucket for `key_filter` lying inside `[start, end]`.
    ///
    /// Returns `Ok(None)` when no bucket matches.
    pub async fn query(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        key_filter: &KeyFields,
    ) -> Result<Option<RollupReport>, RollupError> {
        if start > end {
            return Err(ValidationError::InvalidRange { start, end }.into());
        }
        self.schema.validate_filter(key_filter)?;

        let filter = BucketFilter::new(
            key_filter.clone(),
            self.schema.granularity(),
            start,
            end,
        );
        let buckets = with_timeout(self.timeout, self.store.scan_buckets(&filter)).await?;

        debug!(
            target: "snel_rollup::query",
            matched = buckets.len(),
            %start,
            %end,
            "Scanned buckets"
        );

        Ok(reduce(&buckets, &self.schema))
    }
}
