use super::filter::{BucketFilter, sort_by_label};
use super::merge_ops::MergeOps;
use super::traits::{BucketStore, UpsertOutcome, VersionedBucketStore};
use crate::engine::errors::StorageError;
use crate::engine::types::{Bucket, KeyFields};
use crate::shared::config::RetryConfig;
use crate::shared::datetime::BucketInterval;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Builds an atomic upsert out of read-then-conditional-write.
///
/// Each attempt either inserts the seed bucket if none exists, or re-applies
/// the merge to the freshly read bucket and writes it back only if its version
/// is unchanged. Attempts are bounded; exhaustion is a [`StorageError::Conflict`].
pub struct CasBucketStore<S> {
    inner: S,
    retry: RetryConfig,
}

impl<S: VersionedBucketStore> CasBucketStore<S> {
    pub fn new(inner: S, retry: RetryConfig) -> Self {
        Self { inner, retry }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn max_attempts(&self) -> u32 {
        self.retry.max_attempts.max(1)
    }
}

#[async_trait]
impl<S: VersionedBucketStore> BucketStore for CasBucketStore<S> {
    async fn find_bucket(
        &self,
        key_fields: &KeyFields,
        interval: &BucketInterval,
    ) -> Result<Option<Bucket>, StorageError> {
        self.inner.load_bucket(key_fields, interval).await
    }

    async fn upsert_bucket(
        &self,
        key_fields: &KeyFields,
        interval: &BucketInterval,
        create: Bucket,
        ops: &MergeOps,
    ) -> Result<UpsertOutcome, StorageError> {
        let attempts = self.max_attempts();

        for attempt in 0..attempts {
            let written = match self.inner.load_bucket(key_fields, interval).await? {
                None => self
                    .inner
                    .insert_if_absent(create.clone())
                    .await?
                    .then_some(UpsertOutcome::Created),
                Some(mut current) => {
                    let expected = current.version;
                    ops.apply(&mut current);
                    self.inner
                        .replace_if_version(current, expected)
                        .await?
                        .then_some(UpsertOutcome::Merged)
                }
            };

            if let Some(outcome) = written {
                return Ok(outcome);
            }

            let delay = self.retry.backoff(attempt);
            debug!(
                target: "snel_rollup::storage::cas",
                attempt = attempt + 1,
                ?delay,
                label = %interval.label,
                "Conditional write lost a race; retrying"
            );
            if attempt + 1 < attempts {
                tokio::time::sleep(delay).await;
            }
        }

        warn!(
            target: "snel_rollup::storage::cas",
            attempts,
            label = %interval.label,
            "Giving up on contended bucket"
        );
        Err(StorageError::Conflict { attempts })
    }

    async fn scan_buckets(&self, filter: &BucketFilter) -> Result<Vec<Bucket>, StorageError> {
        let mut hits = self.inner.list_buckets(filter).await?;
        sort_by_label(&mut hits);
        Ok(hits)
    }
}
