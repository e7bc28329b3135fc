use super::filter::BucketFilter;
use super::merge_ops::MergeOps;
use crate::engine::errors::StorageError;
use crate::engine::types::{Bucket, KeyFields};
use crate::shared::datetime::BucketInterval;
use async_trait::async_trait;

/// Whether an upsert created the bucket or merged into an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Merged,
}

impl UpsertOutcome {
    pub fn created(&self) -> bool {
        matches!(self, UpsertOutcome::Created)
    }
}

/// Storage collaborator for the write and read paths.
///
/// `upsert_bucket` must be atomic per (key fields, interval): concurrent calls
/// for the same pair apply every merge exactly once, and at most one of them
/// reports [`UpsertOutcome::Created`].
#[async_trait]
pub trait BucketStore: Send + Sync {
    async fn find_bucket(
        &self,
        key_fields: &KeyFields,
        interval: &BucketInterval,
    ) -> Result<Option<Bucket>, StorageError>;

    /// Inserts `create` if no bucket exists for the pair, otherwise applies
    /// `ops` to the stored bucket.
    async fn upsert_bucket(
        &self,
        key_fields: &KeyFields,
        interval: &BucketInterval,
        create: Bucket,
        ops: &MergeOps,
    ) -> Result<UpsertOutcome, StorageError>;

    /// Buckets matching the filter, in label order.
    async fn scan_buckets(&self, filter: &BucketFilter) -> Result<Vec<Bucket>, StorageError>;
}

/// Document store with only conditional writes. Wrap in
/// [`CasBucketStore`](super::CasBucketStore) to get a [`BucketStore`].
#[async_trait]
pub trait VersionedBucketStore: Send + Sync {
    async fn load_bucket(
        &self,
        key_fields: &KeyFields,
        interval: &BucketInterval,
    ) -> Result<Option<Bucket>, StorageError>;

    /// Returns false when a bucket with the same identity already exists.
    async fn insert_if_absent(&self, bucket: Bucket) -> Result<bool, StorageError>;

    /// Returns false when the stored version is no longer `expected_version`.
    async fn replace_if_version(
        &self,
        bucket: Bucket,
        expected_version: u64,
    ) -> Result<bool, StorageError>;

    async fn list_buckets(&self, filter: &BucketFilter) -> Result<Vec<Bucket>, StorageError>;
}
