use super::filter::{BucketFilter, sort_by_label};
use super::merge_ops::MergeOps;
use super::traits::{BucketStore, UpsertOutcome, VersionedBucketStore};
use crate::engine::errors::StorageError;
use crate::engine::types::{Bucket, BucketId, KeyFields};
use crate::shared::datetime::BucketInterval;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::trace;

/// In-process bucket store. Upserts run under one write lock, so they are
/// atomic per bucket.
#[derive(Debug, Default)]
pub struct MemoryBucketStore {
    buckets: RwLock<HashMap<BucketId, Bucket>>,
}

impl MemoryBucketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buckets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.read().is_empty()
    }

    /// Stores a bucket as-is, replacing any bucket with the same identity.
    pub fn put(&self, bucket: Bucket) {
        self.buckets.write().insert(bucket.id(), bucket);
    }

    fn get(&self, key_fields: &KeyFields, interval: &BucketInterval) -> Option<Bucket> {
        let id = BucketId::new(key_fields, interval);
        self.buckets.read().get(&id).cloned()
    }

    fn select(&self, filter: &BucketFilter) -> Vec<Bucket> {
        let mut hits: Vec<Bucket> = self
            .buckets
            .read()
            .values()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        sort_by_label(&mut hits);
        hits
    }
}

#[async_trait]
impl BucketStore for MemoryBucketStore {
    async fn find_bucket(
        &self,
        key_fields: &KeyFields,
        interval: &BucketInterval,
    ) -> Result<Option<Bucket>, StorageError> {
        Ok(self.get(key_fields, interval))
    }

    async fn upsert_bucket(
        &self,
        key_fields: &KeyFields,
        interval: &BucketInterval,
        create: Bucket,
        ops: &MergeOps,
    ) -> Result<UpsertOutcome, StorageError> {
        let id = BucketId::new(key_fields, interval);
        let mut buckets = self.buckets.write();
        match buckets.entry(id) {
            Entry::Occupied(mut slot) => {
                ops.apply(slot.get_mut());
                trace!(target: "snel_rollup::storage::memory", label = %interval.label, "Merged into bucket");
                Ok(UpsertOutcome::Merged)
            }
            Entry::Vacant(slot) => {
                slot.insert(create);
                trace!(target: "snel_rollup::storage::memory", label = %interval.label, "Created bucket");
                Ok(UpsertOutcome::Created)
            }
        }
    }

    async fn scan_buckets(&self, filter: &BucketFilter) -> Result<Vec<Bucket>, StorageError> {
        Ok(self.select(filter))
    }
}

#[async_trait]
impl VersionedBucketStore for MemoryBucketStore {
    async fn load_bucket(
        &self,
        key_fields: &KeyFields,
        interval: &BucketInterval,
    ) -> Result<Option<Bucket>, StorageError> {
        Ok(self.get(key_fields, interval))
    }

    async fn insert_if_absent(&self, bucket: Bucket) -> Result<bool, StorageError> {
        match self.buckets.write().entry(bucket.id()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(bucket);
                Ok(true)
            }
        }
    }

    async fn replace_if_version(
        &self,
        bucket: Bucket,
        expected_version: u64,
    ) -> Result<bool, StorageError> {
        let mut buckets = self.buckets.write();
        match buckets.get_mut(&bucket.id()) {
            Some(stored) if stored.version == expected_version => {
                *stored = bucket;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_buckets(&self, filter: &BucketFilter) -> Result<Vec<Bucket>, StorageError> {
        Ok(self.select(filter))
    }
}
