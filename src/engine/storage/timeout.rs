use crate::engine::errors::StorageError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Bounds a storage call. Expiry surfaces as [`StorageError::Timeout`].
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, StorageError>
where
    F: Future<Output = Result<T, StorageError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(target: "snel_rollup::storage", ?limit, "Storage call timed out");
            Err(StorageError::Timeout(limit))
        }
    }
}
