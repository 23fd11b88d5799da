//! Key-value backends holding serialized collections

#[cfg(any(test, feature = "test-utils"))]
mod memory;
mod redis_backend;

use async_trait::async_trait;

use crate::store::CatalogStorageResult;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryBackend;
pub use redis_backend::{RedisBackend, RedisClient};

/// Storage primitive behind the catalog: a raw value per key with an atomic
/// compare-and-swap
#[async_trait]
pub trait CollectionBackend: Send + Sync {
    /// Loads the raw value stored under `key`, `None` if never written
    async fn load(&self, key: &str) -> CatalogStorageResult<Option<String>>;

    /// Writes `new` under `key` only if the current value equals `expected`
    /// (`None` meaning the key must be absent)
    ///
    /// Returns `false` when the stored value changed since it was read.
    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> CatalogStorageResult<bool>;
}
