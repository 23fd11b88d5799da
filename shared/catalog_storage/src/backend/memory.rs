use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::CollectionBackend;
use crate::store::CatalogStorageResult;

/// In-process backend with the same compare-and-swap semantics as Redis
#[derive(Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites `key` unconditionally, bypassing compare-and-swap
    pub async fn put_raw(&self, key: &str, value: &str) {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl CollectionBackend for MemoryBackend {
    async fn load(&self, key: &str) -> CatalogStorageResult<Option<String>> {
        let value = self.values.lock().await.get(key).cloned();
        // Widen the window between load and swap so concurrent writers interleave
        tokio::task::yield_now().await;
        Ok(value)
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> CatalogStorageResult<bool> {
        let mut values = self.values.lock().await;
        if values.get(key).map(String::as_str) != expected {
            return Ok(false);
        }
        values.insert(key.to_string(), new.to_string());
        Ok(true)
    }
}
