use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{ImageStorageResult, ImageStore, ImageUpload};

/// In-process image store keyed like the S3 store
pub struct MemoryImageStore {
    public_base_url: String,
    objects: Mutex<HashMap<String, ImageUpload>>,
}

impl MemoryImageStore {
    /// Creates an empty store serving URLs under `public_base_url`
    #[must_use]
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    /// Number of distinct objects stored
    pub async fn len(&self) -> usize {
        self.objects.lock().await.len()
    }

    /// Whether nothing was stored yet
    pub async fn is_empty(&self) -> bool {
        self.objects.lock().await.is_empty()
    }

    /// Stored upload under `key`, if any
    pub async fn get(&self, key: &str) -> Option<ImageUpload> {
        self.objects.lock().await.get(key).cloned()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn store(&self, upload: ImageUpload) -> ImageStorageResult<String> {
        let key = upload.object_key();
        let url = format!("{}/{key}", self.public_base_url);
        self.objects.lock().await.entry(key).or_insert(upload);
        Ok(url)
    }
}
