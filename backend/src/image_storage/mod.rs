//! Image ingestion: validation and content-addressed object storage
//!
//! An [`ImageUpload`] can only be built from bytes that carry an `image/*`
//! content type and fit the size limit. Stores place each upload under a key
//! derived from its content hash, so identical bytes always land on the same
//! object.

mod error;
#[cfg(any(test, feature = "test-utils"))]
mod memory;
mod s3;

use async_trait::async_trait;
use mime::Mime;
use sha2::{Digest, Sha256};

pub use error::{ImageStorageError, ImageStorageResult};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryImageStore;
pub use s3::S3ImageStore;

/// Largest accepted image: 5 MiB
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Key prefix of every stored image
const KEY_PREFIX: &str = "things";

/// A validated image waiting to be stored
#[derive(Debug, Clone)]
pub struct ImageUpload {
    bytes: Vec<u8>,
    content_type: Mime,
}

impl ImageUpload {
    /// Validates an uploaded file
    ///
    /// # Errors
    ///
    /// - `ImageStorageError::Empty` - no bytes
    /// - `ImageStorageError::InvalidType` - content type missing, unparsable or not `image/*`
    /// - `ImageStorageError::TooLarge` - more than [`MAX_IMAGE_BYTES`]
    pub fn new(bytes: Vec<u8>, content_type: Option<&str>) -> ImageStorageResult<Self> {
        if bytes.is_empty() {
            return Err(ImageStorageError::Empty);
        }

        let raw_type = content_type.unwrap_or_default();
        let content_type = raw_type
            .parse::<Mime>()
            .ok()
            .filter(|mime| mime.type_() == mime::IMAGE)
            .ok_or_else(|| ImageStorageError::InvalidType(raw_type.to_string()))?;

        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageStorageError::TooLarge);
        }

        Ok(Self {
            bytes,
            content_type,
        })
    }

    /// Raw image bytes
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the upload, returning its bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Content type without parameters, e.g. `image/png`
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.content_type.essence_str()
    }

    /// File extension taken from the MIME subtype (`image/svg+xml` gives `svg`)
    #[must_use]
    pub fn extension(&self) -> &str {
        match self.content_type.subtype().as_str() {
            "jpeg" => "jpg",
            subtype => subtype,
        }
    }

    /// Lowercase hex SHA-256 of the bytes
    #[must_use]
    pub fn sha256_hex(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }

    /// Content-addressed object key: `things/{h[0..2]}/{sha256}.{ext}`
    #[must_use]
    pub fn object_key(&self) -> String {
        let sha256 = self.sha256_hex();
        let shard = &sha256[0..2];
        format!("{KEY_PREFIX}/{shard}/{sha256}.{}", self.extension())
    }
}

/// Object store accepting validated images
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores the image and returns its public URL
    ///
    /// Storing bytes that are already present returns the existing URL.
    async fn store(&self, upload: ImageUpload) -> ImageStorageResult<String>;
}
