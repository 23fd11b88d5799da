use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::{
    error::SdkError, operation::head_object::HeadObjectError, primitives::ByteStream,
    Client as S3Client,
};
use tracing::{debug, info, instrument};

use super::{ImageStorageError, ImageStorageResult, ImageStore, ImageUpload};

/// Image store backed by an S3 bucket
pub struct S3ImageStore {
    s3_client: Arc<S3Client>,
    bucket_name: String,
    public_base_url: String,
}

impl S3ImageStore {
    /// Creates a new S3 image store
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket name for image storage
    /// * `public_base_url` - Base URL the bucket is served from, without a trailing slash
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String, public_base_url: String) -> Self {
        Self {
            s3_client,
            bucket_name,
            public_base_url,
        }
    }

    /// Public URL of an object key
    #[must_use]
    pub fn public_url(&self, s3_key: &str) -> String {
        format!("{}/{s3_key}", self.public_base_url)
    }

    /// Checks if an object exists in the bucket
    ///
    /// # Errors
    ///
    /// Returns `ImageStorageError::UpstreamError` for 5xx errors and
    /// `ImageStorageError::S3Error` for anything else but "not found"
    async fn check_object_exists(&self, s3_key: &str) -> ImageStorageResult<bool> {
        let result = self
            .s3_client
            .head_object()
            .bucket(&self.bucket_name)
            .key(s3_key)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(service_err))
                if matches!(service_err.err(), HeadObjectError::NotFound(_)) =>
            {
                Ok(false)
            }
            Err(SdkError::ServiceError(service_err))
                if service_err.raw().status().as_u16() >= 500 =>
            {
                Err(ImageStorageError::UpstreamError(format!("{service_err:?}")))
            }
            Err(e) => Err(ImageStorageError::from(e)),
        }
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    #[instrument(skip(self, upload), fields(content_type = upload.content_type(), size = upload.bytes().len()))]
    async fn store(&self, upload: ImageUpload) -> ImageStorageResult<String> {
        let s3_key = upload.object_key();

        if self.check_object_exists(&s3_key).await? {
            debug!(s3_key, "Image already stored, skipping upload");
            return Ok(self.public_url(&s3_key));
        }

        let content_type = upload.content_type().to_string();
        let content_length = i64::try_from(upload.bytes().len())
            .map_err(|_| ImageStorageError::TooLarge)?;

        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&s3_key)
            .content_type(content_type)
            .content_length(content_length)
            .body(ByteStream::from(upload.into_bytes()))
            .send()
            .await?;

        info!(s3_key, "Image stored");
        Ok(self.public_url(&s3_key))
    }
}
