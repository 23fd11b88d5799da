//! Error types for image storage operations

use aws_sdk_s3::{
    error::SdkError,
    operation::{head_object::HeadObjectError, put_object::PutObjectError},
};
use thiserror::Error;

/// Result type for image storage operations
pub type ImageStorageResult<T> = Result<T, ImageStorageError>;

/// Errors that can occur while validating or storing an image
#[derive(Error, Debug)]
pub enum ImageStorageError {
    /// Upload carried no bytes
    #[error("No file provided")]
    Empty,

    /// Content type is missing or not `image/*`
    #[error("Not an image: {0}")]
    InvalidType(String),

    /// Upload exceeds the size limit
    #[error("File too large")]
    TooLarge,

    /// S3 service error
    #[error("S3 service error: {0}")]
    S3Error(String),

    /// Upstream service error (5xx from S3)
    #[error("Upstream service error: {0}")]
    UpstreamError(String),
}

impl From<SdkError<HeadObjectError>> for ImageStorageError {
    fn from(error: SdkError<HeadObjectError>) -> Self {
        match error {
            SdkError::ServiceError(err) => Self::S3Error(format!("{:?}", err.err())),
            _ => Self::S3Error(error.to_string()),
        }
    }
}

impl From<SdkError<PutObjectError>> for ImageStorageError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        match &error {
            SdkError::ServiceError(err) if err.raw().status().as_u16() >= 500 => {
                Self::UpstreamError(format!("{:?}", err.err()))
            }
            _ => Self::S3Error(error.to_string()),
        }
    }
}
