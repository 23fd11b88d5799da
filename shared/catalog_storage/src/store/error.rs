//! Error types for catalog storage operations

use thiserror::Error;

/// Result type for catalog storage operations
pub type CatalogStorageResult<T> = Result<T, CatalogStorageError>;

/// Errors that can occur during catalog storage operations
#[derive(Error, Debug)]
pub enum CatalogStorageError {
    /// Redis command or connection failed
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Redis did not answer in time
    #[error("Redis timeout")]
    Timeout,

    /// Stored collection could not be decoded, or encoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Concurrent writers kept changing the collection
    #[error("Collection changed concurrently {attempts} times in a row")]
    Conflict {
        /// Number of compare-and-swap attempts made
        attempts: u32,
    },
}
