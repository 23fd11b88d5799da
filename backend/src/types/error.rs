//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_storage::{CatalogStorageError, ItemValidationError};
use schemars::JsonSchema;
use serde::Serialize;

use crate::image_storage::ImageStorageError;
use crate::session::SessionError;

/// Error envelope returned by every failing request
#[derive(Debug, Serialize, JsonSchema)]
pub struct ApiErrorResponse {
    /// Human-readable error message
    pub error: &'static str,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(status: StatusCode, msg: &'static str) -> Self {
        Self {
            status,
            inner: ApiErrorResponse { error: msg },
        }
    }

    /// 400 with the given message
    #[must_use]
    pub const fn bad_request(msg: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    /// 401 for a missing or invalid session
    #[must_use]
    pub const fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    /// Maps a catalog storage failure to a 500 carrying `msg`
    ///
    /// The storage error itself is logged but never sent to the client.
    pub fn storage(msg: &'static str) -> impl FnOnce(CatalogStorageError) -> Self {
        move |err| {
            tracing::error!("Catalog storage error: {err}");
            Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }

    /// Status code of the response
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Client-facing message
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.inner.error
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {} - {}", self.status, self.inner.error),
            500..=599 => tracing::error!("Server error: {} - {}", self.status, self.inner.error),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert item validation errors to application errors
impl From<ItemValidationError> for AppError {
    fn from(err: ItemValidationError) -> Self {
        Self::bad_request(err.message())
    }
}

/// Convert session errors to application errors
impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidPassword => {
                Self::new(StatusCode::UNAUTHORIZED, "Invalid password")
            }
            SessionError::InvalidToken(reason) => {
                tracing::debug!("Rejected session token: {reason}");
                Self::unauthorized()
            }
            SessionError::Encoding(reason) => {
                tracing::error!("Failed to sign session token: {reason}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to issue session")
            }
        }
    }
}

/// Convert image storage errors to application errors
impl From<ImageStorageError> for AppError {
    fn from(err: ImageStorageError) -> Self {
        use ImageStorageError::{Empty, InvalidType, S3Error, TooLarge, UpstreamError};

        match &err {
            Empty => Self::bad_request("No file provided"),
            InvalidType(content_type) => {
                tracing::debug!("Rejected upload with content type {content_type}");
                Self::bad_request("File must be an image")
            }
            TooLarge => Self::bad_request("File too large (max 5MB)"),
            UpstreamError(msg) | S3Error(msg) => {
                tracing::error!("Image storage error: {msg}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Upload failed")
            }
        }
    }
}

/// Convert multipart read failures to application errors
impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ImageStorageError::TooLarge.into();
        }
        tracing::warn!("Malformed multipart body: {}", err.body_text());
        Self::bad_request("No file provided")
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}
