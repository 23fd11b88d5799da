use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    Extension, Json,
};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::instrument;

use crate::{
    image_storage::{ImageStorageError, ImageStore, ImageUpload, MAX_IMAGE_BYTES},
    types::{AdminSession, AppError},
};

/// Multipart field carrying the image
const FILE_FIELD: &str = "file";

/// Request body limit of the upload route: the image plus multipart overhead
pub const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 1024 * 1024;

/// Body of a successful upload
#[derive(Debug, Serialize, JsonSchema)]
pub struct UploadResponse {
    /// Public URL of the stored image
    pub url: String,
}

/// Stores an uploaded image and returns its public URL
///
/// # Errors
///
/// - `401` - missing or invalid session
/// - `400` - no `file` field, not an image, or larger than 5 MiB
/// - `500` - object store failure
#[instrument(skip_all)]
pub async fn upload_image(
    _session: AdminSession,
    Extension(image_store): Extension<Arc<dyn ImageStore>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::warn!("Upload is not a multipart body: {rejection}");
        AppError::from(ImageStorageError::Empty)
    })?;

    let upload = read_file_field(&mut multipart).await?;
    let url = image_store.store(upload).await?;

    Ok(Json(UploadResponse { url }))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<ImageUpload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(ToString::to_string);
        let bytes = field.bytes().await?;

        return Ok(ImageUpload::new(bytes.to_vec(), content_type.as_deref())?);
    }

    Err(ImageStorageError::Empty.into())
}
