use std::sync::Arc;

use axum::{Extension, Json};
use catalog_storage::{seed::default_seed_items, CatalogStore, SeedOutcome};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::instrument;

use crate::types::{AdminSession, AppError};

/// Outcome of a seed request
#[derive(Debug, Serialize, JsonSchema)]
pub struct SeedResponse {
    /// Whether the sample items were written or skipped
    pub message: String,
    /// Items in the catalog after the call
    pub count: usize,
}

/// Writes the sample items into an empty catalog; a populated one is left alone
///
/// # Errors
///
/// - `401` - missing or invalid session
/// - `500` - catalog could not be read or written
#[instrument(skip_all)]
pub async fn seed_things(
    _session: AdminSession,
    Extension(catalog_store): Extension<Arc<CatalogStore>>,
) -> Result<Json<SeedResponse>, AppError> {
    let outcome = catalog_store
        .seed(default_seed_items())
        .await
        .map_err(AppError::storage("Failed to seed"))?;

    let (message, count) = match outcome {
        SeedOutcome::Seeded { count } => ("Successfully seeded things", count),
        SeedOutcome::AlreadyPopulated { count } => ("Things already exist. Skipping seed.", count),
    };

    Ok(Json(SeedResponse {
        message: message.to_string(),
        count,
    }))
}
