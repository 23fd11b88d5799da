//! Liveness check that also reaches the catalog

use std::sync::Arc;

use axum::{http::StatusCode, Extension, Json};
use catalog_storage::CatalogStore;
use schemars::JsonSchema;
use serde::Serialize;

use crate::types::AppError;

/// Health report
#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    /// Always `ok`; an unreachable catalog answers `503` instead
    status: &'static str,
    /// Items currently in the catalog
    items: usize,
    /// Current version of the application
    semver: &'static str,
    /// Commit hash of the current build (if available)
    rev: Option<&'static str>,
}

/// Reports version information once the catalog could be read
///
/// # Errors
///
/// - `503` - the catalog backend is unreachable or holds unreadable data
pub async fn handler(
    Extension(catalog_store): Extension<Arc<CatalogStore>>,
) -> Result<Json<HealthResponse>, AppError> {
    let items = catalog_store.list_all().await.map_err(|err| {
        tracing::error!(error = %err, "Health check could not read the catalog");
        AppError::new(StatusCode::SERVICE_UNAVAILABLE, "Catalog unavailable")
    })?;

    Ok(Json(HealthResponse {
        status: "ok",
        items: items.len(),
        semver: env!("CARGO_PKG_VERSION"),
        rev: option_env!("GIT_REV"),
    }))
}
