use std::sync::Arc;

use axum::{Extension, Json};
use catalog_storage::{CatalogStore, Item, NewItem, StatusFilter};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::types::{optional_string, AdminSession, AppError, Created, JsonBody, QueryParams};

/// Query of a listing request
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListThingsQuery {
    /// `all`, `like`, `have` or `want`; absent means `all`
    pub status: Option<String>,
}

/// Body of a create request
///
/// Every field is optional on the wire so that a missing field is reported
/// with its own validation message. A field of the wrong JSON type counts as
/// missing.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateThingRequest {
    /// Non-empty title
    #[serde(default, deserialize_with = "optional_string")]
    pub title: Option<String>,
    /// `like`, `have` or `want`
    #[serde(default, deserialize_with = "optional_string")]
    pub status: Option<String>,
    /// Image URL, usually returned by `/api/upload`
    #[serde(default, deserialize_with = "optional_string")]
    pub image: Option<String>,
    /// Free-form description
    #[serde(default, deserialize_with = "optional_string")]
    pub description: Option<String>,
    /// External link
    #[serde(default, deserialize_with = "optional_string")]
    pub link: Option<String>,
}

/// Query of a delete request
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteThingQuery {
    /// Identifier of the item to remove
    pub id: Option<String>,
}

/// Body of a successful delete
#[derive(Debug, Serialize, JsonSchema)]
pub struct DeleteThingResponse {
    /// Always `true`, also when the id was unknown
    pub success: bool,
}

/// Returns the catalog in stored order
///
/// # Errors
///
/// - `400` - unknown status filter or malformed query string
/// - `500` - catalog could not be read
#[instrument(skip(catalog_store))]
pub async fn list_things(
    Extension(catalog_store): Extension<Arc<CatalogStore>>,
    QueryParams(query): QueryParams<ListThingsQuery>,
) -> Result<Json<Vec<Item>>, AppError> {
    let filter = StatusFilter::parse(query.status.as_deref())?;

    let items = catalog_store
        .list_all()
        .await
        .map_err(AppError::storage("Failed to fetch things"))?;

    Ok(Json(filter.apply(&items).into_iter().cloned().collect()))
}

/// Validates and appends a new item
///
/// # Errors
///
/// - `401` - missing or invalid session
/// - `400` - invalid payload
/// - `500` - catalog could not be written
#[instrument(skip_all)]
pub async fn create_thing(
    _session: AdminSession,
    Extension(catalog_store): Extension<Arc<CatalogStore>>,
    JsonBody(request): JsonBody<CreateThingRequest>,
) -> Result<Created<Item>, AppError> {
    let new_item = NewItem::parse(
        request.title.as_deref(),
        request.status.as_deref(),
        request.image.as_deref(),
    )?
    .with_description(request.description)
    .with_link(request.link);

    let item = catalog_store
        .append(new_item)
        .await
        .map_err(AppError::storage("Failed to create thing"))?;

    Ok(Created(item))
}

/// Removes an item by id; unknown ids succeed without changing anything
///
/// # Errors
///
/// - `401` - missing or invalid session
/// - `400` - no `id` query parameter or malformed query string
/// - `500` - catalog could not be written
#[instrument(skip(catalog_store))]
pub async fn delete_thing(
    _session: AdminSession,
    Extension(catalog_store): Extension<Arc<CatalogStore>>,
    QueryParams(query): QueryParams<DeleteThingQuery>,
) -> Result<Json<DeleteThingResponse>, AppError> {
    let id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::bad_request("Missing id parameter"))?;

    catalog_store
        .remove_by_id(&id)
        .await
        .map_err(AppError::storage("Failed to delete thing"))?;

    Ok(Json(DeleteThingResponse { success: true }))
}
