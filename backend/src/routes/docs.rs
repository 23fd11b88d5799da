//! API reference: Scalar UI and the generated OpenAPI document

use aide::{axum::ApiRouter, openapi::OpenApi, scalar::Scalar};
use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Extension, Json,
};

use crate::types::{AppError, Environment};

/// Path of the generated OpenAPI document
const OPENAPI_PATH: &str = "/openapi.json";

/// Title shown by the reference UI
const DOCS_TITLE: &str = "Things Catalog API";

/// Routes serving `/docs` and the OpenAPI document, both hidden in production
pub fn handler() -> ApiRouter {
    let scalar = Scalar::new(OPENAPI_PATH).with_title(DOCS_TITLE);

    ApiRouter::new()
        .route("/docs", scalar.axum_route())
        .route(OPENAPI_PATH, get(openapi_document))
        .layer(middleware::from_fn(require_api_docs))
}

/// Answers `404` for every docs route when the environment hides them
async fn require_api_docs(
    Extension(environment): Extension<Environment>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !environment.show_api_docs() {
        return Err(AppError::new(StatusCode::NOT_FOUND, "Not found"));
    }

    Ok(next.run(request).await)
}

#[allow(clippy::unused_async)]
async fn openapi_document(Extension(openapi): Extension<OpenApi>) -> Json<OpenApi> {
    Json(openapi)
}
