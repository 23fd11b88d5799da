mod auth;
mod docs;
mod health;
mod seed;
mod things;
mod upload;

use aide::axum::{
    routing::{get, get_with, post, post_with},
    ApiRouter,
};
use axum::extract::DefaultBodyLimit;
use catalog_storage::Item;

use crate::types::Created;

/// Creates the router with all handler routes
#[must_use]
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler())
        .api_route("/health", get(health::handler))
        .api_route(
            "/api/things",
            get_with(things::list_things, |op| {
                op.description("Lists the catalog, optionally filtered by status")
            })
            .post_with(things::create_thing, |op| {
                op.description("Appends an item (admin only)")
                    .response::<201, Created<Item>>()
            })
            .delete(things::delete_thing),
        )
        .api_route("/api/auth/login", post(auth::login))
        .api_route(
            "/api/seed",
            post_with(seed::seed_things, |op| {
                op.description("Fills an empty catalog with sample items (admin only)")
            }),
        )
        // Multipart is served by the plain axum router; it needs its own body limit
        .route(
            "/api/upload",
            axum::routing::post(upload::upload_image)
                .layer(DefaultBodyLimit::max(upload::UPLOAD_BODY_LIMIT)),
        )
}
