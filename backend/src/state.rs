//! Services shared across handlers

use std::sync::Arc;

use axum::{Extension, Router};
use catalog_storage::CatalogStore;

use crate::{image_storage::ImageStore, session::AccessGate};

/// Collaborators built once at startup and injected into every request
#[derive(Clone)]
pub struct AppState {
    /// Item collection
    pub catalog_store: Arc<CatalogStore>,
    /// Admin password check and session tokens
    pub access_gate: Arc<AccessGate>,
    /// Object store for uploaded images
    pub image_store: Arc<dyn ImageStore>,
}

impl AppState {
    /// Adds each service to `router` as an `Extension` layer
    pub fn attach(self, router: Router) -> Router {
        router
            .layer(Extension(self.catalog_store))
            .layer(Extension(self.access_gate))
            .layer(Extension(self.image_store))
    }
}
