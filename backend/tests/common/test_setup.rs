use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, response::Response, Router};
use backend::{
    image_storage::MemoryImageStore, server, session::AccessGate, state::AppState,
    types::Environment,
};
use catalog_storage::{backend::MemoryBackend, seed::default_seed_items, CatalogStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "correct-horse";
pub const SESSION_SECRET: &[u8] = b"integration-test-secret";
pub const IMAGE_BASE_URL: &str = "https://images.test";
pub const MULTIPART_BOUNDARY: &str = "things-test-boundary";

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    dotenvy::from_path(".env.example").ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Router wired to in-memory collaborators
pub struct TestSetup {
    pub router: Router,
    pub backend: Arc<MemoryBackend>,
    pub catalog_store: Arc<CatalogStore>,
    pub access_gate: Arc<AccessGate>,
    pub image_store: Arc<MemoryImageStore>,
}

impl TestSetup {
    pub fn new() -> Self {
        Self::with_environment(Environment::Development)
    }

    pub fn with_environment(environment: Environment) -> Self {
        setup_test_env();

        let backend = Arc::new(MemoryBackend::new());
        let catalog_store = Arc::new(CatalogStore::new(backend.clone(), "things"));
        let access_gate = Arc::new(AccessGate::new(
            ADMIN_PASSWORD.to_string(),
            SESSION_SECRET,
            Duration::from_secs(3600),
        ));
        let image_store = Arc::new(MemoryImageStore::new(IMAGE_BASE_URL));

        let router = server::router(
            environment,
            AppState {
                catalog_store: catalog_store.clone(),
                access_gate: access_gate.clone(),
                image_store: image_store.clone(),
            },
        );

        Self {
            router,
            backend,
            catalog_store,
            access_gate,
            image_store,
        }
    }

    /// Same as `new`, with the sample items already stored
    pub async fn seeded() -> Self {
        let setup = Self::new();
        setup
            .catalog_store
            .seed(default_seed_items())
            .await
            .expect("Failed to seed catalog");
        setup
    }

    /// Logs in with the admin password and returns the bearer token
    pub fn admin_token(&self) -> String {
        self.access_gate
            .login(ADMIN_PASSWORD)
            .expect("Failed to log in")
            .token
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    pub async fn send_get_request(&self, route: &str) -> Response {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn send_json_request(
        &self,
        method: &str,
        route: &str,
        payload: &serde_json::Value,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder()
            .uri(route)
            .method(method)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        self.send(builder.body(Body::from(payload.to_string())).unwrap())
            .await
    }

    pub async fn send_authorized_request(
        &self,
        method: &str,
        route: &str,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().uri(route).method(method);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Posts a multipart body with one part named `field_name`
    pub async fn send_upload_request(
        &self,
        field_name: &str,
        content_type: &str,
        bytes: &[u8],
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder()
            .uri("/api/upload")
            .method("POST")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            );
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let body = multipart_body(field_name, content_type, bytes);
        self.send(builder.body(Body::from(body)).unwrap()).await
    }
}

/// Encodes a single-part `multipart/form-data` body
pub fn multipart_body(field_name: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{MULTIPART_BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field_name}\"; filename=\"upload.bin\"\r\n\
         Content-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&body).expect("Body is not JSON")
}
