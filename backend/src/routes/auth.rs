use std::sync::Arc;

use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    session::AccessGate,
    types::{optional_string, AppError, JsonBody},
};

/// Body of a login request
#[derive(Deserialize, JsonSchema)]
pub struct LoginRequest {
    /// Shared admin password; a non-string value never matches
    #[serde(default, deserialize_with = "optional_string")]
    pub password: Option<String>,
}

/// Issued admin session
#[derive(Debug, Serialize, JsonSchema)]
pub struct LoginResponse {
    /// Bearer token for admin routes
    pub access_token: String,
    /// Expires at Unix timestamp in seconds
    pub expires_at: i64,
}

/// Exchanges the admin password for a session token
///
/// # Errors
///
/// - `401` - wrong or missing password
/// - `400` - malformed body
#[instrument(skip_all)]
pub async fn login(
    Extension(access_gate): Extension<Arc<AccessGate>>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let session = access_gate.login(request.password.as_deref().unwrap_or_default())?;

    Ok(Json(LoginResponse {
        access_token: session.token,
        expires_at: session.expires_at,
    }))
}
