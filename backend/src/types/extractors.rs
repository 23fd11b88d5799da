//! Custom extractors for request parsing and authentication

use std::sync::Arc;

use aide::operation::OperationInput;
use aide::OperationIo;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Query, Request},
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};
use schemars::JsonSchema;

use crate::session::{AccessGate, SessionClaims};
use crate::types::error::AppError;

/// JSON extractor that reports malformed payloads in the API error envelope
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: serde::de::DeserializeOwned + JsonSchema,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| match err {
                JsonRejection::MissingJsonContentType(_) => {
                    AppError::bad_request("Missing Content-Type: application/json header")
                }
                _ => AppError::bad_request("Invalid JSON payload"),
            })?;

        Ok(Self(payload))
    }
}

impl<T> OperationInput for JsonBody<T>
where
    T: JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        // Same wire shape as Json<T>
        Json::<T>::operation_input(ctx, operation);
    }
}

/// Query string extractor that reports undecodable parameters in the API
/// error envelope
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "Rejected query string");
                AppError::bad_request("Invalid query parameters")
            })?;

        Ok(Self(params))
    }
}

impl<T> OperationInput for QueryParams<T>
where
    T: JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Query::<T>::operation_input(ctx, operation);
    }
}

/// A request carrying a valid admin session
///
/// Place it first in a handler's arguments so authentication runs before
/// the body is read:
/// ```ignore
/// async fn protected_handler(
///     _session: AdminSession,
///     // ... other extractors
/// ) -> Result<impl IntoResponse, AppError> {
///     Ok("Protected content")
/// }
/// ```
#[derive(Debug, Clone, OperationIo)]
pub struct AdminSession {
    /// Validated token claims
    pub claims: SessionClaims,
}

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let access_gate = parts
            .extensions
            .get::<Arc<AccessGate>>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("Access gate missing from request extensions");
                AppError::unauthorized()
            })?;

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(AppError::unauthorized)?;

        let claims = access_gate.validate(token)?;

        Ok(Self { claims })
    }
}
