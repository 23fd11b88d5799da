//! Shared-secret admin gate and HS256 session tokens
//!
//! One process-wide password unlocks the admin surface. A successful login
//! yields a signed bearer token that later requests present in the
//! `Authorization` header.

mod error;

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub use error::{SessionError, SessionResult};

use crate::types::Environment;

/// Issuer claim of every session token
pub const SESSION_ISSUER: &str = "things-catalog";

/// Subject claim of every session token
pub const SESSION_SUBJECT: &str = "admin";

/// Clock skew tolerated when checking expiry
const LEEWAY_SECS: u64 = 60;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Always `admin`
    pub sub: String,
    /// Always `things-catalog`
    pub iss: String,
    /// Issued at, Unix seconds
    pub iat: i64,
    /// Expires at, Unix seconds
    pub exp: i64,
}

/// A freshly issued session
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Compact JWT
    pub token: String,
    /// Expiry, Unix seconds
    pub expires_at: i64,
}

/// Verifies the admin password and issues/validates session tokens
pub struct AccessGate {
    admin_password: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    session_ttl: Duration,
}

impl AccessGate {
    /// Creates a gate for `admin_password`, signing tokens with `session_secret`
    #[must_use]
    pub fn new(admin_password: String, session_secret: &[u8], session_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[SESSION_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.sub = Some(SESSION_SUBJECT.to_string());
        validation.leeway = LEEWAY_SECS;

        Self {
            admin_password,
            encoding_key: EncodingKey::from_secret(session_secret),
            decoding_key: DecodingKey::from_secret(session_secret),
            validation,
            session_ttl,
        }
    }

    /// Builds the gate from the configured password, secret and TTL
    #[must_use]
    pub fn from_environment(environment: &Environment) -> Self {
        Self::new(
            environment.admin_password(),
            environment.session_secret().as_bytes(),
            environment.session_ttl(),
        )
    }

    /// Exact match against the configured password
    ///
    /// An empty configured password never matches.
    #[must_use]
    pub fn verify(&self, submitted: &str) -> bool {
        !self.admin_password.is_empty() && submitted == self.admin_password
    }

    /// Checks the password and issues a session token
    ///
    /// # Errors
    ///
    /// - `SessionError::InvalidPassword` - password does not match
    /// - `SessionError::Encoding` - token signing failed
    pub fn login(&self, submitted: &str) -> SessionResult<IssuedSession> {
        if !self.verify(submitted) {
            return Err(SessionError::InvalidPassword);
        }
        self.issue()
    }

    /// Validates a bearer token and returns its claims
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidToken` if the signature, issuer, subject
    /// or expiry check fails
    pub fn validate(&self, token: &str) -> SessionResult<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| SessionError::InvalidToken(e.to_string()))
    }

    fn issue(&self) -> SessionResult<IssuedSession> {
        let iat = Utc::now().timestamp();
        let ttl = i64::try_from(self.session_ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = SessionClaims {
            sub: SESSION_SUBJECT.to_string(),
            iss: SESSION_ISSUER.to_string(),
            iat,
            exp: iat.saturating_add(ttl),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SessionError::Encoding(e.to_string()))?;

        tracing::info!(expires_at = claims.exp, "Admin session issued");

        Ok(IssuedSession {
            token,
            expires_at: claims.exp,
        })
    }
}
