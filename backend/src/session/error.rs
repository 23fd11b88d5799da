//! Session-related error types

use thiserror::Error;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while logging in or checking a session
#[derive(Error, Debug)]
pub enum SessionError {
    /// Submitted password does not match the configured one
    #[error("Invalid password")]
    InvalidPassword,

    /// Token is malformed, tampered, expired or issued by someone else
    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),

    /// Token signing failed
    #[error("Failed to encode session token: {0}")]
    Encoding(String),
}
