//! Validation errors for catalog items

use thiserror::Error;

const MISSING_TITLE: &str = "Title is required";
const INVALID_STATUS: &str = "Valid status is required (like, have, or want)";
const MISSING_IMAGE: &str = "Image URL is required";
const INVALID_FILTER: &str = "Invalid status filter";

/// Reasons a submitted item is rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Title absent or blank after trimming
    #[error("{}", MISSING_TITLE)]
    MissingTitle,

    /// Status absent or outside the enumerated set
    #[error("{}", INVALID_STATUS)]
    InvalidStatus,

    /// Image URL absent or blank
    #[error("{}", MISSING_IMAGE)]
    MissingImage,

    /// Status filter is not `all` or a known status
    #[error("{}", INVALID_FILTER)]
    InvalidFilter,
}

impl ItemValidationError {
    /// Client-facing message, identical to the `Display` output
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingTitle => MISSING_TITLE,
            Self::InvalidStatus => INVALID_STATUS,
            Self::MissingImage => MISSING_IMAGE,
            Self::InvalidFilter => INVALID_FILTER,
        }
    }
}
