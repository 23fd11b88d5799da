//! Catalog item model
//!
//! An [`Item`] is one catalog entry. New entries enter the catalog only as a
//! [`NewItem`], which can only be built through a validating constructor.

mod error;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub use error::ItemValidationError;

/// Status tag of an item
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemStatus {
    /// Things I like
    Like,
    /// Things I have
    Have,
    /// Things I want
    Want,
}

/// A persisted catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Item {
    /// Creation-time token, unique within the collection
    pub id: String,
    /// Trimmed, non-empty title
    pub title: String,
    /// Status tag
    pub status: ItemStatus,
    /// Public image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// External link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A validated item that has not been assigned an identifier yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    title: String,
    status: ItemStatus,
    image: String,
    description: Option<String>,
    link: Option<String>,
}

impl NewItem {
    /// Validates untrusted input fields and builds a new item
    ///
    /// Checks are applied in order: title, status, image.
    ///
    /// # Errors
    ///
    /// - `ItemValidationError::MissingTitle` - title absent or whitespace-only
    /// - `ItemValidationError::InvalidStatus` - status absent or not one of `like`, `have`, `want`
    /// - `ItemValidationError::MissingImage` - image absent or whitespace-only
    pub fn parse(
        title: Option<&str>,
        status: Option<&str>,
        image: Option<&str>,
    ) -> Result<Self, ItemValidationError> {
        let title = title
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .ok_or(ItemValidationError::MissingTitle)?;

        let status = status
            .and_then(|status| status.parse::<ItemStatus>().ok())
            .ok_or(ItemValidationError::InvalidStatus)?;

        let image = image
            .filter(|image| !image.trim().is_empty())
            .ok_or(ItemValidationError::MissingImage)?;

        Ok(Self {
            title: title.to_string(),
            status,
            image: image.to_string(),
            description: None,
            link: None,
        })
    }

    /// Attaches an optional description; blank values are dropped
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }

    /// Attaches an optional link; blank values are dropped
    #[must_use]
    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link.filter(|l| !l.trim().is_empty());
        self
    }

    /// Title of the pending item
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Status of the pending item
    #[must_use]
    pub const fn status(&self) -> ItemStatus {
        self.status
    }

    /// Converts into a persisted item with the given identifier
    #[must_use]
    pub fn into_item(self, id: String) -> Item {
        Item {
            id,
            title: self.title,
            status: self.status,
            image: Some(self.image),
            description: self.description,
            link: self.link,
        }
    }
}

/// Picks the identifier for an item created at `now_millis`
///
/// The identifier is the creation time in Unix milliseconds. When that token
/// is taken, the next free millisecond is used.
#[must_use]
pub fn next_id(existing: &[Item], now_millis: i64) -> String {
    let mut candidate = now_millis;
    loop {
        let id = candidate.to_string();
        if !existing.iter().any(|item| item.id == id) {
            return id;
        }
        candidate += 1;
    }
}
