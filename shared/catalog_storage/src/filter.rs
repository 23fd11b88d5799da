//! Status filter over a catalog listing

use std::str::FromStr;

use crate::item::{Item, ItemStatus, ItemValidationError};

/// Which slice of the catalog to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every item
    #[default]
    All,
    /// Only items with this status
    Only(ItemStatus),
}

impl StatusFilter {
    /// Parses an optional filter value; absent means `All`
    ///
    /// # Errors
    ///
    /// Returns `ItemValidationError::InvalidFilter` for anything other than
    /// `all`, `like`, `have` or `want`
    pub fn parse(value: Option<&str>) -> Result<Self, ItemValidationError> {
        value.map_or(Ok(Self::All), str::parse::<Self>)
    }

    /// Clicking a status: the active one switches back to `All`
    #[must_use]
    pub fn toggle(self, status: ItemStatus) -> Self {
        if self == Self::Only(status) {
            Self::All
        } else {
            Self::Only(status)
        }
    }

    /// Whether `item` belongs to this view
    #[must_use]
    pub fn matches(self, item: &Item) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => item.status == status,
        }
    }

    /// Items in this view, keeping their relative order
    #[must_use]
    pub fn apply(self, items: &[Item]) -> Vec<&Item> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

impl FromStr for StatusFilter {
    type Err = ItemValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "all" {
            return Ok(Self::All);
        }
        value
            .parse::<ItemStatus>()
            .map(Self::Only)
            .map_err(|_| ItemValidationError::InvalidFilter)
    }
}
