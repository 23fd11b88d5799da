//! Storage for the things catalog
//!
//! The catalog is a single ordered list of items kept under one key in Redis.
//! All mutations go through [`store::CatalogStore`], which applies them with an
//! optimistic compare-and-swap so concurrent writers never lose updates.

#![deny(clippy::all, clippy::pedantic, clippy::nursery, missing_docs, dead_code)]

/// Raw key-value backends (Redis, in-memory)
pub mod backend;

/// Status filter for listings
pub mod filter;

/// Item model and validation
pub mod item;

/// Sample items
pub mod seed;

/// Compare-and-swap catalog store
pub mod store;

pub use filter::StatusFilter;
pub use item::{Item, ItemStatus, ItemValidationError, NewItem};
pub use store::{CatalogStorageError, CatalogStorageResult, CatalogStore, SeedOutcome};
