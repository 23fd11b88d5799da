//! Catalog store: the item collection under one key, mutated atomically
//!
//! Every mutation reads the whole collection, changes it in memory and writes
//! it back with a compare-and-swap against the value it read. When another
//! writer got there first the swap is refused and the mutation is replayed on
//! the fresh collection, so concurrent appends and deletes never drop each
//! other's changes.

mod error;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, instrument};

pub use error::{CatalogStorageError, CatalogStorageResult};

use crate::backend::CollectionBackend;
use crate::item::{next_id, Item, NewItem};

/// Default key holding the collection
pub const DEFAULT_CATALOG_KEY: &str = "things";

/// Default number of compare-and-swap attempts per mutation
pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

/// Base delay between attempts, multiplied by the attempt number
const RETRY_BACKOFF: Duration = Duration::from_millis(5);

/// Result of a seed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The collection was empty and now holds `count` items
    Seeded {
        /// Items written
        count: usize,
    },
    /// The collection already had `count` items and was left alone
    AlreadyPopulated {
        /// Items already present
        count: usize,
    },
}

/// What a mutation decided after looking at the current collection
enum Mutation<T> {
    /// Persist the new collection, then return the value
    Write(Vec<Item>, T),
    /// Leave the collection as it is
    Keep(T),
}

/// Catalog store client
pub struct CatalogStore {
    backend: Arc<dyn CollectionBackend>,
    key: String,
    max_attempts: u32,
}

impl CatalogStore {
    /// Creates a new catalog store
    ///
    /// # Arguments
    ///
    /// * `backend` - Key-value backend holding the serialized collection
    /// * `key` - Key of the collection
    #[must_use]
    pub fn new(backend: Arc<dyn CollectionBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the compare-and-swap attempt budget (at least one attempt)
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Returns every item in stored order, empty if never seeded
    ///
    /// # Errors
    ///
    /// Returns `CatalogStorageError` if the backend is unavailable or the
    /// stored value is not a valid item list
    pub async fn list_all(&self) -> CatalogStorageResult<Vec<Item>> {
        let raw = self.backend.load(&self.key).await?;
        decode(raw.as_deref())
    }

    /// Appends a new item and returns it with its assigned identifier
    ///
    /// # Errors
    ///
    /// Returns `CatalogStorageError` if the backend fails or the attempt
    /// budget is exhausted by concurrent writers
    #[instrument(skip(self, new_item), fields(key = %self.key, title = new_item.title()))]
    pub async fn append(&self, new_item: NewItem) -> CatalogStorageResult<Item> {
        let item = self
            .mutate(|mut items| {
                let id = next_id(&items, Utc::now().timestamp_millis());
                let item = new_item.clone().into_item(id);
                items.push(item.clone());
                Mutation::Write(items, item)
            })
            .await?;

        info!(id = %item.id, status = %item.status, "Item appended");
        Ok(item)
    }

    /// Removes the item with `id`; returns whether it was present
    ///
    /// Removing an absent id is not an error and leaves the collection untouched.
    ///
    /// # Errors
    ///
    /// Returns `CatalogStorageError` if the backend fails or the attempt
    /// budget is exhausted by concurrent writers
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn remove_by_id(&self, id: &str) -> CatalogStorageResult<bool> {
        let removed = self
            .mutate(|items| {
                let before = items.len();
                let remaining: Vec<Item> = items.into_iter().filter(|item| item.id != id).collect();
                if remaining.len() == before {
                    Mutation::Keep(false)
                } else {
                    Mutation::Write(remaining, true)
                }
            })
            .await?;

        if removed {
            info!(id, "Item removed");
        } else {
            debug!(id, "Item not present, nothing removed");
        }
        Ok(removed)
    }

    /// Writes `items` only if the collection is absent or empty
    ///
    /// # Errors
    ///
    /// Returns `CatalogStorageError` if the backend fails or the attempt
    /// budget is exhausted by concurrent writers
    #[instrument(skip(self, items), fields(key = %self.key, count = items.len()))]
    pub async fn seed(&self, items: Vec<Item>) -> CatalogStorageResult<SeedOutcome> {
        let outcome = self
            .mutate(|existing| {
                if existing.is_empty() {
                    let count = items.len();
                    Mutation::Write(items.clone(), SeedOutcome::Seeded { count })
                } else {
                    Mutation::Keep(SeedOutcome::AlreadyPopulated {
                        count: existing.len(),
                    })
                }
            })
            .await?;

        info!(?outcome, "Seed finished");
        Ok(outcome)
    }

    /// Read-modify-write loop with optimistic compare-and-swap
    async fn mutate<T, F>(&self, mut apply: F) -> CatalogStorageResult<T>
    where
        F: FnMut(Vec<Item>) -> Mutation<T> + Send,
        T: Send,
    {
        for attempt in 1..=self.max_attempts {
            let raw = self.backend.load(&self.key).await?;
            let items = decode(raw.as_deref())?;

            let (updated, value) = match apply(items) {
                Mutation::Keep(value) => return Ok(value),
                Mutation::Write(updated, value) => (updated, value),
            };

            let encoded = serde_json::to_string(&updated)?;
            if self
                .backend
                .compare_and_swap(&self.key, raw.as_deref(), &encoded)
                .await?
            {
                return Ok(value);
            }

            debug!(attempt, "Collection changed concurrently, retrying");
            tokio::time::sleep(RETRY_BACKOFF * attempt).await;
        }

        Err(CatalogStorageError::Conflict {
            attempts: self.max_attempts,
        })
    }
}

fn decode(raw: Option<&str>) -> CatalogStorageResult<Vec<Item>> {
    raw.map_or_else(|| Ok(Vec::new()), |raw| Ok(serde_json::from_str(raw)?))
}
