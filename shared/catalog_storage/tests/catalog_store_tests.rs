use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use catalog_storage::backend::{CollectionBackend, MemoryBackend};
use catalog_storage::seed::default_seed_items;
use catalog_storage::{
    CatalogStorageError, CatalogStorageResult, CatalogStore, ItemStatus, NewItem, SeedOutcome,
    StatusFilter,
};
use pretty_assertions::assert_eq;

const TEST_KEY: &str = "things";

fn setup() -> (Arc<MemoryBackend>, CatalogStore) {
    let backend = Arc::new(MemoryBackend::new());
    let store = CatalogStore::new(backend.clone(), TEST_KEY);
    (backend, store)
}

fn new_item(title: &str, status: &str) -> NewItem {
    NewItem::parse(Some(title), Some(status), Some("http://img.test/x.png")).unwrap()
}

/// Backend whose stored value changes under every writer
struct AlwaysStaleBackend;

#[async_trait]
impl CollectionBackend for AlwaysStaleBackend {
    async fn load(&self, _key: &str) -> CatalogStorageResult<Option<String>> {
        Ok(Some("[]".to_string()))
    }

    async fn compare_and_swap(
        &self,
        _key: &str,
        _expected: Option<&str>,
        _new: &str,
    ) -> CatalogStorageResult<bool> {
        Ok(false)
    }
}

#[tokio::test]
async fn test_list_all_on_missing_key_is_empty() {
    let (_, store) = setup();
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_append_then_list_returns_item_last() {
    let (_, store) = setup();
    store.seed(default_seed_items()).await.unwrap();

    let created = store.append(new_item("Lamp", "want")).await.unwrap();
    assert_eq!(created.title, "Lamp");
    assert_eq!(created.status, ItemStatus::Want);
    assert_eq!(created.image.as_deref(), Some("http://img.test/x.png"));

    let items = store.list_all().await.unwrap();
    assert_eq!(items.len(), 7);
    assert_eq!(items.last(), Some(&created));
}

#[tokio::test]
async fn test_append_assigns_distinct_ids() {
    let (_, store) = setup();

    let first = store.append(new_item("One", "like")).await.unwrap();
    let second = store.append(new_item("Two", "like")).await.unwrap();
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_remove_by_id_removes_only_that_item() {
    let (_, store) = setup();
    store.seed(default_seed_items()).await.unwrap();

    assert!(store.remove_by_id("3").await.unwrap());

    let ids: Vec<String> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, vec!["1", "2", "4", "5", "6"]);
}

#[tokio::test]
async fn test_remove_unknown_id_leaves_collection_unchanged() {
    let (_, store) = setup();
    store.seed(default_seed_items()).await.unwrap();
    let before = store.list_all().await.unwrap();

    assert!(!store.remove_by_id("does-not-exist").await.unwrap());
    assert_eq!(store.list_all().await.unwrap(), before);
}

#[tokio::test]
async fn test_remove_on_missing_key_does_not_create_it() {
    let (backend, store) = setup();

    assert!(!store.remove_by_id("1").await.unwrap());
    assert_eq!(backend.load(TEST_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_seed_writes_only_once() {
    let (_, store) = setup();

    let first = store.seed(default_seed_items()).await.unwrap();
    assert_eq!(first, SeedOutcome::Seeded { count: 6 });

    store.append(new_item("Lamp", "have")).await.unwrap();

    let second = store.seed(default_seed_items()).await.unwrap();
    assert_eq!(second, SeedOutcome::AlreadyPopulated { count: 7 });
    assert_eq!(store.list_all().await.unwrap().len(), 7);
}

#[tokio::test]
async fn test_seed_fills_an_emptied_collection() {
    let (backend, store) = setup();
    backend.put_raw(TEST_KEY, "[]").await;

    let outcome = store.seed(default_seed_items()).await.unwrap();
    assert_eq!(outcome, SeedOutcome::Seeded { count: 6 });
}

#[tokio::test]
async fn test_filter_over_seeded_listing() {
    let (_, store) = setup();
    store.seed(default_seed_items()).await.unwrap();
    let items = store.list_all().await.unwrap();

    let wanted: Vec<&str> = StatusFilter::Only(ItemStatus::Want)
        .apply(&items)
        .into_iter()
        .map(|item| item.id.as_str())
        .collect();
    assert_eq!(wanted, vec!["4", "5"]);
    assert_eq!(StatusFilter::All.apply(&items).len(), items.len());
}

#[tokio::test]
async fn test_concurrent_appends_are_all_kept() {
    let (_, store) = setup();
    store.seed(default_seed_items()).await.unwrap();
    let store = Arc::new(store);

    let tasks = (0..12).map(|i| {
        let store = store.clone();
        tokio::spawn(async move { store.append(new_item(&format!("item {i}"), "like")).await })
    });
    let created: Vec<_> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    let items = store.list_all().await.unwrap();
    assert_eq!(items.len(), 6 + 12);

    let ids: HashSet<&str> = items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids.len(), items.len(), "identifiers must stay unique");
    for item in &created {
        assert!(items.contains(item), "lost append {}", item.title);
    }
}

#[tokio::test]
async fn test_concurrent_append_and_delete_both_apply() {
    let (_, store) = setup();
    store.seed(default_seed_items()).await.unwrap();
    let store = Arc::new(store);

    let appender = {
        let store = store.clone();
        tokio::spawn(async move { store.append(new_item("Lamp", "want")).await })
    };
    let deleter = {
        let store = store.clone();
        tokio::spawn(async move { store.remove_by_id("1").await })
    };

    let created = appender.await.unwrap().unwrap();
    assert!(deleter.await.unwrap().unwrap());

    let items = store.list_all().await.unwrap();
    assert_eq!(items.len(), 6);
    assert!(items.contains(&created));
    assert!(items.iter().all(|item| item.id != "1"));
}

#[tokio::test]
async fn test_stale_compare_and_swap_is_refused() {
    let backend = MemoryBackend::new();
    assert!(backend.compare_and_swap(TEST_KEY, None, "[]").await.unwrap());

    // The key now exists, so a writer that saw it absent must lose
    assert!(!backend.compare_and_swap(TEST_KEY, None, "[1]").await.unwrap());
    assert!(!backend
        .compare_and_swap(TEST_KEY, Some("[2]"), "[3]")
        .await
        .unwrap());
    assert_eq!(backend.load(TEST_KEY).await.unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_exhausted_attempts_report_conflict() {
    let store = CatalogStore::new(Arc::new(AlwaysStaleBackend), TEST_KEY).with_max_attempts(3);

    let result = store.append(new_item("Lamp", "like")).await;
    assert!(matches!(
        result,
        Err(CatalogStorageError::Conflict { attempts: 3 })
    ));
}

#[tokio::test]
async fn test_corrupt_collection_is_a_serialization_error() {
    let (backend, store) = setup();
    backend.put_raw(TEST_KEY, "not json").await;

    assert!(matches!(
        store.list_all().await,
        Err(CatalogStorageError::Serialization(_))
    ));
    assert!(matches!(
        store.append(new_item("Lamp", "like")).await,
        Err(CatalogStorageError::Serialization(_))
    ));
}
