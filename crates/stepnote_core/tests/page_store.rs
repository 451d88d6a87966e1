use stepnote_core::{
    Confirmation, KeyValueBackend, MemoryBackend, Page, PageStore, PageValidationError,
    RemoveOutcome, SlotStorage, StorageError, StorageResult, StoreError,
};

const SLOT: &str = "stepPages_v1";

fn memory_store() -> PageStore<SlotStorage<MemoryBackend>> {
    PageStore::load(SlotStorage::with_key(MemoryBackend::new(), SLOT)).unwrap()
}

fn stored_pages(store: &PageStore<SlotStorage<MemoryBackend>>) -> Vec<Page> {
    let raw = store.storage().backend().raw(SLOT).unwrap();
    serde_json::from_str(raw).unwrap()
}

#[test]
fn create_trims_title_and_steps_and_persists() {
    let mut store = memory_store();
    let created = store
        .create("  Make tea  ", "\n  boil water \n\n\t\nsteep leaves\n")
        .unwrap();

    assert_eq!(created.title, "Make tea");
    assert_eq!(created.steps, vec!["boil water", "steep leaves"]);
    assert_eq!(store.list(), &[created.clone()]);
    assert_eq!(stored_pages(&store), vec![created]);
}

#[test]
fn create_with_blank_title_is_rejected_without_write() {
    let mut store = memory_store();
    let err = store.create("   ", "step one").unwrap_err();

    assert!(matches!(
        err,
        StoreError::Validation(PageValidationError::EmptyTitle)
    ));
    assert!(store.is_empty());
    assert!(store.storage().backend().raw(SLOT).is_none());
}

#[test]
fn create_appends_in_insertion_order() {
    let mut store = memory_store();
    let first = store.create("First", "").unwrap();
    let second = store.create("Second", "").unwrap();
    let third = store.create("Third", "").unwrap();

    let ids: Vec<_> = store.list().iter().map(|page| page.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
}

#[test]
fn update_replaces_fields_and_keeps_id_and_position() {
    let mut store = memory_store();
    let first = store.create("Clean desk", "remove clutter").unwrap();
    let second = store.create("Water plants", "fill can").unwrap();

    let updated = store
        .update(first.id, "Clean kitchen", "wipe counters\nwipe stove")
        .unwrap();

    assert_eq!(updated.id, first.id);
    assert_eq!(updated.title, "Clean kitchen");
    assert_eq!(updated.steps, vec!["wipe counters", "wipe stove"]);
    assert_eq!(updated.keywords[0], "wipe");
    assert!(!updated.keywords.iter().any(|keyword| keyword == "clutter"));

    assert_eq!(store.list()[0], updated);
    assert_eq!(store.list()[1], second);
    assert_eq!(stored_pages(&store), store.list());
}

#[test]
fn update_unknown_id_is_not_found() {
    let mut store = memory_store();
    store.create("Only page", "").unwrap();
    let before = store.list().to_vec();

    let err = store.update(9999, "Other", "").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(9999)));
    assert_eq!(store.list(), before.as_slice());
}

#[test]
fn update_with_blank_title_leaves_page_unchanged() {
    let mut store = memory_store();
    let page = store.create("Original", "step").unwrap();

    let err = store.update(page.id, "", "changed").unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.get(page.id), Some(&page));
}

#[test]
fn remove_requires_confirmation() {
    let mut store = memory_store();
    let page = store.create("Disposable", "").unwrap();

    assert_eq!(
        store.remove(page.id, Confirmation::Denied).unwrap(),
        RemoveOutcome::Aborted
    );
    assert_eq!(store.len(), 1);

    assert_eq!(
        store.remove(page.id, Confirmation::Granted).unwrap(),
        RemoveOutcome::Removed(page)
    );
    assert!(store.is_empty());
    assert!(stored_pages(&store).is_empty());
}

#[test]
fn remove_unknown_id_is_noop() {
    let mut store = memory_store();
    store.create("Stay", "").unwrap();
    let before = store.list().to_vec();

    assert_eq!(
        store.remove(9999, Confirmation::Granted).unwrap(),
        RemoveOutcome::NotFound
    );
    assert_eq!(store.list(), before.as_slice());
}

#[test]
fn clear_all_empties_and_persists() {
    let mut store = memory_store();
    store.create("One", "").unwrap();
    store.create("Two", "").unwrap();

    assert_eq!(store.clear_all().unwrap(), 2);
    assert!(store.is_empty());
    assert_eq!(store.storage().backend().raw(SLOT), Some("[]"));
}

#[test]
fn reload_roundtrips_every_field() {
    let mut store = memory_store();
    store.create("Reset Router", "Unplug the router\nWait").unwrap();
    store.create("Make tea", "boil\nsteep").unwrap();
    let expected = store.list().to_vec();

    let reloaded = PageStore::load(store.into_storage()).unwrap();
    assert_eq!(reloaded.list(), expected.as_slice());
}

#[test]
fn malformed_slot_starts_empty_and_next_save_overwrites() {
    let backend = MemoryBackend::with_slot(SLOT, "not json at all");
    let mut store = PageStore::load(SlotStorage::with_key(backend, SLOT)).unwrap();
    assert!(store.is_empty());

    let page = store.create("Fresh", "").unwrap();
    assert_eq!(stored_pages(&store), vec![page]);
}

#[test]
fn new_ids_stay_unique_after_loading_existing_pages() {
    let existing = r#"[{"id": 4102444800000, "title": "Future", "steps": [], "keywords": []}]"#;
    let backend = MemoryBackend::with_slot(SLOT, existing);
    let mut store = PageStore::load(SlotStorage::with_key(backend, SLOT)).unwrap();

    let created = store.create("Now", "").unwrap();
    assert_ne!(created.id, 4_102_444_800_000);
    assert_eq!(store.len(), 2);
}

#[test]
fn all_keywords_is_sorted_and_distinct() {
    let mut store = memory_store();
    store.create("zebra crossing", "").unwrap();
    store.create("crossing guard", "").unwrap();
    assert_eq!(store.all_keywords(), vec!["crossing", "guard", "zebra"]);
}

#[derive(Default)]
struct FailingBackend;

impl KeyValueBackend for FailingBackend {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Backend("quota exceeded".to_string()))
    }
}

#[test]
fn failed_write_is_reported_and_memory_state_is_kept() {
    let mut store = PageStore::load(SlotStorage::with_key(FailingBackend, SLOT)).unwrap();

    let err = store.create("Unsaved", "step").unwrap_err();
    assert!(matches!(err, StoreError::Storage(StorageError::Backend(_))));
    assert!(err.to_string().contains("quota exceeded"));
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].title, "Unsaved");
}
