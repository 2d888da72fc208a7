//! Map-backed store tests.

use std::collections::HashMap;

use entity_store::{fixtures, KeyValue, MapStore, Repository, StoreConfig, StoreError};
use serde::Deserialize;
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Setting {
    name: String,
    value: String,
}

fn create_test_setting(name: &str, value: &str) -> Setting {
    Setting {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn setting_key(setting: &Setting) -> String {
    setting.name.clone()
}

fn seeded_store() -> MapStore<String, Setting> {
    let mut entries = HashMap::new();
    entries.insert("a".to_string(), create_test_setting("a", "alpha"));
    entries.insert("b".to_string(), create_test_setting("b", "beta"));
    MapStore::map_backed(entries, setting_key)
}

#[test]
fn test_remove_scenario() {
    let store = seeded_store();

    store.remove(create_test_setting("a", "alpha")).unwrap();

    assert!(store.find(&[KeyValue::from("a")]).unwrap().is_none());
    assert_eq!(
        store.find(&[KeyValue::from("b")]).unwrap(),
        Some(create_test_setting("b", "beta"))
    );
}

#[test]
fn test_remove_uses_key_not_equality() {
    let store = seeded_store();
    // Stale copy with the same key still removes the stored entity
    store.remove(create_test_setting("a", "stale")).unwrap();
    assert_eq!(store.len(), 1);
}

#[test]
fn test_remove_absent_is_noop() {
    let store = seeded_store();
    assert_ok!(store.remove(create_test_setting("zzz", "none")));
    assert_eq!(store.len(), 2);
}

#[test]
fn test_find_with_wrong_key_type_is_invalid() {
    let store = seeded_store();

    let err = assert_err!(store.find(&[KeyValue::from(1)]));
    assert!(err.is_invalid_argument());
    assert_eq!(
        err.to_string(),
        "Invalid argument: key must be String, got integer 1"
    );
}

#[test]
fn test_find_with_two_keys_is_invalid() {
    let store = seeded_store();
    let result = store.find(&[KeyValue::from("a"), KeyValue::from("b")]);
    assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
}

#[test]
fn test_add_duplicate_key_fails_and_leaves_store() {
    let store = seeded_store();

    let result = store.add(create_test_setting("a", "other"));
    assert!(matches!(result, Err(StoreError::DuplicateKey(_))));
    assert_eq!(store.len(), 2);
    assert_eq!(
        store.find(&[KeyValue::from("a")]).unwrap().unwrap().value,
        "alpha"
    );
}

#[test]
fn test_add_then_find_round_trip() {
    let store = seeded_store();
    let entry = store.add(create_test_setting("c", "gamma")).unwrap();
    assert_eq!(entry.entity().value, "gamma");
    assert_eq!(
        store.find(&[KeyValue::from("c")]).unwrap(),
        Some(create_test_setting("c", "gamma"))
    );
}

#[test]
fn test_add_range_collision_inserts_nothing() {
    let store = seeded_store();

    let result = store.add_range(vec![
        create_test_setting("c", "gamma"),
        create_test_setting("b", "clash"),
    ]);
    assert!(matches!(result, Err(StoreError::DuplicateKey(_))));
    assert_eq!(store.len(), 2);
    assert!(!store.contains_key(&"c".to_string()));
}

#[test]
fn test_add_range_without_collision() {
    let store = seeded_store();
    assert_ok!(store.add_range(vec![
        create_test_setting("c", "gamma"),
        create_test_setting("d", "delta"),
    ]));
    assert_eq!(store.len(), 4);
}

#[test]
fn test_update_replaces_without_changing_size() {
    let store = seeded_store();
    assert_ok!(store.update(create_test_setting("b", "bravo")));
    assert_eq!(store.len(), 2);
    assert_eq!(
        store.find_by_key(&"b".to_string()).unwrap().value,
        "bravo"
    );
}

#[test]
fn test_update_is_upsert_even_in_legacy_mode() {
    let store = seeded_store().with_config(StoreConfig::legacy());
    assert_ok!(store.update(create_test_setting("n", "new")));
    assert_eq!(store.len(), 3);
}

#[test]
fn test_get_filters_and_orders() {
    let store = seeded_store();
    store.add(create_test_setting("c", "alpha-2")).unwrap();

    let result = store
        .get(
            Some(Box::new(|s: &Setting| s.value.starts_with("alpha"))),
            Some(Box::new(|a: &Setting, b: &Setting| b.name.cmp(&a.name))),
        )
        .unwrap();

    let names: Vec<&str> = result.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["c", "a"]);
}

#[tokio::test]
async fn test_find_async_forwards_keys_by_default() {
    let store = seeded_store();
    let found = store.find_async(&[KeyValue::from("b")]).await.unwrap();
    assert_eq!(found.unwrap().value, "beta");
}

#[tokio::test]
async fn test_find_async_discard_mode() {
    let store = seeded_store().with_config(StoreConfig::legacy());
    let result = store.find_async(&[KeyValue::from("b")]).await;
    assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
}

#[tokio::test]
async fn test_get_async_and_save_changes() {
    let store = seeded_store();
    store
        .add_range_async(vec![create_test_setting("c", "gamma")])
        .await
        .unwrap();

    let all = store.get_async(None, None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(store.save_changes_async().await.unwrap(), 3);
}

#[tokio::test]
async fn test_add_async_duplicate_key_leaves_store() {
    let store = seeded_store();

    let result = store.add_async(create_test_setting("b", "other")).await;
    assert!(matches!(result, Err(StoreError::DuplicateKey(_))));
    assert_eq!(store.len(), 2);
    assert_eq!(
        store.find_by_key(&"b".to_string()).unwrap().value,
        "beta"
    );
}

#[tokio::test]
async fn test_add_range_async_collision_inserts_nothing() {
    let store = seeded_store();

    let against_store = store
        .add_range_async(vec![
            create_test_setting("c", "gamma"),
            create_test_setting("a", "clash"),
        ])
        .await;
    assert!(matches!(against_store, Err(StoreError::DuplicateKey(_))));
    assert_eq!(store.len(), 2);
    assert!(!store.contains_key(&"c".to_string()));

    let within_batch = store
        .add_range_async(vec![
            create_test_setting("d", "delta"),
            create_test_setting("d", "again"),
        ])
        .await;
    assert!(matches!(within_batch, Err(StoreError::DuplicateKey(_))));
    assert_eq!(store.len(), 2);
    assert!(!store.contains_key(&"d".to_string()));
}

#[test]
fn test_uuid_keyed_store() {
    #[derive(Debug, Clone, PartialEq)]
    struct Session {
        id: Uuid,
    }

    let session = Session { id: Uuid::new_v4() };
    let store = MapStore::map_backed_from(vec![session.clone()], |s: &Session| s.id).unwrap();

    assert_eq!(
        store.find(&[KeyValue::from(session.id)]).unwrap(),
        Some(session.clone())
    );
    // Same id as text is a type mismatch
    let result = store.find(&[KeyValue::from(session.id.to_string())]);
    assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
    assert!(store
        .find(&[KeyValue::from(Uuid::new_v4())])
        .unwrap()
        .is_none());
}

#[test]
fn test_seed_from_fixture() {
    let entries: HashMap<String, Setting> = fixtures::load_map(
        r#"{
            "theme": {"name": "theme", "value": "dark"},
            "lang": {"name": "lang", "value": "en"}
        }"#,
    )
    .unwrap();
    let store = MapStore::map_backed(entries, setting_key);

    assert_eq!(store.len(), 2);
    assert_eq!(
        store.find(&[KeyValue::from("theme")]).unwrap().unwrap().value,
        "dark"
    );
}
