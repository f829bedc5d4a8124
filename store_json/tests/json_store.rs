//! Persistence behaviour of the JSON subscription file against a real
//! temporary directory.

use campaign_store::{StoreError, SubscriptionMap, SubscriptionStore};
use campaign_store_json::JsonFileStore;
use campaign_types::{AccountId, ChainAddress, EnrollmentRecord, SocialHandle, Timestamp};
use std::fs;

fn temp_store() -> (tempfile::TempDir, JsonFileStore) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonFileStore::in_dir(dir.path());
    (dir, store)
}

fn sample_map() -> SubscriptionMap {
    let mut map = SubscriptionMap::new();
    let mut a = EnrollmentRecord::new(
        AccountId::new("100"),
        SocialHandle::parse("alice").unwrap(),
        ChainAddress::new("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"),
        "a1b2c3d4".into(),
    );
    a.verified = true;
    a.credit_task(1_000, Timestamp::new(1_733_600_000));
    let b = EnrollmentRecord::new(
        AccountId::new("200"),
        SocialHandle::parse("bob").unwrap(),
        ChainAddress::new("0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359"),
        "0f0f0f0f".into(),
    );
    map.insert(a.account_id.clone(), a);
    map.insert(b.account_id.clone(), b);
    map
}

#[test]
fn missing_file_loads_as_empty() {
    let (_dir, store) = temp_store();
    assert!(store.load().unwrap().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn save_then_load_returns_same_mapping() {
    let (_dir, store) = temp_store();
    let map = sample_map();
    store.save(&map).unwrap();
    assert_eq!(store.load().unwrap(), map);
}

#[test]
fn resaving_loaded_mapping_leaves_content_unchanged() {
    let (_dir, store) = temp_store();
    store.save(&sample_map()).unwrap();
    let before = fs::read_to_string(store.path()).unwrap();

    let loaded = store.load().unwrap();
    store.save(&loaded).unwrap();
    let after = fs::read_to_string(store.path()).unwrap();

    assert_eq!(before, after);
}

#[test]
fn saving_empty_mapping_deletes_file() {
    let (_dir, store) = temp_store();
    store.save(&sample_map()).unwrap();
    assert!(store.path().exists());

    store.save(&SubscriptionMap::new()).unwrap();
    assert!(!store.path().exists());
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn saving_empty_mapping_without_file_is_ok() {
    let (_dir, store) = temp_store();
    store.save(&SubscriptionMap::new()).unwrap();
    assert!(!store.path().exists());
}

#[test]
fn save_creates_missing_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::in_dir(&dir.path().join("nested").join("data"));
    store.save(&sample_map()).unwrap();
    assert!(store.path().exists());
}

#[test]
fn file_is_keyed_by_account_id() {
    let (_dir, store) = temp_store();
    store.save(&sample_map()).unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw["100"]["externalHandle"], "alice");
    assert_eq!(raw["100"]["balance"], 1000);
    assert_eq!(raw["200"]["verified"], false);
}

#[test]
fn corrupt_file_is_a_serialization_error() {
    let (_dir, store) = temp_store();
    fs::write(store.path(), "{ not json").unwrap();
    assert!(matches!(store.load(), Err(StoreError::Serialization(_))));
}

#[test]
fn legacy_layout_is_refused_untouched() {
    let (_dir, store) = temp_store();
    let legacy = r#"{"100":{"code":"a1b2c3d4","twitterHandle":"alice","verified":true,"balance":1000,"lastTask":1733600000000,"address":"0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359"}}"#;
    fs::write(store.path(), legacy).unwrap();

    assert!(matches!(store.load(), Err(StoreError::Serialization(_))));
    assert_eq!(fs::read_to_string(store.path()).unwrap(), legacy);
}

#[test]
fn failed_save_keeps_previous_document() {
    let (dir, store) = temp_store();
    let map = sample_map();
    store.save(&map).unwrap();
    let before = fs::read_to_string(store.path()).unwrap();

    // A directory squatting on the temp path makes the write fail.
    fs::create_dir(dir.path().join("subscriptionCodes.json.tmp")).unwrap();
    let mut changed = map.clone();
    changed.remove(&AccountId::new("200"));
    assert!(store.save(&changed).is_err());

    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
}
