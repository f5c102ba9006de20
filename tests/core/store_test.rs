//! Contact store loading, fallback and persistence.

use parley::contacts::store::{
    default_contacts, ContactStore, JsonContactStore, MemoryContactStore,
};
use parley::contacts::Contact;

#[test]
fn defaults_are_the_four_builtin_contacts() {
    let names: Vec<String> = default_contacts().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Mom", "Dad", "Alice", "Bob"]);
}

#[test]
fn memory_store_returns_its_contacts() {
    let store = MemoryContactStore::new(vec![Contact::new("Zed", "42")]);
    assert_eq!(store.load(), vec![Contact::new("Zed", "42")]);
}

#[test]
fn missing_file_loads_defaults() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let store = JsonContactStore::new(tmp.path().join("contacts.json"));
    assert_eq!(store.load(), default_contacts());
}

#[test]
fn invalid_json_loads_defaults() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let path = tmp.path().join("contacts.json");
    std::fs::write(&path, "{not json").expect("should write file");
    assert_eq!(JsonContactStore::new(path).load(), default_contacts());
}

#[test]
fn non_array_document_loads_defaults() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let path = tmp.path().join("contacts.json");
    std::fs::write(&path, r#"{"name": "Mom", "number": "1"}"#).expect("should write file");
    assert_eq!(JsonContactStore::new(path).load(), default_contacts());
}

#[test]
fn saved_empty_list_stays_empty() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let store = JsonContactStore::new(tmp.path().join("contacts.json"));
    store.save(&[]).expect("should save");
    assert!(store.load().is_empty());
}

#[test]
fn save_creates_parent_dirs_and_reloads() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let store = JsonContactStore::new(tmp.path().join("nested/dir/contacts.json"));
    let contacts = vec![
        Contact::new("Grandma", "+15550000001"),
        Contact::new("Mary Ann", "+15550000002"),
    ];
    store.save(&contacts).expect("should save");
    assert_eq!(store.load(), contacts);
}

#[test]
fn reads_plain_name_number_objects() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let path = tmp.path().join("contacts.json");
    std::fs::write(&path, r#"[{"name": "Sam", "number": "+15550001111"}]"#)
        .expect("should write file");
    assert_eq!(
        JsonContactStore::new(path).load(),
        vec![Contact::new("Sam", "+15550001111")]
    );
}

#[test]
fn try_load_reports_damaged_file() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let path = tmp.path().join("contacts.json");
    std::fs::write(&path, r#"[{"name":"Grandma","number":"+1555"},]"#)
        .expect("should write file");
    let store = JsonContactStore::new(path);
    assert!(store.try_load().is_err());
    assert_eq!(store.load(), default_contacts());
}

#[test]
fn try_load_missing_file_is_none() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let store = JsonContactStore::new(tmp.path().join("contacts.json"));
    assert_eq!(store.try_load().expect("missing file is not an error"), None);
}
