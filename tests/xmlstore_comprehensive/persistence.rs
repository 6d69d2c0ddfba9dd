//! Reopening, configuration and transactional behavior

use crate::test_utils::*;
use xmlstore::{XmlStore, XmlStoreConfig, CONFIG_FILE_NAME};

#[test]
fn documents_survive_reopen() {
    let t = TestStore::new();
    let id = t.save_document(DICTIONARY, "dictionary").unwrap();

    let t = t.reopen();
    assert_eq!(t.read_document(&id).unwrap(), DICTIONARY);
    assert_eq!(t.list_documents().unwrap().len(), 1);
}

#[test]
fn create_store_is_idempotent() {
    let t = TestStore::new();
    let id = t.save_document(WORDS, "words").unwrap();
    t.create_store().unwrap();
    t.create_store().unwrap();
    assert!(t.read_document(&id).is_ok());
}

#[test]
fn open_writes_commented_default_config() {
    let t = TestStore::new();
    let content = std::fs::read_to_string(t.dir.path().join(CONFIG_FILE_NAME)).unwrap();
    assert_eq!(content, XmlStoreConfig::default_toml());
    assert!(t.dir.path().join("xmlstore.db").exists());
}

#[test]
fn edited_config_file_is_honored_on_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = XmlStore::open(dir.path()).unwrap();
        store.create_store().unwrap();
    }
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "database_file = \"other.db\"\nmax_nesting_depth = 2\n",
    )
    .unwrap();

    let store = XmlStore::open(dir.path()).unwrap();
    store.create_store().unwrap();
    assert!(dir.path().join("other.db").exists());
    assert_eq!(store.database().limits().max_nesting_depth, 2);
    assert!(store.save_document(&doc("<a><b><c/></b></a>"), "deep").is_err());
}

#[test]
fn invalid_config_file_fails_open() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "max_nesting_depth = 0\n").unwrap();
    let err = XmlStore::open(dir.path()).unwrap_err();
    assert!(matches!(err, xmlstore::Error::Config { .. }));
    assert!(err.is_infrastructure());
}

#[test]
fn operations_before_create_store_report_storage_errors() {
    let dir = tempfile::tempdir().unwrap();
    let store = XmlStore::open(dir.path()).unwrap();
    let err = store.save_document(WORDS, "words").unwrap_err();
    assert!(matches!(err, xmlstore::Error::Storage { .. }));
}

#[test]
fn ephemeral_stores_are_independent() {
    let a = XmlStore::ephemeral().unwrap();
    let b = XmlStore::ephemeral().unwrap();
    a.create_store().unwrap();
    b.create_store().unwrap();
    a.save_document(WORDS, "words").unwrap();
    assert_eq!(a.list_documents().unwrap().len(), 1);
    assert!(b.list_documents().unwrap().is_empty());
}
