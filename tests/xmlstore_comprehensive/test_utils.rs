//! Shared helpers for the comprehensive suite.

#![allow(dead_code)]

use tempfile::TempDir;
use xmlstore::XmlStore;

pub const WORDS: &str = r#"<?xml version="1.0" encoding="UTF-8"?><words id="5">123</words>"#;

/// Dictionary document with two `<word>` entries
pub const DICTIONARY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<words lang="en">
  <word id="1" d="4">
    <text>sky</text>
    <meaning d="4">above</meaning>
  </word>
  <word id="2">
    <text>sea</text>
  </word>
  <note d="4"/>
</words>"#;

/// File-backed store that lives as long as its temp directory
pub struct TestStore {
    pub store: XmlStore,
    pub dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = XmlStore::open(dir.path()).expect("Failed to open store");
        store.create_store().expect("Failed to create schema");
        TestStore { store, dir }
    }

    pub fn reopen(self) -> Self {
        let TestStore { store, dir } = self;
        drop(store);
        let store = XmlStore::open(dir.path()).expect("Failed to reopen store");
        store.create_store().expect("Failed to create schema");
        TestStore { store, dir }
    }

    pub fn counts(&self) -> xmlstore::RowCounts {
        self.store.database().row_counts().unwrap()
    }
}

impl std::ops::Deref for TestStore {
    type Target = XmlStore;

    fn deref(&self) -> &XmlStore {
        &self.store
    }
}

/// Wrap `body` in a UTF-8 1.0 declaration
pub fn doc(body: &str) -> String {
    format!(r#"<?xml version="1.0" encoding="UTF-8"?>{}"#, body)
}

/// Strip line breaks and indentation between tags
pub fn normalize(xml: &str) -> String {
    xml.lines().map(str::trim).collect::<Vec<_>>().join("")
}
