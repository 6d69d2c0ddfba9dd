//! Saving documents: validation order and row layout

use crate::test_utils::*;
use xmlstore::{Error, RowCounts};

#[test]
fn empty_name_fails_before_anything_is_written() {
    let t = TestStore::new();
    let err = t.save_document(WORDS, "").unwrap_err();
    assert_eq!(err.to_string(), "Document name must not be empty!");
    assert_eq!(t.counts(), RowCounts::default());
}

#[test]
fn empty_name_wins_over_invalid_xml() {
    let t = TestStore::new();
    let err = t.save_document("abcdefjkjdnf", "").unwrap_err();
    assert_eq!(err, Error::EmptyDocumentName);
}

#[test]
fn garbage_is_invalid_xml() {
    let t = TestStore::new();
    let err = t.save_document("abcdefjkjdnf", "name").unwrap_err();
    assert_eq!(err.to_string(), "XML string is invalid!");
    assert!(err.is_validation());
    assert_eq!(t.counts(), RowCounts::default());
}

#[test]
fn malformed_documents_are_invalid_xml() {
    let t = TestStore::new();
    for body in [
        "<a><b></a></b>",
        "<a>",
        "<a/><b/>",
        "<a/>trailing",
        "",
        r#"<a x="1" x="2"/>"#,
        "<1a/>",
        r#"<a b="x<y"/>"#,
        "<a>x]]>y</a>",
        "<a>\u{1}</a>",
        "<a><!-- x -- y --></a>",
    ] {
        let err = t.save_document(&doc(body), "bad").unwrap_err();
        assert!(
            matches!(err, Error::InvalidXml { .. }),
            "{:?} gave {:?}",
            body,
            err
        );
    }
    assert_eq!(t.counts(), RowCounts::default());
}

#[test]
fn missing_declaration_is_rejected() {
    let t = TestStore::new();
    let err = t.save_document(r#"<words id="5">123</words>"#, "words").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Check document declaration (Version, Encoding)"
    );
}

#[test]
fn declaration_without_encoding_is_rejected() {
    let t = TestStore::new();
    let err = t
        .save_document(r#"<?xml version="1.0"?><words/>"#, "words")
        .unwrap_err();
    assert_eq!(err, Error::InvalidDeclaration);
    assert_eq!(t.counts(), RowCounts::default());
}

#[test]
fn save_returns_textual_identifier_listed_afterwards() {
    let t = TestStore::new();
    let id = t.save_document(WORDS, "words").unwrap();
    assert_eq!(id.len(), 36);

    let listed = t.list_documents().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id.to_string(), id);
    assert_eq!(listed[0].name, "words");
}

#[test]
fn save_writes_one_row_per_node_text_and_attribute() {
    let t = TestStore::new();
    t.save_document(DICTIONARY, "dictionary").unwrap();
    // words, word, text, "sky", meaning, "above", word, text, "sea", note
    assert_eq!(
        t.counts(),
        RowCounts {
            documents: 1,
            elements: 10,
            attributes: 6,
        }
    );
}

#[test]
fn each_save_creates_a_new_document() {
    let t = TestStore::new();
    let a = t.save_document(WORDS, "same").unwrap();
    let b = t.save_document(WORDS, "same").unwrap();
    assert_ne!(a, b);
    assert_eq!(t.list_documents().unwrap().len(), 2);
}

#[test]
fn nesting_beyond_configured_depth_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = xmlstore::XmlStore::open_with_config(
        dir.path(),
        xmlstore::XmlStoreConfig {
            max_nesting_depth: 3,
            ..Default::default()
        },
    )
    .unwrap();
    store.create_store().unwrap();

    assert!(store.save_document(&doc("<a><b><c/></b></a>"), "ok").is_ok());
    let err = store
        .save_document(&doc("<a><b><c><d/></c></b></a>"), "deep")
        .unwrap_err();
    assert_eq!(err, Error::NestingTooDeep { max: 3 });
    assert_eq!(store.list_documents().unwrap().len(), 1);
}
