//! Node-name and attribute search

use crate::test_utils::*;
use xmlstore::{serialize_fragment, ElementQuery, Error};

#[test]
fn two_word_elements_give_two_subtrees() {
    let t = TestStore::new();
    let id = t.save_document(DICTIONARY, "dictionary").unwrap();

    let words = t.find_by_node_name(&id, "word").unwrap();
    assert_eq!(words.len(), 2);

    assert_eq!(words[0].attribute("id").unwrap().value, "1");
    assert_eq!(words[0].children.len(), 2);
    assert_eq!(words[0].children[1].value, "meaning");
    assert_eq!(words[1].attribute("id").unwrap().value, "2");
    assert_eq!(words[1].children.len(), 1);
    assert_eq!(words[1].children[0].inner_text(), "sea");
}

#[test]
fn attribute_search_matches_name_and_value_exactly() {
    let t = TestStore::new();
    let id = t.save_document(DICTIONARY, "dictionary").unwrap();

    let found = t.find_by_attribute(&id, "d", "4").unwrap();
    let names: Vec<&str> = found.iter().map(|s| s.value.as_str()).collect();
    assert_eq!(names, vec!["word", "meaning", "note"]);
    assert!(found
        .iter()
        .all(|s| s.attribute("d").map(|a| a.value.as_str()) == Some("4")));

    assert!(t.find_by_attribute(&id, "d", "5").unwrap().is_empty());
    assert!(t.find_by_attribute(&id, "D", "4").unwrap().is_empty());
}

#[test]
fn nested_matches_are_returned_independently() {
    let t = TestStore::new();
    let id = t
        .save_document(&doc(r#"<sec n="1"><sec n="2"><sec n="3"/></sec></sec>"#), "s")
        .unwrap();

    let found = t.find_by_node_name(&id, "sec").unwrap();
    assert_eq!(found.len(), 3);
    assert_eq!(found[0].descendants().len(), 3);
    assert_eq!(found[2].attribute("n").unwrap().value, "3");
    assert!(found[2].children.is_empty());
}

#[test]
fn subtrees_keep_identifiers_for_updates() {
    let t = TestStore::new();
    let id = t.save_document(DICTIONARY, "dictionary").unwrap();
    let word = &t.find_by_node_name(&id, "word").unwrap()[1];

    let attr = word.attribute("id").unwrap();
    t.update_attribute_value(&attr.id.to_string(), "20").unwrap();

    let word = &t.find_by_node_name(&id, "word").unwrap()[1];
    assert_eq!(word.attribute("id").unwrap().value, "20");
}

#[test]
fn subtree_renders_as_fragment() {
    let t = TestStore::new();
    let id = t.save_document(DICTIONARY, "dictionary").unwrap();
    let word = &t.find_by_node_name(&id, "word").unwrap()[1];

    assert_eq!(
        serialize_fragment(word).unwrap(),
        "<word id=\"2\">\n  <text>sea</text>\n</word>"
    );
}

#[test]
fn generic_query_matches_typed_helpers() {
    let t = TestStore::new();
    let id = t.save_document(DICTIONARY, "dictionary").unwrap();
    assert_eq!(
        t.find(&id, &ElementQuery::node_name("text")).unwrap(),
        t.find_by_node_name(&id, "text").unwrap()
    );
}

#[test]
fn search_in_missing_document_fails() {
    let t = TestStore::new();
    let missing = xmlstore::DocumentId::new().to_string();
    let err = t.find_by_node_name(&missing, "word").unwrap_err();
    assert!(matches!(err, Error::DocumentNotFound { .. }));
    let err = t.find_by_attribute(&missing, "d", "4").unwrap_err();
    assert_eq!(err.to_string(), "Document with given Id does not exist!");
}

#[test]
fn search_is_scoped_to_one_document() {
    let t = TestStore::new();
    let a = t.save_document(DICTIONARY, "a").unwrap();
    t.save_document(DICTIONARY, "b").unwrap();
    assert_eq!(t.find_by_node_name(&a, "word").unwrap().len(), 2);
}
