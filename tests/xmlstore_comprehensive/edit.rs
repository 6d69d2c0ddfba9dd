//! Edit model, value updates and element deletion

use crate::test_utils::*;
use xmlstore::{ElementKind, Error};

#[test]
fn edit_model_mirrors_document_with_identifiers() {
    let t = TestStore::new();
    let id = t.save_document(DICTIONARY, "dictionary").unwrap();
    let model = t.get_edit_model(&id).unwrap();

    assert_eq!(model.id.to_string(), id);
    assert_eq!(model.name, "dictionary");
    assert_eq!(model.root.value, "words");
    assert_eq!(model.root.kind, ElementKind::Node);
    assert_eq!(model.root.children.len(), 3);
    assert_eq!(model.root.find_all("word").len(), 2);

    let first = &model.root.children[0];
    assert_eq!(first.attribute("id").unwrap().value, "1");
    assert_eq!(first.children[0].inner_text(), "sky");
}

#[test]
fn updating_attribute_changes_read_output() {
    let t = TestStore::new();
    let id = t.save_document(WORDS, "words").unwrap();
    let model = t.get_edit_model(&id).unwrap();
    let attr = model.root.attribute("id").unwrap();

    t.update_attribute_value(&attr.id.to_string(), "10").unwrap();

    let xml = t.read_document(&id).unwrap();
    assert!(xml.contains(r#"id="10""#));
    assert!(!xml.contains(r#"id="5""#));
}

#[test]
fn updating_text_element_changes_content() {
    let t = TestStore::new();
    let id = t.save_document(WORDS, "words").unwrap();
    let model = t.get_edit_model(&id).unwrap();
    let text = &model.root.children[0];
    assert!(text.is_text());

    t.update_element_value(&text.id.to_string(), "456").unwrap();

    assert!(t
        .read_document(&id)
        .unwrap()
        .ends_with(r#"<words id="5">456</words>"#));
}

#[test]
fn updating_node_element_renames_tag() {
    let t = TestStore::new();
    let id = t.save_document(&doc("<r><old/></r>"), "r").unwrap();
    let model = t.get_edit_model(&id).unwrap();

    t.update_element_value(&model.root.children[0].id.to_string(), "new")
        .unwrap();

    let xml = t.read_document(&id).unwrap();
    assert!(xml.contains("<new/>"));
    assert!(!xml.contains("<old/>"));
}

#[test]
fn renaming_node_to_invalid_name_fails_read() {
    let t = TestStore::new();
    let id = t.save_document(WORDS, "words").unwrap();
    let root = t.get_edit_model(&id).unwrap().root.id.to_string();

    for name in ["", r#"a b="x""#] {
        t.update_element_value(&root, name).unwrap();
        let err = t.read_document(&id).unwrap_err();
        assert!(
            matches!(err, Error::Serialization { .. }),
            "{:?} gave {:?}",
            name,
            err
        );
        assert!(err.is_infrastructure());
    }

    // The edit model still loads, so the value can be repaired
    t.update_element_value(&root, "words").unwrap();
    assert!(t
        .read_document(&id)
        .unwrap()
        .ends_with(r#"<words id="5">123</words>"#));
}

#[test]
fn illegal_attribute_value_fails_read_and_markup_is_escaped() {
    let t = TestStore::new();
    let id = t.save_document(WORDS, "words").unwrap();
    let attr = t.get_edit_model(&id).unwrap().root.attributes[0].id.to_string();

    t.update_attribute_value(&attr, "\u{1}").unwrap();
    let err = t.read_document(&id).unwrap_err();
    assert!(matches!(err, Error::Serialization { .. }));

    t.update_attribute_value(&attr, r#"<"&>"#).unwrap();
    let xml = t.read_document(&id).unwrap();
    assert!(xml.contains(r#"id="&lt;&quot;&amp;&gt;""#));
}

#[test]
fn update_is_last_writer_wins() {
    let t = TestStore::new();
    let id = t.save_document(WORDS, "words").unwrap();
    let attr_id = t.get_edit_model(&id).unwrap().root.attributes[0].id.to_string();

    t.update_attribute_value(&attr_id, "6").unwrap();
    t.update_attribute_value(&attr_id, "7").unwrap();

    let model = t.get_edit_model(&id).unwrap();
    assert_eq!(model.root.attribute("id").unwrap().value, "7");
}

#[test]
fn updating_missing_rows_fails() {
    let t = TestStore::new();
    t.save_document(WORDS, "words").unwrap();

    let err = t
        .update_element_value(&xmlstore::ElementId::new().to_string(), "x")
        .unwrap_err();
    assert_eq!(err.to_string(), "Element with this Id does not exist!");

    let err = t
        .update_attribute_value(&xmlstore::AttributeId::new().to_string(), "x")
        .unwrap_err();
    assert_eq!(err.to_string(), "Attribute with this Id does not exist!");
    assert!(err.is_not_found());
}

#[test]
fn deleting_element_removes_subtree_and_keeps_order_dense() {
    let t = TestStore::new();
    let id = t.save_document(DICTIONARY, "dictionary").unwrap();
    let before = t.counts();
    let model = t.get_edit_model(&id).unwrap();
    let first_word = &model.root.children[0];

    t.delete_element(&first_word.id.to_string()).unwrap();

    // word, text, "sky", meaning, "above"
    let after = t.counts();
    assert_eq!(after.elements, before.elements - 5);
    // id, d, d
    assert_eq!(after.attributes, before.attributes - 3);

    let model = t.get_edit_model(&id).unwrap();
    let children: Vec<(&str, u32)> = model
        .root
        .children
        .iter()
        .map(|c| (c.value.as_str(), c.order))
        .collect();
    assert_eq!(children, vec![("word", 1), ("note", 2)]);
}

#[test]
fn deleting_root_element_is_refused() {
    let t = TestStore::new();
    let id = t.save_document(WORDS, "words").unwrap();
    let root = t.get_edit_model(&id).unwrap().root.id.to_string();

    let err = t.delete_element(&root).unwrap_err();
    assert!(matches!(err, Error::RootElementDeletion { .. }));
    assert_eq!(
        err.to_string(),
        "Root element can not be deleted, delete the whole document instead!"
    );
    assert!(t.read_document(&id).is_ok());
}

#[test]
fn deleting_missing_element_fails() {
    let t = TestStore::new();
    let err = t
        .delete_element(&xmlstore::ElementId::new().to_string())
        .unwrap_err();
    assert!(matches!(err, Error::ElementNotFound { .. }));
}

#[test]
fn edit_model_serializes_for_clients() {
    let t = TestStore::new();
    let id = t.save_document(WORDS, "words").unwrap();
    let model = t.get_edit_model(&id).unwrap();

    let json = serde_json::to_value(&model).unwrap();
    assert_eq!(json["id"], serde_json::json!(id));
    assert_eq!(json["root"]["value"], "words");
    assert_eq!(json["root"]["kind"], "node");
    assert_eq!(json["root"]["attributes"][0]["value"], "5");
    assert_eq!(json["root"]["children"][0]["kind"], "text");

    let back: xmlstore::EditDocument = serde_json::from_value(json).unwrap();
    assert_eq!(back, model);
}
