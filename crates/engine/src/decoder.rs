//! Tree decoder: adjacency-list rows back to trees
//!
//! [`RowSet`] indexes the flat rows of one document once (by identifier,
//! parent to sorted children, element to sorted attributes). Any element can
//! then be materialized as an [`ElementModel`] subtree, which serves both
//! the edit model and search results. [`serialize_document`] and
//! [`serialize_fragment`] render a model as indented XML text.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;
use xmlstore_core::{
    AttributeModel, AttributeRow, DocumentRow, ElementId, ElementKind, ElementModel, ElementRow,
    Error, Limits, Result,
};

use crate::syntax;

// ============================================================================
// RowSet
// ============================================================================

/// Indexed rows of one document
#[derive(Debug, Clone)]
pub struct RowSet {
    /// Elements in fetch order
    elements: Vec<ElementRow>,
    by_id: HashMap<ElementId, usize>,
    /// Parent id to child positions, sorted by sibling order
    children: HashMap<ElementId, Vec<usize>>,
    /// Element id to its attributes, sorted by attribute order
    attributes: HashMap<ElementId, Vec<AttributeRow>>,
    roots: Vec<usize>,
}

impl RowSet {
    /// Index the given rows. Attributes of unknown elements are ignored.
    pub fn new(elements: Vec<ElementRow>, attributes: Vec<AttributeRow>) -> Self {
        let mut by_id = HashMap::with_capacity(elements.len());
        let mut children: HashMap<ElementId, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();

        for (idx, element) in elements.iter().enumerate() {
            by_id.insert(element.id, idx);
            match element.parent_id {
                Some(parent) => children.entry(parent).or_default().push(idx),
                None => roots.push(idx),
            }
        }
        for siblings in children.values_mut() {
            siblings.sort_by_key(|&idx| elements[idx].order);
        }

        let mut by_element: HashMap<ElementId, Vec<AttributeRow>> = HashMap::new();
        for attribute in attributes {
            if by_id.contains_key(&attribute.element_id) {
                by_element
                    .entry(attribute.element_id)
                    .or_default()
                    .push(attribute);
            }
        }
        for attrs in by_element.values_mut() {
            attrs.sort_by_key(|a| a.order);
        }

        Self {
            elements,
            by_id,
            children,
            attributes: by_element,
            roots,
        }
    }

    /// All element rows in fetch order
    pub fn elements(&self) -> &[ElementRow] {
        &self.elements
    }

    /// Number of element rows
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True if the document has no element rows
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element row by identifier
    pub fn get(&self, id: &ElementId) -> Option<&ElementRow> {
        self.by_id.get(id).map(|&idx| &self.elements[idx])
    }

    /// The document root.
    ///
    /// Exactly one parentless Node element must exist; anything else is
    /// reported as `Corruption`.
    pub fn root(&self) -> Result<&ElementRow> {
        let root = match self.roots.as_slice() {
            [idx] => &self.elements[*idx],
            [] => return Err(self.corrupted("document has no root element")),
            _ => return Err(self.corrupted("document has more than one root element")),
        };
        if root.kind != ElementKind::Node {
            return Err(self.corrupted("root element is a text element"));
        }
        Ok(root)
    }

    /// Direct children of `id`, in sibling order
    pub fn children_of<'a>(&'a self, id: &ElementId) -> impl Iterator<Item = &'a ElementRow> + 'a {
        self.children
            .get(id)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.elements[idx])
    }

    /// Attributes of `id`, in attribute order
    pub fn attributes_of(&self, id: &ElementId) -> &[AttributeRow] {
        self.attributes.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Materialize the element `id` and everything below it.
    ///
    /// The match itself is depth 1; a subtree deeper than `limits` fails
    /// with `NestingTooDeep`, which also stops on cyclic parent links.
    pub fn subtree(&self, id: &ElementId, limits: &Limits) -> Result<ElementModel> {
        let element = self
            .get(id)
            .ok_or_else(|| Error::ElementNotFound { id: id.to_string() })?;
        self.build(element, 1, limits)
    }

    fn build(&self, element: &ElementRow, depth: usize, limits: &Limits) -> Result<ElementModel> {
        limits.check_depth(depth)?;

        let (attributes, children) = match element.kind {
            ElementKind::Text => (Vec::new(), Vec::new()),
            ElementKind::Node => {
                let attributes = self
                    .attributes_of(&element.id)
                    .iter()
                    .map(|a| AttributeModel {
                        id: a.id,
                        name: a.name.clone(),
                        value: a.value.clone(),
                        order: a.order,
                    })
                    .collect();
                let children = self
                    .children_of(&element.id)
                    .map(|child| self.build(child, depth + 1, limits))
                    .collect::<Result<Vec<_>>>()?;
                (attributes, children)
            }
        };

        Ok(ElementModel {
            id: element.id,
            order: element.order,
            kind: element.kind,
            value: element.value.clone(),
            attributes,
            children,
        })
    }

    fn corrupted(&self, reason: &str) -> Error {
        let document_id = self.elements.first().map(|e| e.document_id.to_string());
        warn!(
            target: "xmlstore::decoder",
            document_id = ?document_id,
            roots = self.roots.len(),
            reason,
            "Corrupted element rows"
        );
        Error::corruption(reason)
    }
}

// ============================================================================
// Serialization
// ============================================================================

/// Render a whole document: declaration from the stored version and
/// encoding name, then the tree with two-space indentation.
///
/// The returned text is UTF-8 whatever encoding name the declaration
/// carries.
pub fn serialize_document(document: &DocumentRow, root: &ElementModel) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new(
            document.version.as_str(),
            Some(document.encoding.as_str()),
            None,
        )))
        .map_err(serialization_error)?;
    write_element(&mut writer, root)?;
    finish(writer)
}

/// Render one subtree without a declaration.
pub fn serialize_fragment(element: &ElementModel) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_element(&mut writer, element)?;
    finish(writer)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &ElementModel) -> Result<()> {
    if element.is_text() {
        check_text(&element.value)?;
        return writer
            .write_event(Event::Text(BytesText::new(&element.value)))
            .map_err(serialization_error);
    }

    check_name(&element.value)?;
    let mut start = BytesStart::new(element.value.as_str());
    for attribute in &element.attributes {
        check_name(&attribute.name)?;
        check_text(&attribute.value)?;
        start.push_attribute((attribute.name.as_str(), attribute.value.as_str()));
    }

    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(serialization_error);
    }

    writer
        .write_event(Event::Start(start))
        .map_err(serialization_error)?;
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.value.as_str())))
        .map_err(serialization_error)
}

// Stored values are unvalidated; names and characters are checked on output.
fn check_name(name: &str) -> Result<()> {
    if syntax::is_name(name) {
        return Ok(());
    }
    Err(serialization_error(format_args!(
        "'{}' is not a valid XML name",
        name
    )))
}

fn check_text(text: &str) -> Result<()> {
    match syntax::find_illegal_char(text) {
        Some(c) => Err(serialization_error(format_args!(
            "character U+{:04X} can not be written as XML",
            c as u32
        ))),
        None => Ok(()),
    }
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    String::from_utf8(writer.into_inner()).map_err(serialization_error)
}

fn serialization_error(err: impl fmt::Display) -> Error {
    Error::Serialization {
        reason: err.to_string(),
    }
}
