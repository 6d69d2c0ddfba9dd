//! Edit model: reconstructed trees that keep persisted identifiers
//!
//! [`ElementModel`] mirrors the document structure and carries each
//! element's and attribute's row identifier, so a caller can pick a node
//! and issue a targeted value update. Search results are the same type,
//! rooted at the match instead of the document root.

use crate::types::{AttributeId, DocumentId, ElementId, ElementKind};
use serde::{Deserialize, Serialize};

/// Attribute of an [`ElementModel`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeModel {
    /// Attribute row identifier
    pub id: AttributeId,
    /// Attribute name
    pub name: String,
    /// Attribute value
    pub value: String,
    /// 1-based position among the element's attributes
    pub order: u32,
}

/// A reconstructed element and everything below it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementModel {
    /// Element row identifier
    pub id: ElementId,
    /// 1-based position among its siblings
    pub order: u32,
    /// Node or Text
    pub kind: ElementKind,
    /// Tag name for Node, literal text for Text
    pub value: String,
    /// Attributes in order (always empty for Text)
    pub attributes: Vec<AttributeModel>,
    /// Children in sibling order (always empty for Text)
    pub children: Vec<ElementModel>,
}

/// A search match materialized with its descendants
pub type Subtree = ElementModel;

impl ElementModel {
    /// True for a Text element
    pub fn is_text(&self) -> bool {
        self.kind == ElementKind::Text
    }

    /// Attribute with the given name, if any
    pub fn attribute(&self, name: &str) -> Option<&AttributeModel> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Concatenated values of the direct Text children
    pub fn inner_text(&self) -> String {
        self.children
            .iter()
            .filter(|c| c.is_text())
            .map(|c| c.value.as_str())
            .collect()
    }

    /// This element and all its descendants in document (pre-)order
    pub fn descendants(&self) -> Vec<&ElementModel> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// All Node elements named `name` in this subtree, in document order
    pub fn find_all(&self, name: &str) -> Vec<&ElementModel> {
        self.descendants()
            .into_iter()
            .filter(|e| !e.is_text() && e.value == name)
            .collect()
    }
}

/// A whole document reconstructed for editing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDocument {
    /// Document identifier
    pub id: DocumentId,
    /// Display name
    pub name: String,
    /// Root element tree
    pub root: ElementModel,
}
