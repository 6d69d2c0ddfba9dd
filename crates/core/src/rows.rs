//! Row types of the adjacency-list schema
//!
//! One [`DocumentRow`] per stored document, one [`ElementRow`] per XML node
//! (tag or text), one [`AttributeRow`] per attribute. Elements point to their
//! parent; the root is the single element with `parent_id == None`.

use crate::types::{AttributeId, DocumentId, ElementId, ElementKind};
use serde::{Deserialize, Serialize};

/// A stored document header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRow {
    /// Document identifier
    pub id: DocumentId,
    /// Display name given at save time
    pub name: String,
    /// Declared XML version (e.g. "1.0")
    pub version: String,
    /// Declared encoding name (e.g. "UTF-8")
    pub encoding: String,
}

/// Identifier and name of a stored document, as listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Document identifier
    pub id: DocumentId,
    /// Display name
    pub name: String,
}

/// One element row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRow {
    /// Element identifier
    pub id: ElementId,
    /// Owning document
    pub document_id: DocumentId,
    /// Parent element; `None` only for the document root
    pub parent_id: Option<ElementId>,
    /// 1-based position among the parent's children
    pub order: u32,
    /// Node or Text
    pub kind: ElementKind,
    /// Tag name for Node, literal text for Text
    pub value: String,
}

impl ElementRow {
    /// True for the document root
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// One attribute row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRow {
    /// Attribute identifier
    pub id: AttributeId,
    /// Owning element (always a Node)
    pub element_id: ElementId,
    /// Attribute name
    pub name: String,
    /// Attribute value (unescaped)
    pub value: String,
    /// 1-based position among the element's attributes
    pub order: u32,
}
