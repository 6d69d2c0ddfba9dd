//! Document operations.

use super::XmlStore;
use xmlstore_core::{AttributeId, DocumentId, DocumentSummary, EditDocument, ElementId, Result};

impl XmlStore {
    // =========================================================================
    // Documents
    // =========================================================================

    /// Save an XML document under `name`.
    ///
    /// Returns the new document identifier as text.
    ///
    /// # Errors
    ///
    /// - `EmptyDocumentName` if `name` is empty
    /// - `InvalidXml` if `xml` is not well-formed
    /// - `InvalidDeclaration` if the declaration is missing or lacks
    ///   version or encoding
    pub fn save_document(&self, xml: &str, name: &str) -> Result<String> {
        self.db.save_document(xml, name).map(|id| id.to_string())
    }

    /// Reconstruct a stored document as indented XML text.
    ///
    /// # Errors
    ///
    /// - `InvalidId` if `id` is not a document identifier
    /// - `DocumentNotFound` if no document has this identifier
    /// - `Serialization` if an edited tag name, attribute name or value can
    ///   no longer be written as XML
    pub fn read_document(&self, id: &str) -> Result<String> {
        self.db.read_document(&id.parse::<DocumentId>()?)
    }

    /// Reconstruct a stored document as a tree that keeps row identifiers.
    pub fn get_edit_model(&self, id: &str) -> Result<EditDocument> {
        self.db.edit_model(&id.parse::<DocumentId>()?)
    }

    /// Replace an element's value (tag name for nodes, text for text).
    ///
    /// The value is stored as given; an illegal tag name only shows up as a
    /// `Serialization` error on the next [`read_document`](Self::read_document).
    pub fn update_element_value(&self, id: &str, value: &str) -> Result<()> {
        self.db
            .update_element_value(&id.parse::<ElementId>()?, value)
    }

    /// Replace an attribute's value.
    pub fn update_attribute_value(&self, id: &str, value: &str) -> Result<()> {
        self.db
            .update_attribute_value(&id.parse::<AttributeId>()?, value)
    }

    /// Delete a document with all its elements and attributes.
    ///
    /// # Errors
    ///
    /// - `InvalidId` if `id` is not a document identifier, checked before
    ///   the store is queried
    /// - `NoDocumentToDelete` if no document has this identifier
    pub fn delete_document(&self, id: &str) -> Result<()> {
        self.db.delete_document(&id.parse::<DocumentId>()?)
    }

    /// Delete one non-root element with its subtree.
    pub fn delete_element(&self, id: &str) -> Result<()> {
        self.db.delete_element(&id.parse::<ElementId>()?)
    }

    /// Identifier and name of every stored document.
    pub fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        self.db.list_documents()
    }
}
