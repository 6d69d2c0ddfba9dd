//! Search operations.

use super::XmlStore;
use xmlstore_core::{DocumentId, Result, Subtree};
use xmlstore_search::{DatabaseSearchExt, ElementQuery};

impl XmlStore {
    // =========================================================================
    // Search
    // =========================================================================

    /// Subtrees rooted at every Node element named `name`.
    ///
    /// A match nested inside another match is returned as its own entry.
    pub fn find_by_node_name(&self, document_id: &str, name: &str) -> Result<Vec<Subtree>> {
        self.find(document_id, &ElementQuery::node_name(name))
    }

    /// Subtrees rooted at every element owning an attribute `name="value"`.
    pub fn find_by_attribute(
        &self,
        document_id: &str,
        name: &str,
        value: &str,
    ) -> Result<Vec<Subtree>> {
        self.find(document_id, &ElementQuery::attribute(name, value))
    }

    /// Subtrees rooted at every element matching `query`.
    pub fn find(&self, document_id: &str, query: &ElementQuery) -> Result<Vec<Subtree>> {
        self.db
            .search()
            .find(&document_id.parse::<DocumentId>()?, query)
    }
}
