//! Subtree search over one document
//!
//! A search loads the document's rows once, filters them with an
//! [`ElementQuery`], and materializes every match as its own subtree.
//! Matches nested inside other matches are returned as separate entries;
//! result order is the fetch order of the matching rows.

use crate::query::ElementQuery;
use std::sync::Arc;
use tracing::debug;
use xmlstore_core::{DocumentId, Limits, Result, Subtree};
use xmlstore_engine::{RowSet, XmlDatabase};

// ============================================================================
// DocumentSearch
// ============================================================================

/// Search interface over an [`XmlDatabase`]
///
/// Stateless; holds only the database handle.
#[derive(Debug, Clone)]
pub struct DocumentSearch {
    db: Arc<XmlDatabase>,
}

impl DocumentSearch {
    /// Create a search interface for `db`
    pub fn new(db: Arc<XmlDatabase>) -> Self {
        Self { db }
    }

    /// All subtrees of `document_id` rooted at an element matching `query`.
    ///
    /// Fails with `DocumentNotFound` if the document does not exist.
    pub fn find(&self, document_id: &DocumentId, query: &ElementQuery) -> Result<Vec<Subtree>> {
        let (_, rows) = self.db.load_document(document_id)?;
        let matches = select(&rows, query, &self.db.limits())?;
        debug!(
            target: "xmlstore::search",
            document_id = %document_id,
            query = %query,
            matches = matches.len(),
            "Search complete"
        );
        Ok(matches)
    }

    /// Subtrees rooted at every Node element named `name`.
    pub fn find_by_node_name(&self, document_id: &DocumentId, name: &str) -> Result<Vec<Subtree>> {
        self.find(document_id, &ElementQuery::node_name(name))
    }

    /// Subtrees rooted at every element owning `name="value"`.
    pub fn find_by_attribute(
        &self,
        document_id: &DocumentId,
        name: &str,
        value: &str,
    ) -> Result<Vec<Subtree>> {
        self.find(document_id, &ElementQuery::attribute(name, value))
    }
}

/// Filter an indexed row set and build one subtree per match.
pub fn select(rows: &RowSet, query: &ElementQuery, limits: &Limits) -> Result<Vec<Subtree>> {
    rows.elements()
        .iter()
        .filter(|element| query.matches(element, rows.attributes_of(&element.id)))
        .map(|element| rows.subtree(&element.id, limits))
        .collect()
}
