//! Search for xmlstore
//!
//! This crate provides:
//! - ElementQuery: node-name and attribute predicates
//! - DocumentSearch: load a document once, return one subtree per match
//! - DatabaseSearchExt extension trait for the db.search() accessor
//!
//! # Usage
//!
//! ```ignore
//! use xmlstore_search::DatabaseSearchExt;
//!
//! let words = db.search().find_by_node_name(&document_id, "word")?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod finder;
pub mod query;

use std::sync::Arc;
use xmlstore_engine::XmlDatabase;

pub use finder::{select, DocumentSearch};
pub use query::ElementQuery;

// ============================================================================
// Database Extension
// ============================================================================

/// Extension trait for XmlDatabase to provide search functionality
///
/// This trait adds the `.search()` method to `Arc<XmlDatabase>`.
pub trait DatabaseSearchExt {
    /// Get the search interface
    fn search(&self) -> DocumentSearch;
}

impl DatabaseSearchExt for Arc<XmlDatabase> {
    fn search(&self) -> DocumentSearch {
        DocumentSearch::new(Arc::clone(self))
    }
}
