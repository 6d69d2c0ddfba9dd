//! xmlstore - relational persistence for XML documents
//!
//! xmlstore stores arbitrary XML documents in SQLite by flattening each
//! document tree into adjacency-list rows (documents, elements, attributes)
//! and rebuilds full documents, editable models or search subtrees from
//! those rows.
//!
//! # Quick Start
//!
//! ```ignore
//! use xmlstore::XmlStore;
//!
//! let store = XmlStore::ephemeral()?;
//! store.create_store()?;
//!
//! let id = store.save_document(
//!     r#"<?xml version="1.0" encoding="UTF-8"?><words id="5">123</words>"#,
//!     "words",
//! )?;
//! let xml = store.read_document(&id)?;
//! ```
//!
//! # Architecture
//!
//! The [`XmlStore`] struct is the text-level interface: identifiers go in
//! and come out as strings. Typed access is available through
//! [`XmlDatabase`] and the [`DatabaseSearchExt`] extension.

mod api;

pub use api::XmlStore;

pub use xmlstore_core::{
    AttributeId, AttributeModel, DocumentId, DocumentSummary, EditDocument, ElementId,
    ElementKind, ElementModel, Error, Limits, Result, Subtree,
};
pub use xmlstore_engine::{serialize_fragment, XmlDatabase, XmlStoreConfig, CONFIG_FILE_NAME};
pub use xmlstore_search::{DatabaseSearchExt, DocumentSearch, ElementQuery};
pub use xmlstore_storage::RowCounts;
