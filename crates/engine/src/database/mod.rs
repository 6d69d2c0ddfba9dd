//! XmlDatabase struct and open logic
//!
//! This module provides the main database struct that ties together:
//! - Configuration (`xmlstore.toml`)
//! - The relational store
//! - Encoder on write, decoder on read
//!
//! Every operation runs in exactly one store transaction. Write paths parse
//! and validate first, so invalid input never opens a transaction.

pub mod config;

pub use config::{XmlStoreConfig, CONFIG_FILE_NAME};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use xmlstore_core::{
    AttributeId, DocumentId, DocumentRow, DocumentSummary, EditDocument, ElementId, Error, Limits,
    Result,
};
use xmlstore_storage::{RowCounts, Store};

use crate::decoder::{serialize_document, RowSet};
use crate::encoder::encode;

// ============================================================================
// XmlDatabase
// ============================================================================

/// XML document database
///
/// Create one with [`XmlDatabase::open`] (file-backed, configured from
/// `xmlstore.toml`) or [`XmlDatabase::ephemeral`] (in-memory), then call
/// [`XmlDatabase::create_store`] once to ensure the schema exists.
///
/// # Example
///
/// ```text
/// use xmlstore_engine::XmlDatabase;
///
/// let db = XmlDatabase::open("/path/to/data")?;
/// db.create_store()?;
/// let id = db.save_document(r#"<?xml version="1.0" encoding="UTF-8"?><a/>"#, "a")?;
/// let xml = db.read_document(&id)?;
/// ```
pub struct XmlDatabase {
    /// Data directory (None for ephemeral databases)
    data_dir: Option<PathBuf>,
    store: Store,
    config: XmlStoreConfig,
}

impl XmlDatabase {
    /// Open the database in `path`.
    ///
    /// Reads `xmlstore.toml` from the data directory, creating it with
    /// defaults first if it does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Arc<Self>> {
        let data_dir = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let config_path = data_dir.join(CONFIG_FILE_NAME);
        XmlStoreConfig::write_default_if_missing(&config_path)?;
        let cfg = XmlStoreConfig::from_file(&config_path)?;

        Self::open_in_dir(data_dir, cfg)
    }

    /// Open the database in `path` with an explicit configuration.
    ///
    /// The supplied config is written to `xmlstore.toml` so that later
    /// [`XmlDatabase::open`] calls pick up the same settings.
    pub fn open_with_config<P: AsRef<Path>>(path: P, cfg: XmlStoreConfig) -> Result<Arc<Self>> {
        cfg.validate()?;

        let data_dir = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;
        cfg.write_to_file(&data_dir.join(CONFIG_FILE_NAME))?;

        Self::open_in_dir(data_dir, cfg)
    }

    fn open_in_dir(data_dir: PathBuf, cfg: XmlStoreConfig) -> Result<Arc<Self>> {
        let db_path = data_dir.join(&cfg.database_file);
        let store = Store::open(&db_path, cfg.busy_timeout())?;

        info!(
            target: "xmlstore::db",
            path = ?db_path,
            max_nesting_depth = cfg.max_nesting_depth,
            "Opened database"
        );

        Ok(Arc::new(Self {
            data_dir: Some(data_dir),
            store,
            config: cfg,
        }))
    }

    /// Open a private in-memory database with default configuration.
    ///
    /// Nothing is written to disk; all data is lost on drop.
    pub fn ephemeral() -> Result<Arc<Self>> {
        let store = Store::open_in_memory()?;
        Ok(Arc::new(Self {
            data_dir: None,
            store,
            config: XmlStoreConfig::default(),
        }))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Data directory, `None` for ephemeral databases
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Active configuration
    pub fn config(&self) -> &XmlStoreConfig {
        &self.config
    }

    /// Traversal limits from the configuration
    pub fn limits(&self) -> Limits {
        self.config.limits()
    }

    /// Underlying store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Row count of each table
    pub fn row_counts(&self) -> Result<RowCounts> {
        self.store.row_counts()
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Ensure the schema exists. Safe to call repeatedly.
    pub fn create_store(&self) -> Result<()> {
        self.store.initialize()
    }

    /// Validate, encode and persist an XML document.
    ///
    /// All rows are written in one transaction; on any failure nothing is
    /// committed.
    pub fn save_document(&self, xml: &str, name: &str) -> Result<DocumentId> {
        let encoded = encode(xml, name, &self.limits())?;

        self.store.transaction(|txn| {
            txn.insert_document(&encoded.document)?;
            for element in &encoded.elements {
                txn.insert_element(element)?;
            }
            for attribute in &encoded.attributes {
                txn.insert_attribute(attribute)?;
            }
            Ok(())
        })?;

        info!(
            target: "xmlstore::db",
            document_id = %encoded.id(),
            name,
            elements = encoded.elements.len(),
            attributes = encoded.attributes.len(),
            "Saved document"
        );
        Ok(encoded.id())
    }

    /// Fetch a document header and its indexed rows in one transaction.
    ///
    /// Fails with `DocumentNotFound` if the document does not exist.
    pub fn load_document(&self, id: &DocumentId) -> Result<(DocumentRow, RowSet)> {
        let (document, elements, attributes) = self.store.transaction(|txn| {
            let document = txn
                .fetch_document(id)?
                .ok_or_else(|| Error::DocumentNotFound { id: id.to_string() })?;
            let elements = txn.fetch_elements(id)?;
            let attributes = txn.fetch_document_attributes(id)?;
            Ok((document, elements, attributes))
        })?;

        debug!(
            target: "xmlstore::db",
            document_id = %id,
            elements = elements.len(),
            attributes = attributes.len(),
            "Loaded document rows"
        );
        Ok((document, RowSet::new(elements, attributes)))
    }

    /// Reconstruct a document as XML text.
    pub fn read_document(&self, id: &DocumentId) -> Result<String> {
        let (document, rows) = self.load_document(id)?;
        let root = rows.subtree(&rows.root()?.id, &self.limits())?;
        serialize_document(&document, &root)
    }

    /// Reconstruct a document as an editable tree keeping row identifiers.
    pub fn edit_model(&self, id: &DocumentId) -> Result<EditDocument> {
        let (document, rows) = self.load_document(id)?;
        let root = rows.subtree(&rows.root()?.id, &self.limits())?;
        Ok(EditDocument {
            id: document.id,
            name: document.name,
            root,
        })
    }

    /// Replace the value of an element (tag name or text).
    pub fn update_element_value(&self, id: &ElementId, value: &str) -> Result<()> {
        self.store.update_element_value(id, value)?;
        debug!(target: "xmlstore::db", element_id = %id, "Updated element value");
        Ok(())
    }

    /// Replace the value of an attribute.
    pub fn update_attribute_value(&self, id: &AttributeId, value: &str) -> Result<()> {
        self.store.update_attribute_value(id, value)?;
        debug!(target: "xmlstore::db", attribute_id = %id, "Updated attribute value");
        Ok(())
    }

    /// Delete a document and, by cascade, all its rows.
    pub fn delete_document(&self, id: &DocumentId) -> Result<()> {
        self.store.delete_document(id)?;
        info!(target: "xmlstore::db", document_id = %id, "Deleted document");
        Ok(())
    }

    /// Delete a non-root element and its subtree.
    pub fn delete_element(&self, id: &ElementId) -> Result<()> {
        let removed = self.store.delete_element(id)?;
        info!(
            target: "xmlstore::db",
            element_id = %id,
            document_id = %removed.document_id,
            "Deleted element"
        );
        Ok(())
    }

    /// Identifier and name of every stored document.
    pub fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        self.store.list_documents()
    }
}

impl std::fmt::Debug for XmlDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XmlDatabase")
            .field("data_dir", &self.data_dir)
            .field("store", &self.store)
            .field("config", &self.config)
            .finish()
    }
}
