//! Store handle
//!
//! A [`Store`] owns one SQLite connection behind a mutex. Every public
//! operation runs in its own transaction; composite writes go through
//! [`Store::transaction`], which commits only when the closure succeeds.

use parking_lot::Mutex;
use rusqlite::Connection;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use xmlstore_core::{
    AttributeId, AttributeRow, DocumentId, DocumentRow, DocumentSummary, ElementId, ElementRow,
    Result,
};

use crate::gateway::{sql_error, RowCounts, StoreTxn};
use crate::schema;

/// Where the store keeps its data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Private in-memory database, lost on drop
    Memory,
    /// Database file on disk
    File(PathBuf),
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreLocation::Memory => write!(f, ":memory:"),
            StoreLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Relational store of XML documents
pub struct Store {
    conn: Mutex<Connection>,
    location: StoreLocation,
}

impl Store {
    /// Open (or create) a database file.
    ///
    /// The schema is not created here; call [`Store::initialize`].
    pub fn open(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path).map_err(sql_error)?;
        conn.busy_timeout(busy_timeout).map_err(sql_error)?;
        let store = Self::from_connection(conn, StoreLocation::File(path))?;
        info!(target: "xmlstore::storage", location = %store.location, "Opened store");
        Ok(store)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(sql_error)?;
        let store = Self::from_connection(conn, StoreLocation::Memory)?;
        debug!(target: "xmlstore::storage", "Opened in-memory store");
        Ok(store)
    }

    fn from_connection(conn: Connection, location: StoreLocation) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(sql_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
            location,
        })
    }

    /// Where this store keeps its data
    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Create the schema if it does not exist yet. Idempotent.
    pub fn initialize(&self) -> Result<()> {
        let mut conn = self.conn.lock();
        schema::create_schema(&mut conn)?;
        info!(target: "xmlstore::storage", location = %self.location, "Schema ready");
        Ok(())
    }

    /// Run `f` inside one transaction.
    ///
    /// The transaction commits when `f` returns `Ok`. On `Err` it is dropped
    /// and rolled back, leaving no partial rows behind.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&StoreTxn<'_>) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction().map_err(sql_error)?;
        let txn = StoreTxn::new(tx);
        let value = f(&txn)?;
        txn.commit()?;
        Ok(value)
    }

    // ========================================================================
    // Single-transaction wrappers
    // ========================================================================

    /// See [`StoreTxn::fetch_document`]
    pub fn fetch_document(&self, id: &DocumentId) -> Result<Option<DocumentRow>> {
        self.transaction(|txn| txn.fetch_document(id))
    }

    /// See [`StoreTxn::fetch_element`]
    pub fn fetch_element(&self, id: &ElementId) -> Result<Option<ElementRow>> {
        self.transaction(|txn| txn.fetch_element(id))
    }

    /// See [`StoreTxn::fetch_elements`]
    pub fn fetch_elements(&self, document_id: &DocumentId) -> Result<Vec<ElementRow>> {
        self.transaction(|txn| txn.fetch_elements(document_id))
    }

    /// See [`StoreTxn::fetch_attributes`]
    pub fn fetch_attributes(&self, element_id: &ElementId) -> Result<Vec<AttributeRow>> {
        self.transaction(|txn| txn.fetch_attributes(element_id))
    }

    /// See [`StoreTxn::list_documents`]
    pub fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        self.transaction(|txn| txn.list_documents())
    }

    /// See [`StoreTxn::row_counts`]
    pub fn row_counts(&self) -> Result<RowCounts> {
        self.transaction(|txn| txn.row_counts())
    }

    /// See [`StoreTxn::delete_document`]
    pub fn delete_document(&self, id: &DocumentId) -> Result<()> {
        self.transaction(|txn| txn.delete_document(id))
    }

    /// See [`StoreTxn::delete_element`]
    pub fn delete_element(&self, id: &ElementId) -> Result<ElementRow> {
        self.transaction(|txn| txn.delete_element(id))
    }

    /// See [`StoreTxn::update_element_value`]
    pub fn update_element_value(&self, id: &ElementId, value: &str) -> Result<()> {
        self.transaction(|txn| txn.update_element_value(id, value))
    }

    /// See [`StoreTxn::update_attribute_value`]
    pub fn update_attribute_value(&self, id: &AttributeId, value: &str) -> Result<()> {
        self.transaction(|txn| txn.update_attribute_value(id, value))
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("location", &self.location)
            .finish()
    }
}
