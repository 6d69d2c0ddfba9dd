//! High-level wrapper for the engine.
//!
//! The [`XmlStore`] struct exposes the document operations with textual
//! identifiers, the way a web or command-line caller holds them. Malformed
//! identifier text fails with `Error::InvalidId` before anything is read.
//!
//! # Example
//!
//! ```text
//! use xmlstore::XmlStore;
//!
//! let store = XmlStore::open("/path/to/data")?;
//! store.create_store()?;
//! let id = store.save_document(xml, "words")?;
//! for word in store.find_by_node_name(&id, "word")? {
//!     println!("{}", word.inner_text());
//! }
//! ```

mod documents;
mod search;

use std::path::Path;
use std::sync::Arc;

use xmlstore_core::Result;
use xmlstore_engine::{XmlDatabase, XmlStoreConfig};

/// High-level interface to an XML document database.
#[derive(Debug, Clone)]
pub struct XmlStore {
    db: Arc<XmlDatabase>,
}

impl XmlStore {
    /// Open a database at the given path.
    ///
    /// Settings come from `xmlstore.toml` in that directory, which is
    /// created with defaults if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            db: XmlDatabase::open(path)?,
        })
    }

    /// Open a database at the given path with an explicit configuration.
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: XmlStoreConfig) -> Result<Self> {
        Ok(Self {
            db: XmlDatabase::open_with_config(path, config)?,
        })
    }

    /// Open a private in-memory database.
    pub fn ephemeral() -> Result<Self> {
        Ok(Self {
            db: XmlDatabase::ephemeral()?,
        })
    }

    /// Wrap an already open database.
    pub fn from_database(db: Arc<XmlDatabase>) -> Self {
        Self { db }
    }

    /// The underlying typed database.
    pub fn database(&self) -> &Arc<XmlDatabase> {
        &self.db
    }

    /// Ensure the schema exists. Idempotent.
    pub fn create_store(&self) -> Result<()> {
        self.db.create_store()
    }
}
