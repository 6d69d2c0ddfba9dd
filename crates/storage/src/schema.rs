//! Relational schema
//!
//! ```text
//! xml_document (id PK, name, version, encoding)
//! xml_element  (id PK, document_id FK -> xml_document ON DELETE CASCADE,
//!               sort_order, parent_id FK -> xml_element ON DELETE CASCADE (NULL = root),
//!               kind 'node' | 'text', value)
//! xml_attribute(id PK, element_id FK -> xml_element ON DELETE CASCADE,
//!               name, value, sort_order)
//! ```
//!
//! Cascades require `PRAGMA foreign_keys = ON`, which [`crate::Store`]
//! sets on every connection it opens.

use rusqlite::Connection;
use xmlstore_core::{Error, Result};

/// Table holding one row per document
pub const DOCUMENT_TABLE: &str = "xml_document";
/// Table holding one row per element (Node or Text)
pub const ELEMENT_TABLE: &str = "xml_element";
/// Table holding one row per attribute
pub const ATTRIBUTE_TABLE: &str = "xml_attribute";

/// Idempotent schema script
pub const CREATE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS xml_document (
    id       TEXT PRIMARY KEY NOT NULL,
    name     TEXT NOT NULL,
    version  TEXT NOT NULL,
    encoding TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS xml_element (
    id          TEXT PRIMARY KEY NOT NULL,
    document_id TEXT NOT NULL
                REFERENCES xml_document(id) ON DELETE CASCADE,
    sort_order  INTEGER NOT NULL CHECK (sort_order >= 1),
    parent_id   TEXT
                REFERENCES xml_element(id) ON DELETE CASCADE,
    kind        TEXT NOT NULL CHECK (kind IN ('node', 'text')),
    value       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_xml_element_document ON xml_element(document_id);
CREATE INDEX IF NOT EXISTS idx_xml_element_parent ON xml_element(parent_id);

CREATE TABLE IF NOT EXISTS xml_attribute (
    id         TEXT PRIMARY KEY NOT NULL,
    element_id TEXT NOT NULL
               REFERENCES xml_element(id) ON DELETE CASCADE,
    name       TEXT NOT NULL,
    value      TEXT NOT NULL,
    sort_order INTEGER NOT NULL CHECK (sort_order >= 1)
);

CREATE INDEX IF NOT EXISTS idx_xml_attribute_element ON xml_attribute(element_id);
"#;

/// Create all tables and indexes that do not exist yet.
///
/// Runs inside a transaction; safe to call repeatedly.
pub fn create_schema(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction().map_err(schema_error)?;
    tx.execute_batch(CREATE_SCHEMA).map_err(schema_error)?;
    tx.commit().map_err(schema_error)
}

fn schema_error(err: rusqlite::Error) -> Error {
    Error::Schema {
        reason: err.to_string(),
    }
}
