//! Row-level persistence operations
//!
//! [`StoreTxn`] wraps one open `rusqlite` transaction. All methods are pure
//! row operations without business validation; the engine composes them.
//! The wrapper is handed out by [`crate::Store::transaction`], which commits
//! when the closure returns `Ok` and rolls back otherwise.

use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row, Transaction};
use std::str::FromStr;
use xmlstore_core::{
    AttributeId, AttributeRow, DocumentId, DocumentRow, DocumentSummary, ElementId, ElementKind,
    ElementRow, Error, Result,
};

// ============================================================================
// Statements
// ============================================================================

const INSERT_DOCUMENT: &str =
    "INSERT INTO xml_document (id, name, version, encoding) VALUES (?1, ?2, ?3, ?4)";

const INSERT_ELEMENT: &str = "INSERT INTO xml_element (id, document_id, sort_order, parent_id, kind, value) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const INSERT_ATTRIBUTE: &str = "INSERT INTO xml_attribute (id, element_id, name, value, sort_order) \
     VALUES (?1, ?2, ?3, ?4, ?5)";

const SELECT_DOCUMENT: &str =
    "SELECT id, name, version, encoding FROM xml_document WHERE id = ?1";

const SELECT_DOCUMENTS: &str = "SELECT id, name FROM xml_document ORDER BY rowid";

const SELECT_ELEMENT: &str = "SELECT id, document_id, sort_order, parent_id, kind, value \
     FROM xml_element WHERE id = ?1";

const SELECT_ELEMENTS: &str = "SELECT id, document_id, sort_order, parent_id, kind, value \
     FROM xml_element WHERE document_id = ?1 ORDER BY rowid";

const SELECT_ATTRIBUTES: &str = "SELECT id, element_id, name, value, sort_order \
     FROM xml_attribute WHERE element_id = ?1 ORDER BY rowid";

const SELECT_DOCUMENT_ATTRIBUTES: &str = "SELECT a.id, a.element_id, a.name, a.value, a.sort_order \
     FROM xml_attribute a JOIN xml_element e ON e.id = a.element_id \
     WHERE e.document_id = ?1 ORDER BY a.rowid";

const DELETE_DOCUMENT: &str = "DELETE FROM xml_document WHERE id = ?1";

const DELETE_ELEMENT: &str = "DELETE FROM xml_element WHERE id = ?1";

const CLOSE_SIBLING_GAP: &str = "UPDATE xml_element SET sort_order = sort_order - 1 \
     WHERE parent_id = ?1 AND sort_order > ?2";

const UPDATE_ELEMENT_VALUE: &str = "UPDATE xml_element SET value = ?1 WHERE id = ?2";

const UPDATE_ATTRIBUTE_VALUE: &str = "UPDATE xml_attribute SET value = ?1 WHERE id = ?2";

// ============================================================================
// StoreTxn
// ============================================================================

/// Number of rows in each table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowCounts {
    /// Rows in `xml_document`
    pub documents: u64,
    /// Rows in `xml_element`
    pub elements: u64,
    /// Rows in `xml_attribute`
    pub attributes: u64,
}

/// Row operations on one open transaction
pub struct StoreTxn<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> StoreTxn<'conn> {
    pub(crate) fn new(tx: Transaction<'conn>) -> Self {
        Self { tx }
    }

    pub(crate) fn commit(self) -> Result<()> {
        self.tx.commit().map_err(sql_error)
    }

    // ------------------------------------------------------------------------
    // Inserts
    // ------------------------------------------------------------------------

    /// Insert a document header row.
    pub fn insert_document(&self, document: &DocumentRow) -> Result<DocumentId> {
        self.tx
            .prepare_cached(INSERT_DOCUMENT)
            .and_then(|mut stmt| {
                stmt.execute(params![
                    document.id.to_string(),
                    document.name,
                    document.version,
                    document.encoding
                ])
            })
            .map_err(sql_error)?;
        Ok(document.id)
    }

    /// Insert an element row. The parent, if any, must already exist.
    pub fn insert_element(&self, element: &ElementRow) -> Result<ElementId> {
        self.tx
            .prepare_cached(INSERT_ELEMENT)
            .and_then(|mut stmt| {
                stmt.execute(params![
                    element.id.to_string(),
                    element.document_id.to_string(),
                    element.order,
                    element.parent_id.map(|p| p.to_string()),
                    element.kind.as_str(),
                    element.value
                ])
            })
            .map_err(sql_error)?;
        Ok(element.id)
    }

    /// Insert an attribute row. The owning element must already exist.
    pub fn insert_attribute(&self, attribute: &AttributeRow) -> Result<AttributeId> {
        self.tx
            .prepare_cached(INSERT_ATTRIBUTE)
            .and_then(|mut stmt| {
                stmt.execute(params![
                    attribute.id.to_string(),
                    attribute.element_id.to_string(),
                    attribute.name,
                    attribute.value,
                    attribute.order
                ])
            })
            .map_err(sql_error)?;
        Ok(attribute.id)
    }

    // ------------------------------------------------------------------------
    // Fetches
    // ------------------------------------------------------------------------

    /// Point lookup of a document header. `None` means not found.
    pub fn fetch_document(&self, id: &DocumentId) -> Result<Option<DocumentRow>> {
        self.tx
            .query_row(SELECT_DOCUMENT, params![id.to_string()], map_document_row)
            .optional()
            .map_err(sql_error)
    }

    /// Point lookup of an element row. `None` means not found.
    pub fn fetch_element(&self, id: &ElementId) -> Result<Option<ElementRow>> {
        self.tx
            .query_row(SELECT_ELEMENT, params![id.to_string()], map_element_row)
            .optional()
            .map_err(sql_error)
    }

    /// All element rows of a document, in insertion order.
    ///
    /// Callers sort siblings by `order`; insertion order is only
    /// document order for trees written by the encoder.
    pub fn fetch_elements(&self, document_id: &DocumentId) -> Result<Vec<ElementRow>> {
        let mut stmt = self.tx.prepare_cached(SELECT_ELEMENTS).map_err(sql_error)?;
        let rows = stmt
            .query_map(params![document_id.to_string()], map_element_row)
            .map_err(sql_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_error)?;
        Ok(rows)
    }

    /// Attribute rows of one element, unsorted.
    pub fn fetch_attributes(&self, element_id: &ElementId) -> Result<Vec<AttributeRow>> {
        let mut stmt = self.tx.prepare_cached(SELECT_ATTRIBUTES).map_err(sql_error)?;
        let rows = stmt
            .query_map(params![element_id.to_string()], map_attribute_row)
            .map_err(sql_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_error)?;
        Ok(rows)
    }

    /// Attribute rows of every element of a document in one query.
    pub fn fetch_document_attributes(
        &self,
        document_id: &DocumentId,
    ) -> Result<Vec<AttributeRow>> {
        let mut stmt = self
            .tx
            .prepare_cached(SELECT_DOCUMENT_ATTRIBUTES)
            .map_err(sql_error)?;
        let rows = stmt
            .query_map(params![document_id.to_string()], map_attribute_row)
            .map_err(sql_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_error)?;
        Ok(rows)
    }

    /// Identifier and name of every document.
    pub fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        let mut stmt = self.tx.prepare_cached(SELECT_DOCUMENTS).map_err(sql_error)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DocumentSummary {
                    id: parse_column(row, 0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(sql_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_error)?;
        Ok(rows)
    }

    /// Row count of each table.
    pub fn row_counts(&self) -> Result<RowCounts> {
        let count = |table: &str| -> Result<u64> {
            self.tx
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get::<_, i64>(0)
                })
                .map(|n| n.max(0) as u64)
                .map_err(sql_error)
        };
        Ok(RowCounts {
            documents: count(crate::schema::DOCUMENT_TABLE)?,
            elements: count(crate::schema::ELEMENT_TABLE)?,
            attributes: count(crate::schema::ATTRIBUTE_TABLE)?,
        })
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Delete a document; its elements and attributes go with it by cascade.
    ///
    /// Fails with `NoDocumentToDelete` if no row was removed.
    pub fn delete_document(&self, id: &DocumentId) -> Result<()> {
        let affected = self
            .tx
            .execute(DELETE_DOCUMENT, params![id.to_string()])
            .map_err(sql_error)?;
        if affected == 0 {
            return Err(Error::NoDocumentToDelete { id: id.to_string() });
        }
        Ok(())
    }

    /// Delete a non-root element with its subtree and attributes, then
    /// shift the following siblings down so sibling order stays dense.
    pub fn delete_element(&self, id: &ElementId) -> Result<ElementRow> {
        let element = self
            .fetch_element(id)?
            .ok_or_else(|| Error::ElementNotFound { id: id.to_string() })?;
        let parent_id = element
            .parent_id
            .ok_or_else(|| Error::RootElementDeletion { id: id.to_string() })?;

        self.tx
            .execute(DELETE_ELEMENT, params![id.to_string()])
            .map_err(sql_error)?;
        self.tx
            .execute(
                CLOSE_SIBLING_GAP,
                params![parent_id.to_string(), element.order],
            )
            .map_err(sql_error)?;
        Ok(element)
    }

    /// Replace an element's value. Fails with `ElementNotFound` on zero rows.
    pub fn update_element_value(&self, id: &ElementId, value: &str) -> Result<()> {
        let affected = self
            .tx
            .execute(UPDATE_ELEMENT_VALUE, params![value, id.to_string()])
            .map_err(sql_error)?;
        if affected == 0 {
            return Err(Error::ElementNotFound { id: id.to_string() });
        }
        Ok(())
    }

    /// Replace an attribute's value. Fails with `AttributeNotFound` on zero rows.
    pub fn update_attribute_value(&self, id: &AttributeId, value: &str) -> Result<()> {
        let affected = self
            .tx
            .execute(UPDATE_ATTRIBUTE_VALUE, params![value, id.to_string()])
            .map_err(sql_error)?;
        if affected == 0 {
            return Err(Error::AttributeNotFound { id: id.to_string() });
        }
        Ok(())
    }
}

// ============================================================================
// Row mapping
// ============================================================================

fn map_document_row(row: &Row<'_>) -> rusqlite::Result<DocumentRow> {
    Ok(DocumentRow {
        id: parse_column(row, 0)?,
        name: row.get(1)?,
        version: row.get(2)?,
        encoding: row.get(3)?,
    })
}

fn map_element_row(row: &Row<'_>) -> rusqlite::Result<ElementRow> {
    let parent: Option<String> = row.get(3)?;
    let parent_id = match parent {
        Some(text) => Some(parse_text(&text, 3)?),
        None => None,
    };
    Ok(ElementRow {
        id: parse_column(row, 0)?,
        document_id: parse_column(row, 1)?,
        order: row.get(2)?,
        parent_id,
        kind: parse_column::<ElementKind>(row, 4)?,
        value: row.get(5)?,
    })
}

fn map_attribute_row(row: &Row<'_>) -> rusqlite::Result<AttributeRow> {
    Ok(AttributeRow {
        id: parse_column(row, 0)?,
        element_id: parse_column(row, 1)?,
        name: row.get(2)?,
        value: row.get(3)?,
        order: row.get(4)?,
    })
}

fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = Error>,
{
    let text: String = row.get(idx)?;
    parse_text(&text, idx)
}

fn parse_text<T>(text: &str, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = Error>,
{
    text.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Map a backend error into the engine error taxonomy.
///
/// Rows that fail to decode into core types are corruption; everything else
/// surfaces the backend's message unchanged.
pub(crate) fn sql_error(err: rusqlite::Error) -> Error {
    match err {
        rusqlite::Error::FromSqlConversionFailure(idx, _, cause) => {
            Error::corruption(format!("column {}: {}", idx, cause))
        }
        rusqlite::Error::IntegralValueOutOfRange(idx, value) => {
            Error::corruption(format!("column {}: value {} out of range", idx, value))
        }
        other => Error::storage(other),
    }
}
