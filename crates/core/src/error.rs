//! Error types for xmlstore
//!
//! Every operation returns [`Result<T>`], a success value or an [`Error`]
//! whose `Display` text is the human-readable message handed to callers.
//! Errors are:
//! - **Categorized**: validation, not-found, or infrastructure
//! - **Serializable**: can be sent to a client as-is
//! - **Lossless**: infrastructure errors keep the underlying message

use serde::{Deserialize, Serialize};
use std::io;

/// Result type alias for xmlstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by xmlstore operations.
///
/// # Categories
///
/// | Category | Variants | Detected |
/// |----------|----------|----------|
/// | Validation | `EmptyDocumentName`, `InvalidXml`, `InvalidDeclaration`, `NestingTooDeep`, `InvalidId`, `RootElementDeletion` | Before any row is written |
/// | Not Found | `DocumentNotFound`, `NoDocumentToDelete`, `ElementNotFound`, `AttributeNotFound` | Absent row or zero-row update |
/// | Infrastructure | `Schema`, `Storage`, `Corruption`, `Serialization`, `Config`, `Io` | Backend or invariant failure |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Validation ====================
    /// Document name was empty
    #[error("Document name must not be empty!")]
    EmptyDocumentName,

    /// Input is not well-formed XML
    #[error("XML string is invalid!")]
    InvalidXml {
        /// Parser detail, kept for logs
        reason: String,
    },

    /// Missing XML declaration, or declaration without version/encoding
    #[error("Check document declaration (Version, Encoding)")]
    InvalidDeclaration,

    /// Element nesting deeper than the configured limit
    #[error("XML nesting exceeds the maximum depth of {max}")]
    NestingTooDeep {
        /// Configured maximum depth
        max: usize,
    },

    /// Identifier text is not a valid UUID
    #[error("Invalid identifier: {value}")]
    InvalidId {
        /// The rejected text
        value: String,
    },

    /// Attempt to delete the root element of a document
    #[error("Root element can not be deleted, delete the whole document instead!")]
    RootElementDeletion {
        /// Root element identifier
        id: String,
    },

    // ==================== Not Found ====================
    /// Document to read, edit or search does not exist
    #[error("Document with given Id does not exist!")]
    DocumentNotFound {
        /// Requested document identifier
        id: String,
    },

    /// Document to delete does not exist
    #[error("Document with this Id does not exist!")]
    NoDocumentToDelete {
        /// Requested document identifier
        id: String,
    },

    /// Element does not exist
    #[error("Element with this Id does not exist!")]
    ElementNotFound {
        /// Requested element identifier
        id: String,
    },

    /// Attribute does not exist
    #[error("Attribute with this Id does not exist!")]
    AttributeNotFound {
        /// Requested attribute identifier
        id: String,
    },

    // ==================== Infrastructure ====================
    /// Schema creation failed
    #[error("Error occurred while executing script. Details: {reason}")]
    Schema {
        /// Backend message
        reason: String,
    },

    /// Backend failure (connection, constraint violation, query error)
    #[error("{reason}")]
    Storage {
        /// Backend message
        reason: String,
    },

    /// Persisted rows violate a structural invariant
    #[error("Data corruption: {reason}")]
    Corruption {
        /// What was violated
        reason: String,
    },

    /// Writing XML output failed
    #[error("Serialization error: {reason}")]
    Serialization {
        /// Writer message
        reason: String,
    },

    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {reason}")]
    Config {
        /// What was wrong
        reason: String,
    },

    /// File system error
    #[error("I/O error: {reason}")]
    Io {
        /// OS message
        reason: String,
    },
}

impl Error {
    /// Build a backend error from any displayable cause.
    pub fn storage(cause: impl std::fmt::Display) -> Self {
        Error::Storage {
            reason: cause.to_string(),
        }
    }

    /// Build a corruption error.
    pub fn corruption(reason: impl Into<String>) -> Self {
        Error::Corruption {
            reason: reason.into(),
        }
    }

    /// Build an invalid-XML error from a parser cause.
    pub fn invalid_xml(cause: impl std::fmt::Display) -> Self {
        Error::InvalidXml {
            reason: cause.to_string(),
        }
    }

    /// True for errors detected before touching the database.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::EmptyDocumentName
                | Error::InvalidXml { .. }
                | Error::InvalidDeclaration
                | Error::NestingTooDeep { .. }
                | Error::InvalidId { .. }
                | Error::RootElementDeletion { .. }
        )
    }

    /// True when the addressed document, element or attribute has no row.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::DocumentNotFound { .. }
                | Error::NoDocumentToDelete { .. }
                | Error::ElementNotFound { .. }
                | Error::AttributeNotFound { .. }
        )
    }

    /// True for backend, invariant and environment failures.
    pub fn is_infrastructure(&self) -> bool {
        !self.is_validation() && !self.is_not_found()
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io {
            reason: e.to_string(),
        }
    }
}
