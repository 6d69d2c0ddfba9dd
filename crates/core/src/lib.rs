//! Core types for xmlstore
//!
//! This crate defines the foundational types shared by every layer:
//! - Error / Result: the uniform success/failure outcome of every operation
//! - DocumentId, ElementId, AttributeId: UUID-backed row identifiers
//! - ElementKind: Node/Text discriminator for element rows
//! - Row types: DocumentRow, ElementRow, AttributeRow, DocumentSummary
//! - Edit model: EditDocument, ElementModel, AttributeModel
//! - Limits: traversal bounds enforced by encoder and decoder

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod model;
pub mod rows;
pub mod types;

pub use error::{Error, Result};
pub use limits::{Limits, DEFAULT_MAX_NESTING_DEPTH};
pub use model::{AttributeModel, EditDocument, ElementModel, Subtree};
pub use rows::{AttributeRow, DocumentRow, DocumentSummary, ElementRow};
pub use types::{AttributeId, DocumentId, ElementId, ElementKind};
