//! Engine for xmlstore
//!
//! This crate turns XML text into rows and rows back into trees:
//! - encoder: parse and flatten a document into ordered adjacency-list rows
//! - decoder: index a document's rows and rebuild subtrees, serialize as XML
//! - database: `XmlDatabase`, configuration and the operation surface
//!
//! The engine never issues SQL itself; all persistence goes through
//! `xmlstore-storage`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod database;
pub mod decoder;
pub mod encoder;
mod syntax;

pub use database::{XmlDatabase, XmlStoreConfig, CONFIG_FILE_NAME};
pub use decoder::{serialize_document, serialize_fragment, RowSet};
pub use encoder::{encode, EncodedDocument};
