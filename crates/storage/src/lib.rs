//! Storage layer for xmlstore
//!
//! This crate is the only component that talks to the database:
//! - schema: the three-table adjacency-list schema (documents, elements, attributes)
//! - Store: connection ownership, schema initialization, scoped transactions
//! - StoreTxn: row-level inserts, fetches, updates and deletes inside one transaction
//!
//! Every logical operation runs in exactly one transaction. A transaction
//! that is not explicitly committed is rolled back when dropped, so an
//! error anywhere inside an operation leaves no partial writes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod gateway;
pub mod schema;
pub mod store;

pub use gateway::{RowCounts, StoreTxn};
pub use store::{Store, StoreLocation};
