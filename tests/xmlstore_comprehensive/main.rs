//! Comprehensive xmlstore tests
//!
//! End-to-end behavior through the public `XmlStore` surface, against
//! file-backed databases in temporary directories.
//!
//! ## Modules
//!
//! - `save`: validation order, error messages, row layout
//! - `read`: round trip, ordering, serialization format
//! - `edit`: edit model, value updates, element deletion
//! - `delete`: document deletion and cascade
//! - `search`: node-name and attribute search
//! - `persistence`: reopen, configuration, transactional rollback
//! - `concurrency`: parallel callers on one store

mod test_utils;

mod edit;
mod persistence;
mod save;
mod search;
