//! Persistence for the navigation collection.
//!
//! The whole collection lives in one pretty-printed JSON document. See
//! [`store::NavigationStore`] for the locking and write discipline.

pub mod store;

pub use store::{NavigationStore, StoreError};

/// File name of the collection document inside the data directory.
pub const DATA_FILE_NAME: &str = "navigation.json";
