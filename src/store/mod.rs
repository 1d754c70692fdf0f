//! Patient store
//!
//! A single JSON document on disk holds every patient. The store keeps no
//! state between calls beyond the file path and a write lock.
//!
//! # Operations
//!
//! - `list_all` / `get` / `list_sorted` - read-only
//! - `create` / `update` / `delete` - read-modify-write under the lock

mod errors;
mod patient_store;
mod sorter;
mod table;

pub use errors::{StoreError, StoreResult};
pub use patient_store::{PatientStore, DEFAULT_STORE_FILE};
pub use sorter::{sort_views, SortField, SortOrder};
pub use table::{PatientListing, PatientTable};
