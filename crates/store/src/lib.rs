//! # Store Crate
//!
//! Identifier types and the persisted exclusion cache.
//!
//! ## Main Components
//!
//! - **types**: `NationName` (normalized identifier) and `ExclusionSet`
//! - **parser**: the newline-delimited file format
//! - **exclusion**: `ExclusionStore`, the append-only file handle
//! - **error**: error types for store access
//!
//! ## Example Usage
//!
//! ```ignore
//! use store::{ExclusionStore, NationName};
//!
//! let store = ExclusionStore::new("exclusions.txt");
//! let excluded = store.load()?;
//!
//! if !excluded.contains(&NationName::new("Testlandia")?) {
//!     // check it
//! }
//!
//! store.append(&[NationName::new("Testlandia")?])?;
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod exclusion;

pub use error::{Result, StoreError};
pub use exclusion::{DEFAULT_STORE_FILE, ExclusionStore};
pub use types::{ExclusionSet, NationName, normalize_name};
