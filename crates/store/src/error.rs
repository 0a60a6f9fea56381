//! Error types for the store crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or growing the exclusion store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file exists but could not be read
    #[error("Failed to read exclusion store {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file could not be created or appended to
    #[error("Failed to write exclusion store {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A name normalized to nothing
    #[error("Invalid nation name: {0:?}")]
    InvalidName(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
