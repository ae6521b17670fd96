//! Error types for itemdeck-storage

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in a store.
///
/// A missing data file is not an error (it is an empty store); every variant
/// here means the data could not be read or written.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    /// Reading or writing the data file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The data file exists but does not hold a valid dataset.
    #[error("corrupt dataset in {}: {message}", path.display())]
    Corrupt {
        /// File that failed to parse
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Encoding the dataset failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Build an I/O error tagged with the path being accessed.
    pub fn io_with_path(source: std::io::Error, path: &Path) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Build a corrupt-dataset error.
    pub fn corrupt(path: &Path, message: impl Into<String>) -> Self {
        StoreError::Corrupt {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

impl From<StoreError> for itemdeck_core::Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Io { source, .. } => itemdeck_core::Error::Io(source),
            StoreError::Serialization(e) => itemdeck_core::Error::Serialization(e),
            other => itemdeck_core::Error::storage(other.to_string()),
        }
    }
}
