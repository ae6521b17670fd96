//! Error types for itemdeck-core.

/// Errors shared across the itemdeck crates.
///
/// Marked `#[non_exhaustive]` so back-ends can grow new failure modes
/// without breaking downstream matches.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Input failed a format or shape check.
    #[error("Validation error: {message}")]
    Validation {
        /// Field or aspect that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// No record matches the requested identifier.
    #[error("Item not found: {id}")]
    NotFound {
        /// Identifier that was looked up
        id: String,
    },

    /// I/O error (file operations, sockets, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisted data exists but could not be used.
    #[error("Storage error: {message}")]
    Storage {
        /// What the store reported
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

/// Convenience `Result` type alias for itemdeck operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether the error was caused by the caller's input rather
    /// than by the service itself.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Validation { .. } => true,
            Error::NotFound { .. } => true,
            Error::Io(_) => false,
            Error::Serialization(_) => false,
            Error::Storage { .. } => false,
            Error::Config { .. } => false,
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new not-found error.
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        Error::NotFound { id: id.into() }
    }

    /// Creates a new storage error.
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Error::Storage {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
