//! Error types for the zone backup pipeline
//!
//! Every stage reports through the same [`Error`] enum. Nothing is retried
//! locally: the first error aborts the invocation.

use thiserror::Error;

/// Result type alias for zone backup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the zone backup pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Trigger payload could not be decoded (base64 or gzip)
    #[error("Decode error: {0}")]
    Decode(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local I/O errors (directory object store)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Zone or health check does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A field needed to describe the processed zone is absent
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Read API failure (including a failed page while paginating)
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Object storage rejected a write
    #[error("Object store error ({store}): {message}")]
    ObjectStore {
        /// Store name
        store: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a read API error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an object store error
    pub fn object_store(store: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ObjectStore {
            store: store.into(),
            message: message.into(),
        }
    }
}
