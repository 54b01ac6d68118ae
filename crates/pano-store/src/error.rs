use thiserror::Error;

/// Errors that can occur while reading or writing the board document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the document (or creating its directory) failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file exists but is not a valid board document.
    #[error("malformed document at {path}: {reason}")]
    Malformed { path: String, reason: String },

    /// Serialising the document failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The temp file could not be written or renamed over the target.
    ///
    /// The previous document on disk is left untouched in this case.
    #[error("failed to persist document to {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
