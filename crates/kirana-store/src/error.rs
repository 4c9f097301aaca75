//! # Storage Error Types
//!
//! Failures crossing the persistence boundary. Domain rejections from
//! kirana-core pass through transparently so the presentation layer sees
//! one error type with the core's messages intact.

use thiserror::Error;

use kirana_core::CoreError;

/// Storage and engine errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a table file failed.
    #[error("storage I/O failed for table {table}: {source}")]
    Io {
        table: String,
        #[source]
        source: std::io::Error,
    },

    /// A table file exists but does not decode as its expected shape.
    #[error("table {table} is corrupt: {source}")]
    Corrupt {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    /// A backup document could not be read or written.
    #[error("backup file {path}: {message}")]
    Backup { path: String, message: String },

    /// A domain rule rejected the operation; state is unchanged.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
