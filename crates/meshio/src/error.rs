//! Error types for mesh read/write operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for mesh read/write operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors surfaced by the STL reader and the OBJ writer.
///
/// Every failure is terminal for the whole conversion: there are no
/// retries and no partial-success mode. Output produced before a failure
/// must be treated as unusable.
#[derive(Debug, Error)]
pub enum IoError {
    /// Input ended before the declared geometry was fully read.
    #[error("unexpected end of stream at offset {position}")]
    UnexpectedEndOfStream {
        /// Byte offset of the field that could not be read in full.
        position: u64,
    },

    /// Output file could not be created for writing.
    #[error("cannot open output target {path:?}: {source}")]
    InvalidOutputTarget {
        /// Path that could not be created.
        path: PathBuf,
        /// Underlying create/open failure.
        source: std::io::Error,
    },

    /// Any other I/O failure on the underlying stream or sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
