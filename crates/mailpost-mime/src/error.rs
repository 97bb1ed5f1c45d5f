//! Error types for message generation.

use std::io;

/// Result type alias for MIME operations.
pub type Result<T> = std::result::Result<T, Error>;

/// MIME error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read an attachment file.
    #[error("Cannot read attachment file {path}: {source}")]
    AttachmentRead {
        /// Path that could not be read.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },
}
