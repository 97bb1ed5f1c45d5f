//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// SMTP send failed.
    #[error("SMTP error: {0}")]
    Smtp(#[from] mailpost_smtp::Error),

    /// Message or attachment construction failed.
    #[error("MIME error: {0}")]
    Mime(#[from] mailpost_mime::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file missing, unreadable, or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Recipient list yielded no usable entries.
    #[error("No valid recipients in {0}")]
    NoRecipients(String),

    /// Mail template file was empty.
    #[error("Mail template {0} is empty")]
    EmptyTemplate(String),

    /// A bulk run finished, but some messages failed to send.
    #[error("Bulk send finished with failures: {sent} sent, {failed} failed, {total} total")]
    BulkIncomplete {
        /// Messages delivered successfully.
        sent: usize,
        /// Messages that failed after all retries.
        failed: usize,
        /// Total recipients processed.
        total: usize,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
