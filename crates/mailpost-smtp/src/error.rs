//! Error types for SMTP operations.

use std::io;

/// Result type alias for SMTP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// SMTP error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Could not resolve or connect to the server.
    #[error("Cannot connect to SMTP server {host}:{port}")]
    Connect {
        /// Server host name or address.
        host: String,
        /// Server port.
        port: u16,
    },

    /// I/O error while sending or receiving, including timeouts.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The peer closed the connection mid-exchange.
    #[error("Connection closed by peer")]
    PeerClosed,

    /// Server reply was outside the expected code class.
    #[error("SMTP error {code}: {text}")]
    UnexpectedReply {
        /// Three-digit reply code (0 if unparsable).
        code: u16,
        /// Raw server text accompanying the reply.
        text: String,
    },

    /// No recipient address could be extracted from the message.
    #[error("No recipient address found in message (missing To header)")]
    MissingRecipient,

    /// All configured send attempts failed.
    #[error("Giving up after {attempts} send attempts; last error: {last}")]
    Exhausted {
        /// Number of attempts made.
        attempts: u32,
        /// Message of the final attempt's error.
        last: String,
    },
}

impl Error {
    /// Creates an error from a reply that fell outside the expected class.
    #[must_use]
    pub fn unexpected_reply(code: u16, text: impl Into<String>) -> Self {
        Self::UnexpectedReply {
            code,
            text: text.into(),
        }
    }

    /// Returns true if this failure was an I/O timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Io(e) if e.kind() == io::ErrorKind::TimedOut
                || e.kind() == io::ErrorKind::WouldBlock
        )
    }
}
