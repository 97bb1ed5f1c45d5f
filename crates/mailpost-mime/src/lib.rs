//! # mailpost-mime
//!
//! MIME message generation for outbound email.
//!
//! ## Features
//!
//! - **Message generation**: Render complete messages with headers, a
//!   plain-text body, and `multipart/mixed` attachments
//! - **Encoding**: Base64 content encoding, RFC 2047 header encoding,
//!   CRLF newline normalization
//! - **Attachments**: Build attachments from files or raw bytes with
//!   extension-based content-type guessing
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailpost_mime::{Attachment, Email, MessageBuilder};
//!
//! let mail = Email::new("recipient@example.com", "Report", "See attachment.")
//!     .attach(Attachment::from_file("report.pdf")?);
//!
//! let builder = MessageBuilder::new();
//! let raw = builder.build("sender@example.com", &mail);
//! ```
//!
//! This crate only builds messages; parsing received MIME is out of scope.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod attachment;
mod error;
mod message;

pub mod encoding;

pub use attachment::{Attachment, guess_content_type};
pub use error::{Error, Result};
pub use message::{Email, MessageBuilder};
