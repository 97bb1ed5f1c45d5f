//! # mailpost-core
//!
//! High-level outbound mail operations for `mailpost`.
//!
//! This crate provides:
//! - Configuration file loading
//! - One-call send operations (plain text and with attachments)
//! - Templated bulk sending from a recipient list
//! - Body template rendering
//!
//! The wire work happens in the companion crates: `mailpost-mime` renders
//! messages, `mailpost-smtp` submits them.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailpost_core::{MessageBuilder, load_smtp_config, send_simple_mail};
//!
//! let cfg = load_smtp_config("email.conf")?;
//! let builder = MessageBuilder::new();
//! send_simple_mail(&cfg, &builder, "bob@example.com", "Hi", "Hello!")?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
mod error;
pub mod service;
pub mod template;

pub use config::{load_smtp_config, parse_smtp_config};
pub use error::{Error, Result};
pub use service::{
    BulkSummary, Recipient, load_mail_template, load_recipients, parse_recipient_line, send_bulk,
    send_mail_with_attachments, send_simple_mail,
};
pub use template::render_template;

// Re-export the building blocks callers combine with these services.
pub use mailpost_mime::{Attachment, Email, MessageBuilder};
pub use mailpost_smtp::SmtpConfig;
