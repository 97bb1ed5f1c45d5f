//! # mailpost-smtp
//!
//! A blocking SMTP submission client.
//!
//! ## Features
//!
//! - **Type-state connection management**: Compile-time enforcement of
//!   valid SMTP state transitions
//! - **Submission protocol**: greeting, EHLO, AUTH LOGIN, MAIL FROM,
//!   RCPT TO, DATA with dot termination, best-effort QUIT
//! - **Bounded I/O**: per-socket read/write timeouts so no step can block
//!   forever
//! - **Retry policy**: whole attempts re-run up to a configured count
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailpost_smtp::{SmtpConfig, send_message};
//!
//! let cfg = SmtpConfig {
//!     host: "127.0.0.1".into(),
//!     from_address: "sender@example.com".into(),
//!     ..SmtpConfig::default()
//! };
//!
//! let raw = "From: sender@example.com\r\nTo: recipient@example.com\r\n\
//!            Subject: Test\r\n\r\nHello, World!";
//! send_message(&cfg, raw)?;
//! ```
//!
//! ## Connection States
//!
//! The library uses the type-state pattern to enforce valid SMTP
//! operations:
//!
//! ```text
//! ┌──────────────┐
//! │  Connected   │ ─── auth_login() ───→ Authenticated
//! └──────────────┘
//!        │                                     │
//!        └────────────── mail_from() ──────────┘
//!                            │
//!                            ↓
//!              MailTransaction → RecipientAdded → DataMode
//! ```
//!
//! Each send attempt owns its connection; the socket is released when the
//! attempt ends, however it ends. TLS is not offered: this is a plaintext
//! submission client, not a full mail user agent.
//!
//! ## Modules
//!
//! - [`command`]: SMTP command builders
//! - [`connection`]: Connection management and type-state client
//! - [`types`]: Core SMTP types (config, replies)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod connection;
mod error;
mod send;
pub mod types;

pub use connection::{
    Authenticated, Client, Connected, Connection, DataMode, MailTransaction, RecipientAdded,
};
pub use error::{Error, Result};
pub use send::{extract_recipient, send_message};
pub use types::{Reply, SmtpConfig};
