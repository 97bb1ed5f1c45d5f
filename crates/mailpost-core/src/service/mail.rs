//! Single-message send operations.
//!
//! Thin glue over the builder and the SMTP client: render, submit with
//! retry, log the outcome.

use crate::error::Result;
use mailpost_mime::{Attachment, Email, MessageBuilder};
use mailpost_smtp::{SmtpConfig, send_message};
use std::path::Path;

/// Builds and sends a plain-text mail.
///
/// # Errors
///
/// Returns an error when the send fails after all configured attempts.
pub fn send_simple_mail(
    cfg: &SmtpConfig,
    builder: &MessageBuilder,
    to: impl Into<String>,
    subject: impl Into<String>,
    body: impl Into<String>,
) -> Result<()> {
    let mail = Email::new(to, subject, body);
    send_built_mail(cfg, builder, &mail)
}

/// Builds and sends a mail with file attachments.
///
/// All attachments are read and encoded before any network activity, so
/// an unreadable file aborts the operation without touching the server.
///
/// # Errors
///
/// Returns an error when an attachment cannot be read or the send fails
/// after all configured attempts.
pub fn send_mail_with_attachments(
    cfg: &SmtpConfig,
    builder: &MessageBuilder,
    to: impl Into<String>,
    subject: impl Into<String>,
    body: impl Into<String>,
    attachment_paths: &[impl AsRef<Path>],
) -> Result<()> {
    let mut mail = Email::new(to, subject, body);
    for path in attachment_paths {
        mail = mail.attach(Attachment::from_file(path)?);
    }

    send_built_mail(cfg, builder, &mail)
}

fn send_built_mail(cfg: &SmtpConfig, builder: &MessageBuilder, mail: &Email) -> Result<()> {
    let raw = builder.build(&cfg.from_address, mail);

    match send_message(cfg, &raw) {
        Ok(()) => {
            tracing::info!(to = %mail.to, subject = %mail.subject, "Mail sent");
            Ok(())
        }
        Err(e) => {
            tracing::error!(to = %mail.to, error = %e, "Mail send failed");
            Err(e.into())
        }
    }
}
