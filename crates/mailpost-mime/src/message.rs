//! Outbound message rendering.
//!
//! [`MessageBuilder::build`] turns a logical [`Email`] plus a sender address
//! into the complete raw text handed to the SMTP DATA phase: header block,
//! then either a flat `text/plain` body or a `multipart/mixed` body with
//! Base64 attachment parts.

use crate::attachment::Attachment;
use crate::encoding::{BASE64_LINE_WIDTH, encode_header_word, wrap_base64_lines};
use chrono::Local;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

/// `Date:` header format.
///
/// Deliberately not the RFC 5322 date format: downstream log-correlation
/// tooling matches on this exact local-time shape.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A logical email to be rendered and sent.
#[derive(Debug, Clone, Default)]
pub struct Email {
    /// Recipient address (bare or `Name <addr>` form).
    pub to: String,
    /// Subject line; non-ASCII text is header-word encoded at build time.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Attachments, in the order they should appear as MIME parts.
    pub attachments: Vec<Attachment>,
}

impl Email {
    /// Creates a new email without attachments.
    #[must_use]
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            attachments: Vec::new(),
        }
    }

    /// Appends an attachment, preserving insertion order.
    #[must_use]
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// Renders [`Email`] values into raw RFC 5322-style message text.
///
/// Holds the multipart boundary counter, so boundary tokens are unique
/// across sequential builds from the same builder instance. Boundary
/// collision with body or attachment content is not scanned for.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    boundary_counter: AtomicU64,
}

impl MessageBuilder {
    /// Creates a builder with a fresh boundary counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders a complete message.
    ///
    /// Headers are emitted in a fixed order (`From`, `To`, `Subject`,
    /// `Date`), followed by either a flat `text/plain` body or a
    /// `multipart/mixed` structure when attachments are present.
    #[must_use]
    pub fn build(&self, from_address: &str, mail: &Email) -> String {
        let mut out = String::new();

        let _ = write!(out, "From: {from_address}\r\n");
        let _ = write!(out, "To: {}\r\n", mail.to);
        let _ = write!(out, "Subject: {}\r\n", encode_header_word(&mail.subject));
        let _ = write!(out, "Date: {}\r\n", Local::now().format(DATE_FORMAT));

        if mail.attachments.is_empty() {
            out.push_str("MIME-Version: 1.0\r\n");
            out.push_str("Content-Type: text/plain; charset=\"UTF-8\"\r\n");
            // 8bit: the UTF-8 body is transmitted as-is.
            out.push_str("Content-Transfer-Encoding: 8bit\r\n");
            out.push_str("\r\n");
            out.push_str(&mail.body);
            return out;
        }

        let boundary = self.next_boundary();

        out.push_str("MIME-Version: 1.0\r\n");
        let _ = write!(out, "Content-Type: multipart/mixed; boundary=\"{boundary}\"\r\n");
        out.push_str("\r\n");

        out.push_str("This is a multi-part message in MIME format.\r\n");
        out.push_str("\r\n");

        let _ = write!(out, "--{boundary}\r\n");
        out.push_str("Content-Type: text/plain; charset=\"UTF-8\"\r\n");
        out.push_str("Content-Transfer-Encoding: 8bit\r\n");
        out.push_str("\r\n");
        let _ = write!(out, "{}\r\n", mail.body);

        for attachment in &mail.attachments {
            let _ = write!(out, "--{boundary}\r\n");
            let _ = write!(
                out,
                "Content-Type: {}; name=\"{}\"\r\n",
                attachment.content_type, attachment.file_name
            );
            out.push_str("Content-Transfer-Encoding: base64\r\n");
            let _ = write!(
                out,
                "Content-Disposition: attachment; filename=\"{}\"\r\n",
                attachment.file_name
            );
            out.push_str("\r\n");

            out.push_str(&wrap_base64_lines(
                &attachment.base64_content,
                BASE64_LINE_WIDTH,
            ));
            out.push_str("\r\n");
        }

        let _ = write!(out, "--{boundary}--\r\n");

        out
    }

    fn next_boundary(&self) -> String {
        let n = self.boundary_counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("----=MailpostBoundary_{n}")
    }
}
