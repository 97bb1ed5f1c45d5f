//! High-level mail services.

mod bulk;
mod mail;

pub use bulk::{
    BulkSummary, Recipient, load_mail_template, load_recipients, parse_recipient_line, send_bulk,
};
pub use mail::{send_mail_with_attachments, send_simple_mail};
