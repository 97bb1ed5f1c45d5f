//! Bulk sending from a recipient list and a body template.
//!
//! Each recipient gets an individually rendered body; failures are
//! counted, logged, and reported at the end rather than aborting the run.

use crate::error::{Error, Result};
use crate::template::render_template;
use chrono::Local;
use mailpost_mime::{Email, MessageBuilder};
use mailpost_smtp::{SmtpConfig, send_message};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Timestamp format for the `${time}` template variable.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One entry of the recipient list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// Destination address.
    pub email: String,
    /// Display name used for the `${name}` template variable; may be
    /// empty.
    pub name: String,
}

/// Outcome of a bulk run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkSummary {
    /// Messages delivered successfully.
    pub sent: usize,
    /// Messages that failed after all retries.
    pub failed: usize,
    /// Total recipients processed.
    pub total: usize,
}

impl fmt::Display for BulkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sent, {} failed, {} total",
            self.sent, self.failed, self.total
        )
    }
}

/// Parses one `email,name` line into a [`Recipient`].
///
/// Returns `None` when the line has no comma or an empty email part; the
/// name part may be empty.
#[must_use]
pub fn parse_recipient_line(line: &str) -> Option<Recipient> {
    let (email, name) = line.split_once(',')?;
    let email = email.trim();
    let name = name.trim();

    if email.is_empty() {
        return None;
    }

    Some(Recipient {
        email: email.to_string(),
        name: name.to_string(),
    })
}

/// Reads the recipient list file.
///
/// Blank lines and `#` comments are skipped silently; malformed lines
/// are logged and skipped.
///
/// # Errors
///
/// Returns an error when the file cannot be read or no usable
/// recipients remain.
pub fn load_recipients(path: impl AsRef<Path>) -> Result<Vec<Recipient>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let mut recipients = Vec::new();
    for (number, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_recipient_line(trimmed) {
            Some(recipient) => recipients.push(recipient),
            None => {
                tracing::warn!(
                    line = number + 1,
                    content = trimmed,
                    "Skipping malformed recipient line"
                );
            }
        }
    }

    if recipients.is_empty() {
        return Err(Error::NoRecipients(path.display().to_string()));
    }

    Ok(recipients)
}

/// Reads the whole mail body template.
///
/// # Errors
///
/// Returns an error when the file cannot be read or is empty.
pub fn load_mail_template(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    if contents.is_empty() {
        return Err(Error::EmptyTemplate(path.display().to_string()));
    }

    Ok(contents)
}

/// Sends one templated message per recipient.
///
/// Template variables per message: `${name}` (recipient name, possibly
/// empty), `${index}` (1-based position), `${time}` (local timestamp).
/// A failing recipient does not stop the run.
///
/// # Errors
///
/// Returns an error when the input files are unusable, or
/// [`Error::BulkIncomplete`] when the run finished but some messages
/// failed.
pub fn send_bulk(
    cfg: &SmtpConfig,
    builder: &MessageBuilder,
    recipients_path: impl AsRef<Path>,
    template_path: impl AsRef<Path>,
) -> Result<BulkSummary> {
    let recipients = load_recipients(recipients_path)?;
    let template = load_mail_template(template_path)?;

    tracing::info!(total = recipients.len(), "Starting bulk send");

    let mut sent = 0;
    let mut failed = 0;

    for (position, recipient) in recipients.iter().enumerate() {
        let index = position + 1;

        let mut vars = HashMap::new();
        vars.insert("name".to_string(), recipient.name.clone());
        vars.insert("index".to_string(), index.to_string());
        vars.insert(
            "time".to_string(),
            Local::now().format(TIME_FORMAT).to_string(),
        );

        let body = render_template(&template, &vars);
        let mail = Email::new(
            recipient.email.clone(),
            format!("Bulk message #{index}"),
            body,
        );
        let raw = builder.build(&cfg.from_address, &mail);

        match send_message(cfg, &raw) {
            Ok(()) => {
                sent += 1;
                tracing::info!(index, to = %recipient.email, "Bulk message sent");
            }
            Err(e) => {
                failed += 1;
                tracing::error!(index, to = %recipient.email, error = %e, "Bulk message failed");
            }
        }
    }

    let summary = BulkSummary {
        sent,
        failed,
        total: recipients.len(),
    };
    tracing::info!(%summary, "Bulk send finished");

    if failed > 0 {
        return Err(Error::BulkIncomplete {
            sent,
            failed,
            total: summary.total,
        });
    }

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_email_and_name() {
        let r = parse_recipient_line("bob@y.com, Bob").unwrap();
        assert_eq!(r.email, "bob@y.com");
        assert_eq!(r.name, "Bob");
    }

    #[test]
    fn name_may_be_empty() {
        let r = parse_recipient_line("bob@y.com,").unwrap();
        assert_eq!(r.email, "bob@y.com");
        assert_eq!(r.name, "");
    }

    #[test]
    fn missing_comma_is_rejected() {
        assert!(parse_recipient_line("bob@y.com").is_none());
    }

    #[test]
    fn empty_email_is_rejected() {
        assert!(parse_recipient_line(" , Bob").is_none());
    }

    #[test]
    fn loads_recipients_skipping_noise() {
        let path = std::env::temp_dir().join("mailpost_recipients_test.txt");
        fs::write(
            &path,
            "# heading\n\nbob@y.com, Bob\nmalformed line\nalice@y.com, Alice\n",
        )
        .unwrap();

        let recipients = load_recipients(&path).unwrap();
        assert_eq!(recipients.len(), 2);
        assert_eq!(recipients[0].email, "bob@y.com");
        assert_eq!(recipients[1].name, "Alice");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn empty_recipient_list_is_error() {
        let path = std::env::temp_dir().join("mailpost_recipients_empty_test.txt");
        fs::write(&path, "# only comments\n\n").unwrap();

        assert!(matches!(
            load_recipients(&path),
            Err(Error::NoRecipients(_))
        ));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn empty_template_is_error() {
        let path = std::env::temp_dir().join("mailpost_template_empty_test.txt");
        fs::write(&path, "").unwrap();

        assert!(matches!(
            load_mail_template(&path),
            Err(Error::EmptyTemplate(_))
        ));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn summary_display() {
        let summary = BulkSummary {
            sent: 2,
            failed: 1,
            total: 3,
        };
        assert_eq!(summary.to_string(), "2 sent, 1 failed, 3 total");
    }
}
