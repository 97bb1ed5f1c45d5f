//! Whole-message submission: one attempt plus the retry wrapper.

use crate::connection::{Client, Connection};
use crate::error::{Error, Result};
use crate::types::SmtpConfig;

/// Hostname announced in EHLO.
const CLIENT_HOSTNAME: &str = "localhost";

/// Sends a rendered message, retrying failed attempts.
///
/// Runs the full connect-and-submit sequence up to `max_retry` times
/// (at least once), stopping at the first success. There is no backoff
/// and no distinction between retryable and fatal failures; every error
/// aborts its attempt and the next attempt starts from a fresh
/// connection.
///
/// # Errors
///
/// When every attempt fails and more than one was configured, returns
/// [`Error::Exhausted`] naming the attempt count and the last error;
/// with a single configured attempt the attempt's own error is returned
/// unchanged.
pub fn send_message(cfg: &SmtpConfig, raw_message: &str) -> Result<()> {
    let attempts = cfg.max_retry.max(1);

    let mut last_error = match send_once(cfg, raw_message) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };
    tracing::warn!(attempt = 1, error = %last_error, "Send attempt failed");

    for attempt in 2..=attempts {
        match send_once(cfg, raw_message) {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::warn!(attempt, error = %e, "Send attempt failed");
                last_error = e;
            }
        }
    }

    if attempts > 1 {
        Err(Error::Exhausted {
            attempts,
            last: last_error.to_string(),
        })
    } else {
        Err(last_error)
    }
}

/// Runs a single submission attempt over its own connection.
///
/// The connection is scoped to this function: it is dropped, and the
/// socket closed, on every exit path. QUIT failures after the server has
/// accepted the message are logged and ignored.
fn send_once(cfg: &SmtpConfig, raw_message: &str) -> Result<()> {
    let conn = Connection::connect(&cfg.host, cfg.port, cfg.io_timeout_ms)?;
    let client = Client::greet(conn)?;
    let client = client.ehlo(CLIENT_HOSTNAME)?;

    // mail_from is available on both sides of the branch, so the two
    // arms converge on the same transaction state.
    let transaction = if cfg.use_auth {
        client
            .auth_login(&cfg.username, &cfg.password)?
            .mail_from(&cfg.from_address)?
    } else {
        client.mail_from(&cfg.from_address)?
    };

    let recipient = extract_recipient(raw_message)?;
    let client = transaction.rcpt_to(&recipient)?;
    let client = client.data()?;
    let client = client.send_payload(raw_message)?;

    if let Err(e) = client.quit() {
        tracing::debug!(error = %e, "QUIT failed after message was accepted");
    }

    Ok(())
}

/// Extracts the envelope recipient from a rendered message.
///
/// Scans for the first literal `To:`, takes the rest of that line, and
/// prefers an angle-bracket-delimited address when one is present. This
/// is a substring scan, not a header grammar; messages rendered by the
/// builder always satisfy it.
///
/// # Errors
///
/// Returns [`Error::MissingRecipient`] when no `To:` is found or the
/// line holds nothing usable.
pub fn extract_recipient(raw_message: &str) -> Result<String> {
    let pos = raw_message.find("To:").ok_or(Error::MissingRecipient)?;

    let rest = raw_message[pos + 3..].trim_start_matches([' ', '\t']);
    let line = rest.split('\n').next().unwrap_or("");

    let addr = match (line.find('<'), line.find('>')) {
        (Some(lt), Some(gt)) if gt > lt + 1 => &line[lt + 1..gt],
        _ => line,
    };

    let addr = addr
        .trim_start_matches([' ', '\t'])
        .trim_end_matches([' ', '\t', '\r']);

    if addr.is_empty() {
        return Err(Error::MissingRecipient);
    }

    Ok(addr.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn extracts_angle_bracket_address() {
        let raw = "From: a@x.com\r\nTo: Bob <bob@y.com>\r\nSubject: Hi\r\n\r\nBody";
        assert_eq!(extract_recipient(raw).unwrap(), "bob@y.com");
    }

    #[test]
    fn extracts_bare_address() {
        let raw = "From: a@x.com\r\nTo: bob@y.com\r\nSubject: Hi\r\n\r\nBody";
        assert_eq!(extract_recipient(raw).unwrap(), "bob@y.com");
    }

    #[test]
    fn trims_whitespace_and_carriage_return() {
        let raw = "To: \t bob@y.com \r\nSubject: Hi\r\n";
        assert_eq!(extract_recipient(raw).unwrap(), "bob@y.com");
    }

    #[test]
    fn missing_to_header_is_error() {
        let raw = "From: a@x.com\r\nSubject: Hi\r\n\r\nBody";
        assert!(matches!(
            extract_recipient(raw),
            Err(Error::MissingRecipient)
        ));
    }

    #[test]
    fn empty_to_line_is_error() {
        let raw = "From: a@x.com\r\nTo: \r\nSubject: Hi\r\n";
        assert!(matches!(
            extract_recipient(raw),
            Err(Error::MissingRecipient)
        ));
    }

    #[test]
    fn empty_angle_brackets_fall_back_to_line() {
        // "<>" holds nothing, so the raw line (brackets included) wins.
        let raw = "To: <>\r\n";
        assert_eq!(extract_recipient(raw).unwrap(), "<>");
    }

    #[test]
    fn to_at_end_without_newline() {
        let raw = "stuff\r\nTo: bob@y.com";
        assert_eq!(extract_recipient(raw).unwrap(), "bob@y.com");
    }
}
