//! Configuration file loading.
//!
//! Reads the line-oriented `key = value` format the deployment tooling
//! writes (historically `email.conf` next to the binary). Unknown keys are
//! ignored so newer files keep working with older builds.

use crate::error::{Error, Result};
use mailpost_smtp::SmtpConfig;
use std::fs;
use std::path::Path;

/// Loads an [`SmtpConfig`] from a configuration file.
///
/// Recognized keys: `server_ip`, `port`, `from_address`, `username`,
/// `password`, `use_auth`, `io_timeout_ms`, `max_retry`. Blank lines and
/// `#` comments are skipped.
///
/// # Errors
///
/// Returns [`Error::Config`] when the file cannot be read, a numeric
/// value does not parse, a required key is missing, or authentication is
/// enabled without credentials.
pub fn load_smtp_config(path: impl AsRef<Path>) -> Result<SmtpConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Cannot open configuration file {}: {e}",
            path.display()
        ))
    })?;

    parse_smtp_config(&contents)
}

/// Parses configuration text into an [`SmtpConfig`].
///
/// # Errors
///
/// Same conditions as [`load_smtp_config`], minus file access.
pub fn parse_smtp_config(contents: &str) -> Result<SmtpConfig> {
    let mut cfg = SmtpConfig::default();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "server_ip" => cfg.host = value.to_string(),
            "port" => {
                cfg.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {value}")))?;
            }
            "from_address" => cfg.from_address = value.to_string(),
            "username" => cfg.username = value.to_string(),
            "password" => cfg.password = value.to_string(),
            "use_auth" => {
                // 1/true/yes enable; anything else disables.
                cfg.use_auth = matches!(
                    value.to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes"
                );
            }
            "io_timeout_ms" => {
                let ms: i64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid io_timeout_ms value: {value}"))
                })?;
                // Negative means "do not set".
                cfg.io_timeout_ms = u64::try_from(ms.max(0)).unwrap_or_default();
            }
            "max_retry" => {
                let retries: i64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid max_retry value: {value}"))
                })?;
                // At least one attempt.
                cfg.max_retry = u32::try_from(retries.max(1)).unwrap_or(u32::MAX);
            }
            _ => {}
        }
    }

    if cfg.host.is_empty() {
        return Err(Error::Config("Missing server_ip".to_string()));
    }
    if cfg.from_address.is_empty() {
        return Err(Error::Config("Missing from_address".to_string()));
    }
    if cfg.use_auth && (cfg.username.is_empty() || cfg.password.is_empty()) {
        return Err(Error::Config(
            "use_auth is enabled but username or password is empty".to_string(),
        ));
    }

    Ok(cfg)
}
