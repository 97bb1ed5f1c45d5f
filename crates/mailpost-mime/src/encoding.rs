//! Wire encoding utilities.
//!
//! Base64 content encoding, RFC 2047 header encoding, and CRLF newline
//! normalization for SMTP payloads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Maximum line length for Base64 content in message bodies.
pub const BASE64_LINE_WIDTH: usize = 76;

/// Encodes data as Base64 (RFC 4648 standard alphabet, `=` padding).
///
/// Produces a single unwrapped line; wrapping for message bodies is done
/// separately by [`wrap_base64_lines`].
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Encodes a header value using the RFC 2047 "B" encoding when needed.
///
/// Pure-ASCII input is returned unchanged. Anything containing a byte
/// >= 0x80 becomes `=?utf-8?B?<base64>?=`.
#[must_use]
pub fn encode_header_word(text: &str) -> String {
    if text.bytes().all(|b| b < 0x80) {
        return text.to_string();
    }

    format!("=?utf-8?B?{}?=", encode_base64(text.as_bytes()))
}

/// Rewrites every bare `\n`, bare `\r`, and `\r\n` pair into `\r\n`.
///
/// SMTP requires CRLF line endings in the wire payload; already-CRLF pairs
/// are preserved, not duplicated.
#[must_use]
pub fn normalize_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                out.push_str("\r\n");
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\n' => out.push_str("\r\n"),
            _ => out.push(ch),
        }
    }

    out
}

/// Splits a Base64 string into lines of at most `width` characters, each
/// terminated by CRLF (including the final partial line).
///
/// Empty input produces empty output. Idempotent as long as the input has
/// no embedded newlines.
#[must_use]
pub fn wrap_base64_lines(encoded: &str, width: usize) -> String {
    let width = width.max(1);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / width * 2);

    for chunk in encoded.as_bytes().chunks(width) {
        out.push_str(&String::from_utf8_lossy(chunk));
        out.push_str("\r\n");
    }

    out
}
