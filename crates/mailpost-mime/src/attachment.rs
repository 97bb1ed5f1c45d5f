//! Attachment construction.
//!
//! An [`Attachment`] carries its content already Base64-encoded; encoding
//! happens here, at construction time, so the message builder and the wire
//! layer only ever see ready-to-emit text.

use crate::encoding::encode_base64;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Placeholder used when no file name can be extracted from a path.
const FALLBACK_FILE_NAME: &str = "attachment.bin";

/// A file attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name, used as both the MIME `name` and `filename` parameter.
    pub file_name: String,
    /// MIME content type, e.g. `text/plain` or `application/octet-stream`.
    pub content_type: String,
    /// Content of the file, Base64-encoded without line wrapping.
    pub base64_content: String,
}

impl Attachment {
    /// Builds an attachment from raw bytes.
    ///
    /// The content type is guessed from the file name's extension.
    #[must_use]
    pub fn from_bytes(file_name: impl Into<String>, data: &[u8]) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            base64_content: encode_base64(data),
        }
    }

    /// Builds an attachment by reading a file from disk.
    ///
    /// The file name is taken from the last path component, falling back to
    /// a placeholder when the path has no usable name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| Error::AttachmentRead {
            path: path.display().to_string(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map_or(FALLBACK_FILE_NAME, |name| {
                name.to_str().unwrap_or(FALLBACK_FILE_NAME)
            })
            .to_string();

        Ok(Self::from_bytes(file_name, &data))
    }
}

/// Guesses a MIME content type from a file name's extension.
///
/// Matching is case-insensitive; unknown extensions fall back to
/// `application/octet-stream`.
#[must_use]
pub fn guess_content_type(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();

    if lower.ends_with(".txt") {
        "text/plain"
    } else if lower.ends_with(".html") || lower.ends_with(".htm") {
        "text/html"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn guesses_known_extensions() {
        assert_eq!(guess_content_type("report.txt"), "text/plain");
        assert_eq!(guess_content_type("page.html"), "text/html");
        assert_eq!(guess_content_type("page.htm"), "text/html");
        assert_eq!(guess_content_type("photo.jpg"), "image/jpeg");
        assert_eq!(guess_content_type("photo.JPEG"), "image/jpeg");
        assert_eq!(guess_content_type("chart.png"), "image/png");
        assert_eq!(guess_content_type("manual.pdf"), "application/pdf");
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        assert_eq!(guess_content_type("data.xyz"), "application/octet-stream");
        assert_eq!(guess_content_type("noextension"), "application/octet-stream");
    }

    #[test]
    fn from_bytes_encodes_content() {
        let att = Attachment::from_bytes("hello.txt", b"Hello");
        assert_eq!(att.file_name, "hello.txt");
        assert_eq!(att.content_type, "text/plain");
        assert_eq!(att.base64_content, "SGVsbG8=");
    }

    #[test]
    fn from_file_reads_and_names() {
        let dir = std::env::temp_dir();
        let path = dir.join("mailpost_attachment_test.txt");
        fs::write(&path, b"file body").unwrap();

        let att = Attachment::from_file(&path).unwrap();
        assert_eq!(att.file_name, "mailpost_attachment_test.txt");
        assert_eq!(att.content_type, "text/plain");
        assert_eq!(att.base64_content, encode_base64(b"file body"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn from_file_missing_is_error() {
        let err = Attachment::from_file("/nonexistent/mailpost/file.bin").unwrap_err();
        assert!(err.to_string().contains("file.bin"));
    }
}
