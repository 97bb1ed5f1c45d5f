//! SMTP reply types.

/// A parsed server reply.
///
/// `code` comes from the first three characters of the first
/// CRLF-terminated line; `text` is the entire text accumulated from the
/// socket up to that point. Multi-line replies are not decomposed further:
/// the code class is all the client acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Three-digit reply code, 0 when the line did not start with digits.
    pub code: u16,
    /// Raw accumulated response text.
    pub text: String,
}

impl Reply {
    /// Parses a reply from the accumulated receive buffer.
    ///
    /// The buffer is expected to contain at least one `\r\n`; the code is
    /// taken from the first line when its first three characters are all
    /// ASCII digits, and is 0 otherwise.
    #[must_use]
    pub fn parse(accumulated: &str) -> Self {
        let first_line = accumulated.split("\r\n").next().unwrap_or("");

        let code = if first_line.len() >= 3 && first_line.as_bytes()[..3].iter().all(u8::is_ascii_digit) {
            first_line[..3].parse().unwrap_or(0)
        } else {
            0
        };

        Self {
            code,
            text: accumulated.to_string(),
        }
    }

    /// Returns the reply class (first digit): 2 success, 3 intermediate,
    /// 4 transient failure, 5 permanent failure, 0 unparsable.
    #[must_use]
    pub const fn class(&self) -> u16 {
        self.code / 100
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.text.trim_end())
    }
}
