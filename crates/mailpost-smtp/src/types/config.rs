//! Connection identity and send settings.

/// Everything one send operation needs to reach and talk to a server.
///
/// Immutable for the duration of a send; each attempt opens its own
/// connection from these values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    /// Server host name or IP address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Sender address used in `MAIL FROM` and the `From` header.
    pub from_address: String,
    /// Login user name; only used when `use_auth` is set.
    pub username: String,
    /// Login password or app token; only used when `use_auth` is set.
    pub password: String,
    /// Whether to run AUTH LOGIN before the mail transaction.
    pub use_auth: bool,
    /// Socket read/write timeout in milliseconds; 0 leaves the socket
    /// without explicit timeouts.
    pub io_timeout_ms: u64,
    /// Maximum number of full send attempts; values below 1 are treated
    /// as 1 at the call site.
    pub max_retry: u32,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 25,
            from_address: String::new(),
            username: String::new(),
            password: String::new(),
            use_auth: false,
            io_timeout_ms: 5000,
            max_retry: 1,
        }
    }
}
