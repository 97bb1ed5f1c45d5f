//! Low-level blocking stream handling.

use crate::error::{Error, Result};
use crate::types::Reply;
use std::io::{ErrorKind, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Receive buffer chunk size.
const RECV_CHUNK: usize = 512;

/// A blocking connection to an SMTP server.
///
/// The socket is owned by this value and closed when it is dropped, on
/// every exit path of an attempt. Read and write timeouts are applied at
/// connect time so no later socket call can block indefinitely.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
}

impl Connection {
    /// Resolves `host:port` and connects to the first reachable address.
    ///
    /// Candidate addresses are tried in resolver order, so numeric and
    /// symbolic hosts as well as IPv4/IPv6 all behave the same. When
    /// `io_timeout_ms` is non-zero, both read and write timeouts are set
    /// on the resulting socket.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connect`] when resolution yields nothing
    /// connectable, or an I/O error when setting timeouts fails.
    pub fn connect(host: &str, port: u16, io_timeout_ms: u64) -> Result<Self> {
        let addrs = (host, port).to_socket_addrs().map_err(|e| {
            tracing::debug!(host, port, error = %e, "Address resolution failed");
            Error::Connect {
                host: host.to_string(),
                port,
            }
        })?;

        let mut stream = None;
        for addr in addrs {
            match TcpStream::connect(addr) {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => {
                    tracing::debug!(%addr, error = %e, "Connect attempt failed");
                }
            }
        }

        let stream = stream.ok_or_else(|| Error::Connect {
            host: host.to_string(),
            port,
        })?;

        if io_timeout_ms > 0 {
            let timeout = Duration::from_millis(io_timeout_ms);
            stream.set_read_timeout(Some(timeout))?;
            stream.set_write_timeout(Some(timeout))?;
        }

        Ok(Self { stream })
    }

    /// Writes the whole buffer, looping until the OS has accepted every
    /// byte.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PeerClosed`] on a zero-length write and
    /// [`Error::Io`] on hard failures, including timeouts.
    pub fn send_all(&mut self, data: &[u8]) -> Result<()> {
        let mut sent = 0;
        while sent < data.len() {
            match self.stream.write(&data[sent..]) {
                Ok(0) => return Err(Error::PeerClosed),
                Ok(n) => sent += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::Io(e)),
            }
        }
        Ok(())
    }

    /// Reads until the receive buffer contains a CRLF-terminated line,
    /// then parses the reply code from the first line.
    ///
    /// The returned [`Reply`] carries the entire accumulated text, not
    /// just the first line; multi-line greetings are left intact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PeerClosed`] when the server closes the
    /// connection, and [`Error::Io`] on hard failures, including
    /// timeouts.
    pub fn read_reply(&mut self) -> Result<Reply> {
        let mut accumulated = Vec::new();
        let mut buf = [0u8; RECV_CHUNK];

        loop {
            let n = match self.stream.read(&mut buf) {
                Ok(0) => return Err(Error::PeerClosed),
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            };
            accumulated.extend_from_slice(&buf[..n]);

            if accumulated.windows(2).any(|w| w == b"\r\n") {
                let text = String::from_utf8_lossy(&accumulated);
                return Ok(Reply::parse(&text));
            }
        }
    }
}
