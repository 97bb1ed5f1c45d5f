//! Type-state SMTP client.
//!
//! One [`Client`] drives exactly one submission attempt; the compiler
//! enforces the command order the protocol requires. Every step sends one
//! CRLF-terminated line and requires the reply code's class to match, so a
//! server wandering off-script fails the attempt with the code and text it
//! sent.

use super::Connection;
use crate::command::Command;
use crate::error::{Error, Result};
use crate::types::Reply;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::marker::PhantomData;

/// Terminating sequence of the DATA phase.
const DATA_TERMINATOR: &str = "\r\n.\r\n";

/// Type-state marker for connected state.
#[derive(Debug)]
pub struct Connected;

/// Type-state marker for authenticated state.
#[derive(Debug)]
pub struct Authenticated;

/// Type-state marker for mail transaction started.
#[derive(Debug)]
pub struct MailTransaction;

/// Type-state marker for recipient added.
#[derive(Debug)]
pub struct RecipientAdded;

/// Type-state marker for data mode.
#[derive(Debug)]
pub struct DataMode;

/// SMTP client with type-state pattern.
#[derive(Debug)]
pub struct Client<State> {
    conn: Connection,
    _state: PhantomData<State>,
}

impl Client<Connected> {
    /// Creates a client from a fresh connection and reads the server
    /// greeting, which must be a 2xx reply.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the greeting fails or the server
    /// greets with anything but a success class.
    pub fn greet(mut conn: Connection) -> Result<Self> {
        let greeting = conn.read_reply()?;
        if greeting.class() != 2 {
            return Err(Error::unexpected_reply(greeting.code, greeting.text));
        }

        Ok(Self {
            conn,
            _state: PhantomData,
        })
    }

    /// Sends EHLO with the given client hostname.
    ///
    /// # Errors
    ///
    /// Returns an error if the server does not answer with a 2xx reply.
    pub fn ehlo(mut self, client_hostname: &str) -> Result<Self> {
        let cmd = Command::Ehlo {
            hostname: client_hostname.to_string(),
        };
        self.exchange(&cmd, 2)?;
        Ok(self)
    }

    /// Runs the AUTH LOGIN exchange.
    ///
    /// Username and password cross the wire Base64-encoded, as the
    /// mechanism prescribes; over a cleartext channel that is encoding,
    /// not protection.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three steps gets a reply outside
    /// its expected class (3xx, 3xx, 2xx).
    pub fn auth_login(mut self, username: &str, password: &str) -> Result<Client<Authenticated>> {
        self.exchange(&Command::AuthLogin, 3)?;

        self.send_line(&STANDARD.encode(username.as_bytes()))?;
        self.expect_reply(3)?;

        self.send_line(&STANDARD.encode(password.as_bytes()))?;
        self.expect_reply(2)?;

        Ok(Client {
            conn: self.conn,
            _state: PhantomData,
        })
    }

    /// Starts a mail transaction without authenticating first.
    ///
    /// # Errors
    ///
    /// Returns an error if the MAIL FROM command fails.
    pub fn mail_from(mut self, from: &str) -> Result<Client<MailTransaction>> {
        let cmd = Command::MailFrom {
            from: from.to_string(),
        };
        self.exchange(&cmd, 2)?;

        Ok(Client {
            conn: self.conn,
            _state: PhantomData,
        })
    }
}

impl Client<Authenticated> {
    /// Starts a mail transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the MAIL FROM command fails.
    pub fn mail_from(mut self, from: &str) -> Result<Client<MailTransaction>> {
        let cmd = Command::MailFrom {
            from: from.to_string(),
        };
        self.exchange(&cmd, 2)?;

        Ok(Client {
            conn: self.conn,
            _state: PhantomData,
        })
    }
}

impl Client<MailTransaction> {
    /// Adds the recipient to the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the RCPT TO command fails.
    pub fn rcpt_to(mut self, to: &str) -> Result<Client<RecipientAdded>> {
        let cmd = Command::RcptTo { to: to.to_string() };
        self.exchange(&cmd, 2)?;

        Ok(Client {
            conn: self.conn,
            _state: PhantomData,
        })
    }
}

impl Client<RecipientAdded> {
    /// Begins sending message data; the server must answer 3xx.
    ///
    /// # Errors
    ///
    /// Returns an error if the DATA command fails.
    pub fn data(mut self) -> Result<Client<DataMode>> {
        self.exchange(&Command::Data, 3)?;

        Ok(Client {
            conn: self.conn,
            _state: PhantomData,
        })
    }
}

impl Client<DataMode> {
    /// Transmits the rendered message and completes the transaction.
    ///
    /// The `\r\n.\r\n` terminator is appended unless the payload already
    /// ends with that exact sequence; a pre-terminated payload is never
    /// double-terminated. The whole payload goes out as a single write
    /// loop.
    ///
    /// # Errors
    ///
    /// Returns an error if transmission fails or the server rejects the
    /// message.
    pub fn send_payload(mut self, raw_message: &str) -> Result<Client<Connected>> {
        if raw_message.ends_with(DATA_TERMINATOR) {
            self.conn.send_all(raw_message.as_bytes())?;
        } else {
            let mut payload = String::with_capacity(raw_message.len() + DATA_TERMINATOR.len());
            payload.push_str(raw_message);
            payload.push_str(DATA_TERMINATOR);
            self.conn.send_all(payload.as_bytes())?;
        }

        self.expect_reply(2)?;

        Ok(Client {
            conn: self.conn,
            _state: PhantomData,
        })
    }
}

// Common implementation for all states
impl<S> Client<S> {
    fn exchange(&mut self, cmd: &Command, expect_class: u16) -> Result<Reply> {
        self.conn.send_all(&cmd.serialize())?;
        self.expect_reply(expect_class)
    }

    fn send_line(&mut self, line: &str) -> Result<()> {
        self.conn.send_all(line.as_bytes())?;
        self.conn.send_all(b"\r\n")
    }

    fn expect_reply(&mut self, expect_class: u16) -> Result<Reply> {
        let reply = self.conn.read_reply()?;
        if reply.class() != expect_class {
            return Err(Error::unexpected_reply(reply.code, reply.text));
        }
        Ok(reply)
    }

    /// Sends QUIT and closes the connection (available in any state).
    ///
    /// Callers past the point of message acceptance treat a failure here
    /// as best-effort and ignore it.
    ///
    /// # Errors
    ///
    /// Returns an error if the QUIT command fails.
    pub fn quit(mut self) -> Result<()> {
        self.exchange(&Command::Quit, 2)?;
        Ok(())
    }
}
