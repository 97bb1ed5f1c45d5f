//! Whole-chain tests: configuration, message building, and submission
//! against a scripted in-process SMTP server.

#![allow(clippy::unwrap_used)]

use mailpost_core::{
    Error, MessageBuilder, parse_smtp_config, send_bulk, send_mail_with_attachments,
    send_simple_mail,
};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

/// Spawns a server handling one scripted submission per entry of
/// `accept_mail`; `false` entries reject MAIL FROM with 550.
fn spawn_server(accept_mail: Vec<bool>) -> (u16, mpsc::Receiver<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for accept in accept_mail {
            let (stream, _) = listener.accept().unwrap();
            let transcript = serve_submission(stream, accept);
            let _ = tx.send(transcript);
        }
    });

    (port, rx)
}

fn serve_submission(stream: TcpStream, accept_mail: bool) -> Vec<String> {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut writer = stream;
    let mut transcript = Vec::new();
    let mut in_data = false;

    writer.write_all(b"220 fake ESMTP ready\r\n").unwrap();

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let received = line.trim_end_matches(['\r', '\n']).to_string();
        transcript.push(received.clone());

        if in_data {
            if received == "." {
                in_data = false;
                writer.write_all(b"250 message accepted\r\n").unwrap();
            }
            continue;
        }

        if received.starts_with("EHLO") {
            writer.write_all(b"250 fake greets you\r\n").unwrap();
        } else if received.starts_with("MAIL FROM:") {
            if accept_mail {
                writer.write_all(b"250 sender ok\r\n").unwrap();
            } else {
                writer.write_all(b"550 sender rejected\r\n").unwrap();
            }
        } else if received.starts_with("RCPT TO:") {
            writer.write_all(b"250 recipient ok\r\n").unwrap();
        } else if received == "DATA" {
            in_data = true;
            writer.write_all(b"354 end data\r\n").unwrap();
        } else if received == "QUIT" {
            writer.write_all(b"221 bye\r\n").unwrap();
            break;
        } else {
            writer.write_all(b"500 unrecognized\r\n").unwrap();
        }
    }

    transcript
}

fn config_text(port: u16) -> String {
    format!(
        "server_ip = 127.0.0.1\nport = {port}\nfrom_address = a@x.com\nio_timeout_ms = 2000\n"
    )
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn simple_mail_reaches_the_server() {
    let (port, rx) = spawn_server(vec![true]);
    let cfg = parse_smtp_config(&config_text(port)).unwrap();
    let builder = MessageBuilder::new();

    send_simple_mail(&cfg, &builder, "bob@y.com", "Hi", "Hello!").unwrap();

    let transcript = rx.recv().unwrap();
    assert!(transcript.contains(&"MAIL FROM:<a@x.com>".to_string()));
    assert!(transcript.contains(&"RCPT TO:<bob@y.com>".to_string()));
    assert!(transcript.contains(&"From: a@x.com".to_string()));
    assert!(transcript.contains(&"Subject: Hi".to_string()));
    assert!(transcript.contains(&"Hello!".to_string()));
}

#[test]
fn attachment_mail_is_multipart_on_the_wire() {
    let (port, rx) = spawn_server(vec![true]);
    let cfg = parse_smtp_config(&config_text(port)).unwrap();
    let builder = MessageBuilder::new();

    let attachment = temp_file("mailpost_service_attachment.txt", "attached text");
    send_mail_with_attachments(
        &cfg,
        &builder,
        "bob@y.com",
        "Report",
        "See attachment.",
        &[&attachment],
    )
    .unwrap();
    fs::remove_file(&attachment).unwrap();

    let transcript = rx.recv().unwrap();
    assert!(
        transcript
            .iter()
            .any(|l| l.starts_with("Content-Type: multipart/mixed; boundary="))
    );
    assert!(transcript.contains(
        &"Content-Disposition: attachment; filename=\"mailpost_service_attachment.txt\""
            .to_string()
    ));
}

#[test]
fn unreadable_attachment_aborts_before_connecting() {
    // No server behind this port; a connection attempt would fail loudly.
    let cfg = parse_smtp_config(&config_text(1)).unwrap();
    let builder = MessageBuilder::new();

    let err = send_mail_with_attachments(
        &cfg,
        &builder,
        "bob@y.com",
        "Report",
        "Body",
        &["/nonexistent/mailpost/missing.pdf"],
    )
    .unwrap_err();

    assert!(matches!(err, Error::Mime(_)));
}

#[test]
fn bulk_send_renders_per_recipient() {
    let (port, rx) = spawn_server(vec![true, true]);
    let cfg = parse_smtp_config(&config_text(port)).unwrap();
    let builder = MessageBuilder::new();

    let recipients = temp_file(
        "mailpost_bulk_recipients.txt",
        "bob@y.com, Bob\nalice@y.com, Alice\n",
    );
    let template = temp_file("mailpost_bulk_template.txt", "Hello ${name}, mail #${index}.");

    let summary = send_bulk(&cfg, &builder, &recipients, &template).unwrap();
    fs::remove_file(&recipients).unwrap();
    fs::remove_file(&template).unwrap();

    assert_eq!(summary.sent, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.total, 2);

    let first = rx.recv().unwrap();
    assert!(first.contains(&"RCPT TO:<bob@y.com>".to_string()));
    assert!(first.contains(&"Subject: Bulk message #1".to_string()));
    assert!(first.contains(&"Hello Bob, mail #1.".to_string()));

    let second = rx.recv().unwrap();
    assert!(second.contains(&"RCPT TO:<alice@y.com>".to_string()));
    assert!(second.contains(&"Hello Alice, mail #2.".to_string()));
}

#[test]
fn bulk_send_counts_failures_without_stopping() {
    let (port, rx) = spawn_server(vec![true, false]);
    let cfg = parse_smtp_config(&config_text(port)).unwrap();
    let builder = MessageBuilder::new();

    let recipients = temp_file(
        "mailpost_bulk_fail_recipients.txt",
        "bob@y.com, Bob\nalice@y.com, Alice\n",
    );
    let template = temp_file("mailpost_bulk_fail_template.txt", "Hi ${name}");

    let err = send_bulk(&cfg, &builder, &recipients, &template).unwrap_err();
    fs::remove_file(&recipients).unwrap();
    fs::remove_file(&template).unwrap();

    match err {
        Error::BulkIncomplete {
            sent,
            failed,
            total,
        } => {
            assert_eq!(sent, 1);
            assert_eq!(failed, 1);
            assert_eq!(total, 2);
        }
        other => panic!("expected BulkIncomplete, got {other}"),
    }

    // Both connections were attempted despite the failure.
    assert!(rx.recv().is_ok());
    assert!(rx.recv().is_ok());
}
