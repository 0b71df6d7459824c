//! Slack webhook delivery against a canned HTTP server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use serde_json::Value;
use tables_notify::{Notifier, NotifyError, SlackConfig, SlackNotifier};

/// Answer one request with `status` and `body`.
///
/// The handle yields the request line and the request body.
fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<(String, String)>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut content_length = 0;
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            if header.trim_end().is_empty() {
                break;
            }
            if let Some((name, value)) = header.split_once(':')
                && name.eq_ignore_ascii_case("content-length")
            {
                content_length = value.trim().parse().unwrap();
            }
        }
        let mut request_body = vec![0; content_length];
        reader.read_exact(&mut request_body).unwrap();

        let mut stream = reader.into_inner();
        write!(
            stream,
            "HTTP/1.1 {status} Canned\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();

        (
            request_line.trim_end().to_string(),
            String::from_utf8(request_body).unwrap(),
        )
    });
    (format!("http://{addr}/services/T/B/X"), handle)
}

fn notifier(webhook_url: String) -> SlackNotifier {
    SlackNotifier::new(SlackConfig {
        webhook_url,
        tracker_url: "https://jira.example.com/browse".to_string(),
        ..SlackConfig::default()
    })
    .unwrap()
}

#[test]
fn test_alert_is_posted_as_json() {
    let (url, server) = serve_once(200, "ok");

    notifier(url)
        .notify("TABLE-7", "TABLE-7 has empty field: slack")
        .unwrap();
    let (request_line, body) = server.join().unwrap();

    assert_eq!(request_line, "POST /services/T/B/X HTTP/1.1");
    let payload: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(payload["text"], "*[JIRA]* TABLE-7 has problems\n ");
    assert_eq!(payload["attachments"][0]["title"], "TABLE-7 has empty field: slack");
    assert_eq!(
        payload["attachments"][0]["text"],
        "<https://jira.example.com/browse/TABLE-7>"
    );
}

#[test]
fn test_error_status_is_rejected() {
    let (url, server) = serve_once(404, "no_service");

    let result = notifier(url).notify("TABLE-7", "TABLE-7 has empty field: slack");
    server.join().unwrap();

    match result {
        Err(NotifyError::Rejected { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "no_service");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}
