//! Integration tests for the CLI session handler
//!
//! Runs `run_session` against a `wiremock` server with an in-memory console
//! and scripted input, covering the status-line exits and error propagation.

use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use datacamp_fetcher::app::{ApiConfig, Console, CycleOutcome};
use datacamp_fetcher::cli::{run_session, SessionArgs, SessionEnd, LOGIN_FAILED};
use datacamp_fetcher::config::AppConfig;
use datacamp_fetcher::errors::{AppError, AuthError};

/// Shared in-memory console sink
#[derive(Clone, Default)]
struct Output(Arc<Mutex<Vec<u8>>>);

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Output {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn app_config(root: &str) -> AppConfig {
    AppConfig {
        api: ApiConfig::with_root(root),
        ..Default::default()
    }
}

fn session_args(token: &str, list: &str, destination: &TempDir) -> SessionArgs {
    SessionArgs {
        token: token.to_string(),
        list: list.to_string(),
        path: Some(destination.path().to_path_buf()),
        video: false,
        exercise: false,
        dataset: true,
        all: false,
    }
}

async fn mount_signed_in(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/users/signed_in"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 42,
            "slug": "jdoe"
        })))
        .mount(server)
        .await;
}

async fn forbid_listings(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/(profile|tracks|api/courses)"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_rejected_token_prints_status_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/signed_in"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    forbid_listings(&server).await;

    let destination = TempDir::new().unwrap();
    let output = Output::default();
    let end = run_session(
        session_args("expired-token", "C", &destination),
        &app_config(&server.uri()),
        Console::from_writer(output.clone(), false),
        &mut Cursor::new("1\n"),
        false,
    )
    .await
    .unwrap();

    assert_eq!(end, SessionEnd::LoginRejected);
    assert_eq!(output.text(), format!("{}  \n", LOGIN_FAILED));
}

#[tokio::test]
async fn test_malformed_token_skips_login_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let destination = TempDir::new().unwrap();
    let output = Output::default();
    let end = run_session(
        session_args("two words", "C", &destination),
        &app_config(&server.uri()),
        Console::from_writer(output.clone(), false),
        &mut Cursor::new(""),
        false,
    )
    .await
    .unwrap();

    assert_eq!(end, SessionEnd::LoginRejected);
    assert!(output.text().contains(LOGIN_FAILED));
}

#[tokio::test]
async fn test_invalid_list_mode_prints_status_line() {
    let server = MockServer::start().await;
    mount_signed_in(&server).await;
    forbid_listings(&server).await;

    let destination = TempDir::new().unwrap();
    let output = Output::default();
    let end = run_session(
        session_args("secret-token", "X", &destination),
        &app_config(&server.uri()),
        Console::from_writer(output.clone(), false),
        &mut Cursor::new("1\n"),
        false,
    )
    .await
    .unwrap();

    assert_eq!(end, SessionEnd::InvalidListMode);
    let text = output.text();
    assert!(text.starts_with(&"=".repeat(100)));
    assert!(text.contains("No valid list type provided!"));
    assert!(text.contains("list=X"));
    assert!(!text.contains("Enter the id(s)"));
}

#[tokio::test]
async fn test_login_transport_error_propagates() {
    // Nothing listens on port 1
    let destination = TempDir::new().unwrap();
    let output = Output::default();
    let result = run_session(
        session_args("secret-token", "C", &destination),
        &app_config("http://127.0.0.1:1"),
        Console::from_writer(output.clone(), false),
        &mut Cursor::new(""),
        false,
    )
    .await;

    assert!(matches!(result, Err(AppError::Auth(AuthError::Http(_)))));
    assert!(output.text().is_empty());
}

#[tokio::test]
async fn test_empty_listing_finishes_session() {
    let server = MockServer::start().await;
    mount_signed_in(&server).await;
    Mock::given(method("GET"))
        .and(path("/profile/jdoe"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let destination = TempDir::new().unwrap();
    let output = Output::default();
    let end = run_session(
        session_args("secret-token", "C", &destination),
        &app_config(&server.uri()),
        Console::from_writer(output.clone(), false),
        &mut Cursor::new("1\n"),
        false,
    )
    .await
    .unwrap();

    let SessionEnd::Finished(summary) = end else {
        panic!("expected a finished session, got {:?}", end);
    };
    assert_eq!(summary.ended_by, CycleOutcome::EmptyListing);
    assert_eq!(summary.dispatched, 0);
    assert!(output.text().contains("No completed courses found!"));
}
