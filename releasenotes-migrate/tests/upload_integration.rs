use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use releasenotes_core::contract::{SubmitError, Submitter};
use releasenotes_core::format::{format_notes, FormatOptions, ReleaseNotePayload};
use releasenotes_core::note::parse_release_notes;
use releasenotes_core::process::{process_directory, ProcessConfig};
use releasenotes_migrate::upload::{DryRunSubmitter, ReleaseNotesClient};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

const PATH: &str = "/api/v1/admin/release_notes";

const GENERAL_YAML: &str = r#"
releasenotes:
  - title:
      ru: Заголовок
      en: Title
    text:
      ru:
        - Пункт 1
        - Пункт 2
    date_publish: 01.01.2024
"#;

type Received = Arc<Mutex<Vec<(Option<String>, Value)>>>;

/// Starts a local admin API stub answering every POST with `status` and `body`.
async fn spawn_admin_api(status: StatusCode, body: &'static str) -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    let app = Router::new().route(
        PATH,
        post(move |headers: HeaderMap, Json(payload): Json<Value>| {
            let sink = sink.clone();
            async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                sink.lock().unwrap().push((content_type, payload));
                (status, body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}{PATH}"), received)
}

fn general_payload() -> ReleaseNotePayload {
    let notes = parse_release_notes(GENERAL_YAML).unwrap();
    format_notes("general.yaml", &notes, &FormatOptions::default())
        .unwrap()
        .remove(0)
}

#[tokio::test]
async fn test_submit_posts_json_and_reads_echoed_header() {
    let (endpoint, received) =
        spawn_admin_api(StatusCode::OK, r#"{"id": 7, "header": "Заголовок"}"#).await;
    let client = ReleaseNotesClient::new(endpoint);

    let result = client.submit(&general_payload()).await;

    let submitted = result.expect("2xx response should be accepted");
    assert_eq!(submitted.header.as_deref(), Some("Заголовок"));

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let (content_type, body) = &received[0];
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body["mainTag"], "RELEASE_NOTE_MAIN_TAG_MAJOR");
    assert_eq!(body["localizedHeaders"]["en"], "Title");
    assert_eq!(body["text"], "- Пункт 1\n- Пункт 2");
}

#[tokio::test]
async fn test_submit_reports_non_2xx_with_both_bodies() {
    let (endpoint, _received) =
        spawn_admin_api(StatusCode::BAD_REQUEST, r#"{"message": "unknown scope"}"#).await;
    let client = ReleaseNotesClient::new(endpoint);

    let err = client.submit(&general_payload()).await.unwrap_err();

    match err {
        SubmitError::Status {
            status,
            request_body,
            response_body,
        } => {
            assert_eq!(status, 400);
            assert!(request_body.contains("\"header\":\"Заголовок\""));
            assert!(response_body.contains("unknown scope"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_reports_non_json_success_body() {
    let (endpoint, _received) = spawn_admin_api(StatusCode::OK, "created").await;
    let client = ReleaseNotesClient::new(endpoint);

    let err = client.submit(&general_payload()).await.unwrap_err();
    assert!(matches!(err, SubmitError::Decode(_)));
}

#[tokio::test]
async fn test_submit_reports_transport_error() {
    // Grab a free port, then close it again so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ReleaseNotesClient::new(format!("http://{addr}{PATH}"));
    let err = client.submit(&general_payload()).await.unwrap_err();
    assert!(matches!(err, SubmitError::Transport(_)));
}

#[tokio::test]
async fn test_dry_run_echoes_header_without_network() {
    let submitted = DryRunSubmitter.submit(&general_payload()).await.unwrap();
    assert_eq!(submitted.header.as_deref(), Some("Заголовок"));
}

#[tokio::test]
async fn test_directory_migration_against_local_api() {
    let (endpoint, received) = spawn_admin_api(StatusCode::OK, r#"{"header": "ok"}"#).await;
    let tmp = tempdir().unwrap();
    std::fs::write(tmp.path().join("general.yaml"), GENERAL_YAML).unwrap();
    std::fs::write(tmp.path().join("broken.yaml"), "not-yaml: [:::").unwrap();

    let client = ReleaseNotesClient::new(endpoint);
    let report = process_directory(tmp.path(), &ProcessConfig::default(), &client)
        .await
        .unwrap();

    assert_eq!(report.submitted(), 1);
    assert_eq!(report.failed_files().count(), 1);
    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].1["scope"], serde_json::json!(["api-information"]));
    assert_eq!(received[0].1["date"], "2024-01-01T00:00:00Z");
}
