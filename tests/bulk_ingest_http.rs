//! End-to-end batches against an in-process multipart gateway.

use ats_uploader::report::Reporter;
use ats_uploader::upload::{exit_code, run_bulk_ingest, HttpGateway, UploadOutcome};
use ats_uploader::Config;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default, Clone)]
struct ReceivedUpload {
    file_name: Option<String>,
    bytes: Vec<u8>,
    company_id: String,
    source_type: String,
}

#[derive(Clone)]
struct GatewayState {
    received: Arc<Mutex<Vec<ReceivedUpload>>>,
    reject: Option<&'static str>,
}

async fn ingest(State(state): State<GatewayState>, mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    let mut upload = ReceivedUpload::default();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                upload.file_name = field.file_name().map(str::to_string);
                upload.bytes = field.bytes().await.unwrap().to_vec();
            }
            "company_id" => upload.company_id = field.text().await.unwrap(),
            "source_type" => upload.source_type = field.text().await.unwrap(),
            _ => {}
        }
    }

    let rejected = state.reject.is_some() && upload.file_name.as_deref() == state.reject;
    state.received.lock().unwrap().push(upload);

    if rejected {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Internal Server Error"})),
        );
    }
    (
        StatusCode::ACCEPTED,
        Json(json!({"success": true, "ingestion_id": "abc"})),
    )
}

async fn spawn_gateway(reject: Option<&'static str>) -> (String, Arc<Mutex<Vec<ReceivedUpload>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api/ingestion/process", post(ingest))
        .with_state(GatewayState {
            received: received.clone(),
            reject,
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api/ingestion/process"), received)
}

fn config_for(gateway_url: &str) -> Config {
    let url = gateway_url.to_string();
    Config::from_lookup(move |key| match key {
        "INGESTION_GATEWAY_URL" => Some(url.clone()),
        "ATS_COMPANY_ID" => Some("company-42".to_string()),
        _ => None,
    })
    .unwrap()
}

fn write_files(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), format!("contents of {name}")).unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_valid_files_all_succeed_and_invalid_file_is_skipped() {
    let (url, received) = spawn_gateway(None).await;
    let config = config_for(&url);
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &["ana.pdf", "bia.doc", "caio.DOCX", "notes.txt"]);

    let mut reporter = Reporter::new(Vec::new());
    let summary = run_bulk_ingest(&config, dir.path(), Arc::new(HttpGateway::new(url)), &mut reporter)
        .await
        .unwrap()
        .summary;

    assert_eq!(summary.total, 3);
    assert_eq!(summary.successful, 3);
    assert!(!summary.has_failures());

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 3);
    for upload in received.iter() {
        let name = upload.file_name.clone().unwrap();
        assert_ne!(name, "notes.txt");
        assert_eq!(upload.bytes, format!("contents of {name}").into_bytes());
        assert_eq!(upload.company_id, "company-42");
        assert_eq!(upload.source_type, "MANUAL_UPLOAD");
    }

    let output = String::from_utf8(reporter.into_inner()).unwrap();
    assert_eq!(output.matches("Success (ID: abc)").count(), 3);
    assert!(!output.contains("notes.txt"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_one_server_error_does_not_abort_the_batch() {
    let (url, received) = spawn_gateway(Some("X.pdf")).await;
    let config = config_for(&url);
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &["a.pdf", "b.pdf", "X.pdf", "d.pdf", "e.pdf"]);

    let mut reporter = Reporter::new(Vec::new());
    let report = run_bulk_ingest(&config, dir.path(), Arc::new(HttpGateway::new(url)), &mut reporter)
        .await
        .unwrap();
    let summary = &report.summary;

    assert_eq!(summary.total, 5);
    assert_eq!(summary.successful, 4);
    assert_eq!(summary.http_errors, 1);
    assert_eq!(summary.exceptions, 0);
    assert_eq!(received.lock().unwrap().len(), 5);

    let failed: Vec<_> = report.failures().map(|r| r.file_name.as_str()).collect();
    assert_eq!(failed, vec!["X.pdf"]);
    assert_eq!(exit_code(&Ok(report.clone())), 1);

    let output = String::from_utf8(reporter.into_inner()).unwrap();
    assert!(output.contains("X.pdf: Error (500)"));
}

#[tokio::test]
async fn test_unreachable_gateway_reports_every_file() {
    // Grab a free port, then close it so connections are refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/ingest", listener.local_addr().unwrap());
    drop(listener);

    let config = config_for(&url);
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &["a.pdf", "b.doc"]);

    let gateway = Arc::new(HttpGateway::new(url));
    let dispatcher = ats_uploader::upload::Dispatcher::new(gateway, config.company_id.as_str());
    let pool = ats_uploader::upload::UploadPool::new(dispatcher, config.worker_limit);
    let files = ats_uploader::upload::select_files(dir.path(), &config.allowed_extensions).unwrap();

    let results = pool.run(files, |_| {}).await;

    assert_eq!(results.len(), 2);
    assert!(results
        .iter()
        .all(|r| matches!(r.outcome, UploadOutcome::Exception { .. })));
}
