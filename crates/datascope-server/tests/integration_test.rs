//! Integration tests for the data analysis server.
//!
//! These tests start the server, send real multipart requests, and verify
//! the JSON responses end to end.

use datascope_server::{AppState, StagingConfig, start_server};
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;

const CLEAN_CSV: &str = "x,y,label\n1,3,a\n2,2,b\n3,1,c\n";
const MESSY_CSV: &str = "age,income,city\n25,50000,Oslo\n,,\n25,50000,Oslo\n30,,Bergen\n";

/// Spawn a server on the given port with a throwaway staging directory.
///
/// Returns the join handle and the staging directory guard.
async fn spawn_server(port: u16) -> (tokio::task::JoinHandle<()>, tempfile::TempDir) {
    let staging_dir = tempfile::tempdir().expect("Failed to create staging dir");
    let state = AppState::with_staging(StagingConfig::new(staging_dir.path()));

    let addr = format!("127.0.0.1:{port}");
    let server_handle = tokio::spawn(async move {
        start_server(&addr, state)
            .await
            .expect("Failed to start server");
    });

    // Give server time to start
    sleep(Duration::from_millis(300)).await;

    (server_handle, staging_dir)
}

fn csv_form(filename: &str, content: impl Into<Vec<u8>>) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(content.into()).file_name(filename.to_string());
    reqwest::multipart::Form::new().part("file", part)
}

fn staging_is_empty(dir: &Path) -> bool {
    match std::fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => true, // never created
    }
}

#[tokio::test]
async fn test_health_endpoint() {
    let (server_handle, _staging) = spawn_server(18480).await;

    let client = reqwest::Client::new();
    let response = client
        .get("http://127.0.0.1:18480/health")
        .send()
        .await
        .expect("Failed to send health check request");

    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "data-analysis");

    server_handle.abort();
}

#[tokio::test]
async fn test_upload_clean_csv() {
    let (server_handle, staging) = spawn_server(18481).await;

    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:18481/upload")
        .multipart(csv_form("data.csv", CLEAN_CSV))
        .send()
        .await
        .expect("Failed to send upload request");

    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["success"], true);
    assert_eq!(json["filename"], "data.csv");

    // Nothing to clean in this dataset
    assert_eq!(json["cleaning_report"].as_array().unwrap().len(), 0);

    // Analysis structure
    assert_eq!(json["analysis"]["shape"][0], 3);
    assert_eq!(json["analysis"]["shape"][1], 3);
    assert!(json["analysis"]["numeric_summary"].is_array());
    assert!(json["analysis"]["correlations"].is_object());

    // Chart specs: 2 histograms, heatmap, bar (label), scatter
    let charts = json["visualizations"].as_array().unwrap();
    assert_eq!(charts.len(), 5);
    for chart in charts {
        assert!(chart["type"].is_string());
        assert!(chart["title"].is_string());
        assert!(chart["data"].is_object());
    }

    // Interpretations: fixed order, strong anti-correlation reported
    let interpretations = json["interpretations"].as_array().unwrap();
    assert_eq!(interpretations[0], "Dataset contains 3 rows and 3 columns.");
    assert_eq!(interpretations[1], "No missing values found in the dataset.");
    let last = interpretations.last().unwrap().as_str().unwrap();
    assert!(last.contains("x and y (r=-1.00)"));

    // Staged copy was removed after processing
    assert!(staging_is_empty(staging.path()));

    server_handle.abort();
}

#[tokio::test]
async fn test_upload_messy_csv_reports_cleaning() {
    let (server_handle, _staging) = spawn_server(18482).await;

    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:18482/upload")
        .multipart(csv_form("messy.csv", MESSY_CSV))
        .send()
        .await
        .expect("Failed to send upload request");

    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let report: Vec<String> = json["cleaning_report"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();

    assert!(report.iter().any(|r| r.contains("Removed empty rows/columns")));
    assert!(report.iter().any(|r| r.contains("missing values")));
    assert!(report.iter().any(|r| r.contains("duplicate rows")));

    // Post-cleaning analysis sees no missing values
    let missing = json["analysis"]["missing_values"].as_object().unwrap();
    for (_, count) in missing {
        assert_eq!(count.as_u64().unwrap(), 0);
    }

    server_handle.abort();
}

#[tokio::test]
async fn test_upload_disallowed_extension() {
    let (server_handle, staging) = spawn_server(18483).await;

    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:18483/upload")
        .multipart(csv_form("data.txt", "a,b\n1,2\n"))
        .send()
        .await
        .expect("Failed to send upload request");

    assert_eq!(response.status(), 400);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        json["error"],
        "File type not allowed. Please upload CSV or Excel files."
    );

    // Nothing was written to the staging directory
    assert!(staging_is_empty(staging.path()));

    server_handle.abort();
}

#[tokio::test]
async fn test_upload_missing_file_field() {
    let (server_handle, _staging) = spawn_server(18484).await;

    let form = reqwest::multipart::Form::new().text("other", "value");

    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:18484/upload")
        .multipart(form)
        .send()
        .await
        .expect("Failed to send upload request");

    assert_eq!(response.status(), 400);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["error"], "No file provided");

    server_handle.abort();
}

#[tokio::test]
async fn test_upload_empty_filename() {
    let (server_handle, _staging) = spawn_server(18485).await;

    let part = reqwest::multipart::Part::bytes(CLEAN_CSV.as_bytes().to_vec()).file_name("");
    let form = reqwest::multipart::Form::new().part("file", part);

    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:18485/upload")
        .multipart(form)
        .send()
        .await
        .expect("Failed to send upload request");

    assert_eq!(response.status(), 400);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["error"], "No file selected");

    server_handle.abort();
}

#[tokio::test]
async fn test_upload_unparseable_content() {
    let (server_handle, _staging) = spawn_server(18486).await;

    // Invalid UTF-8 can never be parsed as CSV by any fallback strategy
    let garbage: Vec<u8> = vec![0xff, 0xfe, 0x00, 0x01, 0x02, 0xff];

    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:18486/upload")
        .multipart(csv_form("data.csv", garbage))
        .send()
        .await
        .expect("Failed to send upload request");

    assert_eq!(response.status(), 400);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("Error reading file:"));

    server_handle.abort();
}

#[tokio::test]
async fn test_upload_garbage_xlsx() {
    let (server_handle, _staging) = spawn_server(18487).await;

    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:18487/upload")
        .multipart(csv_form("data.xlsx", vec![0x00, 0x01, 0x02, 0x03]))
        .send()
        .await
        .expect("Failed to send upload request");

    assert_eq!(response.status(), 400);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(json["error"].as_str().unwrap().starts_with("Error reading file:"));

    server_handle.abort();
}

#[tokio::test]
async fn test_health_unaffected_by_prior_uploads() {
    let (server_handle, _staging) = spawn_server(18488).await;

    let client = reqwest::Client::new();

    // A failing upload first
    let response = client
        .post("http://127.0.0.1:18488/upload")
        .multipart(csv_form("data.txt", "x"))
        .send()
        .await
        .expect("Failed to send upload request");
    assert_eq!(response.status(), 400);

    // Health is still healthy
    let response = client
        .get("http://127.0.0.1:18488/health")
        .send()
        .await
        .expect("Failed to send health check request");
    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "data-analysis");

    server_handle.abort();
}
