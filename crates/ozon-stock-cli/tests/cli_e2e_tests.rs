//! End-to-end tests for the ozon-stock binary
//!
//! These tests run the real binary against a mock Seller API and cover:
//! - `check` success and failure exit codes
//! - Missing credentials without a terminal
//! - `pull` writing XLSX and CSV files
//! - `pull` with no data, a rejected request or a failed connection test
//! - `--no-export`

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const STOCK_PATH: &str = "/v2/analytics/stock_on_warehouses";

/// Binary with a clean environment, running inside `dir`
fn ozon_stock(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ozon-stock").unwrap();
    cmd.current_dir(dir.path());
    for var in [
        "OZON_API_URL",
        "OZON_CLIENT_ID",
        "OZON_API_KEY",
        "OZON_API_TIMEOUT_SECS",
        "OZON_PAGE_SIZE",
        "OZON_MAX_OFFSET",
        "LOG_LEVEL",
        "LOG_OUTPUT",
        "LOG_FORMAT",
        "LOG_FILTER",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn with_server(cmd: &mut Command, server: &MockServer) {
    cmd.args(["--api-url", &server.uri(), "--client-id", "42", "--api-key", "secret"]);
}

/// A page of `n` rows in the API's shape, mixing primary and fallback keys
fn stock_page(n: usize) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            if i % 2 == 0 {
                json!({
                    "product_name": format!("Товар {}", i),
                    "offer_id": format!("ART-{}", i),
                    "sku": 100_000 + i,
                    "warehouse_name": "Хоругвино",
                    "free_to_sell_amount": 10,
                    "reserved": 1,
                    "promised_amount": 0
                })
            } else {
                json!({
                    "item_name": format!("Товар {}", i),
                    "item_code": format!("ART-{}", i),
                    "sku": 100_000 + i,
                    "warehouse_name": "Тверь",
                    "quantity": 5,
                    "reserved_quantity": 2
                })
            }
        })
        .collect();
    json!({ "result": { "rows": rows } })
}

/// Answer the one-row connection test that `pull` sends first
async fn mount_connection_test(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(STOCK_PATH))
        .and(body_json(json!({ "limit": 1, "offset": 0, "warehouse_type": "FBO" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(stock_page(1)))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Check Tests
// ============================================================================

#[tokio::test]
async fn test_check_success() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path(STOCK_PATH))
        .and(header("Client-Id", "42"))
        .and(header("Api-Key", "secret"))
        .and(body_json(json!({ "limit": 1, "offset": 0, "warehouse_type": "FBO" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(stock_page(1)))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = ozon_stock(&dir);
    with_server(&mut cmd, &server);
    cmd.arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Connection successful"));
}

#[tokio::test]
async fn test_check_rejected_credentials() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path(STOCK_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("Api-key is deactivated"))
        .mount(&server)
        .await;

    let mut cmd = ozon_stock(&dir);
    with_server(&mut cmd, &server);
    cmd.arg("check")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Api-key is deactivated"))
        .stderr(predicate::str::contains("HTTP 403"));
}

#[test]
fn test_missing_credentials_fail_without_terminal() {
    let dir = TempDir::new().unwrap();

    ozon_stock(&dir)
        .args(["--api-url", "http://127.0.0.1:1", "check"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OZON_CLIENT_ID"));
}

#[test]
fn test_credentials_from_env() {
    let dir = TempDir::new().unwrap();

    // Resolves credentials, then fails on the unreachable server
    ozon_stock(&dir)
        .env("OZON_CLIENT_ID", "42")
        .env("OZON_API_KEY", "secret")
        .env("OZON_API_URL", "http://127.0.0.1:1")
        .env("OZON_API_TIMEOUT_SECS", "2")
        .arg("check")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Connection error"));
}

// ============================================================================
// Pull Tests
// ============================================================================

#[tokio::test]
async fn test_pull_writes_xlsx() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_connection_test(&server).await;

    Mock::given(method("POST"))
        .and(path(STOCK_PATH))
        .and(body_json(json!({ "limit": 1000, "offset": 0, "warehouse_type": "FBO" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(stock_page(4)))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = ozon_stock(&dir);
    with_server(&mut cmd, &server);
    cmd.args(["pull", "--output", "stock.xlsx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Export completed"))
        .stdout(predicate::str::contains("Хоругвино"));

    assert!(dir.path().join("stock.xlsx").exists());
}

#[tokio::test]
async fn test_pull_default_filename() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stock_page(2)))
        .mount(&server)
        .await;

    let mut cmd = ozon_stock(&dir);
    with_server(&mut cmd, &server);
    cmd.arg("pull").assert().success();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("ozon_stock_FBO_"));
    assert!(names[0].ends_with(".xlsx"));
}

#[tokio::test]
async fn test_pull_paginates_and_writes_csv() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    for (offset, rows) in [(0, 2), (2, 2), (4, 1)] {
        Mock::given(method("POST"))
            .and(path(STOCK_PATH))
            .and(body_json(json!({ "limit": 2, "offset": offset, "warehouse_type": "FBO" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(stock_page(rows)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let mut cmd = ozon_stock(&dir);
    with_server(&mut cmd, &server);
    cmd.args([
        "pull",
        "--skip-check",
        "--page-size",
        "2",
        "--format",
        "csv",
        "--output",
        "stock.csv",
    ])
        .assert()
        .success();

    let content = std::fs::read_to_string(dir.path().join("stock.csv")).unwrap();
    let lines: Vec<&str> = content.trim_start_matches('\u{feff}').lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(
        lines[0],
        "product_name,offer_id,sku,warehouse_name,free_to_sell_amount,reserved,promised_amount"
    );
    assert_eq!(lines[2], "Товар 1,ART-1,100001,Тверь,5,2,0");
}

#[tokio::test]
async fn test_pull_stops_when_connection_test_fails() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path(STOCK_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid Api-Key"))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = ozon_stock(&dir);
    with_server(&mut cmd, &server);
    cmd.args(["pull", "--output", "stock.xlsx"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("invalid Api-Key"))
        .stdout(predicate::str::contains("Fetching FBO stock").not());

    assert!(!dir.path().join("stock.xlsx").exists());
}

#[tokio::test]
async fn test_pull_no_export() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stock_page(3)))
        .mount(&server)
        .await;

    let mut cmd = ozon_stock(&dir);
    with_server(&mut cmd, &server);
    cmd.args(["pull", "--no-export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stock summary"))
        .stdout(predicate::str::contains("Export completed").not());

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_pull_empty_result_fails() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": { "rows": [] } })))
        .mount(&server)
        .await;

    let mut cmd = ozon_stock(&dir);
    with_server(&mut cmd, &server);
    cmd.args(["pull", "--output", "stock.xlsx"])
        .assert()
        .failure()
        .code(1);

    assert!(!dir.path().join("stock.xlsx").exists());
}

#[tokio::test]
async fn test_pull_rejected_request_fails() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let mut cmd = ozon_stock(&dir);
    with_server(&mut cmd, &server);
    cmd.args(["pull", "--output", "stock.xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 403"));

    assert!(!dir.path().join("stock.xlsx").exists());
}

#[test]
fn test_invalid_page_size_rejected() {
    let dir = TempDir::new().unwrap();

    ozon_stock(&dir)
        .args(["--client-id", "42", "--api-key", "secret", "pull", "--page-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page size"));
}
