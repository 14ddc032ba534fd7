//! End-to-end tests for ontology download
//!
//! The fixture ontology is served by a mock HTTP server.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn fixture_body() -> String {
    std::fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mini.obo")).unwrap()
}

fn godag(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("godag").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("GODAG_LOCAL_OBO")
        .env_remove("GODAG_RELEASE")
        .env("GODAG_TIMEOUT_SECS", "10");
    cmd
}

#[tokio::test]
async fn test_download_and_convert() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ontology/go-basic.obo"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixture_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("graph.tsv");

    godag(&dir)
        .arg(&output)
        .arg("--use-id")
        .arg("--url")
        .arg(format!("{}/ontology/go-basic.obo", mock_server.uri()))
        .assert()
        .success()
        .stdout(predicate::str::contains("using ids"));

    let rows = std::fs::read_to_string(&output).unwrap();
    assert!(rows.contains("GO:0008150\tGO:0008152\tGO:0009987\n"));
}

#[tokio::test]
async fn test_url_from_environment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/go-basic.obo"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixture_body()))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("graph.tsv");

    godag(&dir)
        .env("GODAG_OBO_URL", format!("{}/go-basic.obo", mock_server.uri()))
        .arg(&output)
        .assert()
        .success();

    assert!(output.exists());
}

#[tokio::test]
async fn test_http_error_exits_with_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("graph.tsv");

    godag(&dir)
        .arg(&output)
        .arg("--url")
        .arg(format!("{}/ontology/go-basic.obo", mock_server.uri()))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("500"));

    assert!(!output.exists());
}

#[tokio::test]
async fn test_non_http_url_is_rejected() {
    let dir = TempDir::new().unwrap();

    godag(&dir)
        .arg(dir.path().join("graph.tsv"))
        .arg("--url")
        .arg("ftp://ftp.geneontology.org/go-basic.obo")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("http or https"));
}
