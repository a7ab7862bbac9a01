/*
[INPUT]:  verifalia-cli binary, mock HTTP server, temporary config files
[OUTPUT]: End-to-end tests of the command line client
[POS]:    Integration test layer - binary against a mock API
[UPDATE]: When adding commands or changing output format
*/

use std::path::PathBuf;
use std::process::Output;

use serde_json::{Value, json};
use tokio::process::Command;
use tokio_test::assert_ok;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(name: &str, server: &MockServer) -> PathBuf {
    let config_path = std::env::temp_dir().join(format!(
        "verifalia-cli-{}-{name}.yaml",
        std::process::id()
    ));
    let content = format!(
        "auth:\n  username: batman\n  password: robin\nbase_urls:\n  - {}\n",
        server.uri()
    );
    std::fs::write(&config_path, content).expect("write test config");
    config_path
}

async fn run_cli(config_path: &PathBuf, args: &[&str]) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_verifalia-cli");
    let output = Command::new(binary_path)
        .arg("--config")
        .arg(config_path)
        .args(args)
        .env_remove("VERIFALIA_USERNAME")
        .env_remove("VERIFALIA_PASSWORD")
        .env_remove("VERIFALIA_APP_KEY")
        .output()
        .await
        .expect("Failed to start verifalia-cli binary");
    let _ = std::fs::remove_file(config_path);
    output
}

fn overview(id: &str) -> Value {
    json!({
        "id": id,
        "createdOn": "2024-05-10T09:23:41Z",
        "submittedOn": "2024-05-10T09:23:41Z",
        "quality": "Standard",
        "retention": "30.0:0:0",
        "deduplication": "Off",
        "status": "Completed",
        "noOfEntries": 1
    })
}

#[tokio::test]
async fn balance_command_prints_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/credits/balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "creditPacks": 42,
            "freeCredits": 100,
            "freeCreditsResetIn": "5:0:0"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config_path = write_config("balance", &server);
    let output = run_cli(&config_path, &["balance"]).await;

    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    let printed: Value = assert_ok!(serde_json::from_slice(&output.stdout));
    assert_eq!(printed["freeCreditsResetIn"], "5:0:0");
}

#[tokio::test]
async fn list_command_stops_at_max() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/email-validations"))
        .and(query_param("sort", "-createdOn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"cursor": "next", "isTruncated": true},
            "data": [overview("job-2"), overview("job-1")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config_path = write_config("list", &server);
    let output = run_cli(&config_path, &["list", "--newest-first", "--max", "2"]).await;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let ids: Vec<String> = stdout
        .lines()
        .map(|line| {
            let job: Value = assert_ok!(serde_json::from_str(line));
            job["id"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(ids, vec!["job-2", "job-1"]);
}

#[tokio::test]
async fn rejected_credentials_fail_the_command() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/credits/balance"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let config_path = write_config("unauthorized", &server);
    let output = run_cli(&config_path, &["balance"]).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Can't authenticate to Verifalia"), "stderr: {stderr}");
}
