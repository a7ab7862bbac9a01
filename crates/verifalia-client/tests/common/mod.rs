/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for verifalia-client tests

#![allow(dead_code)]

use serde_json::{Value, json};
use verifalia_client::{AuthProvider, ClientConfig, VerifaliaClient};
use wiremock::MockServer;

/// Nothing listens on port 1; connections are refused immediately
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

pub const TEST_USERNAME: &str = "batman";
pub const TEST_PASSWORD: &str = "robin";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client authenticated with the test credentials, rotating over `base_urls` in order
pub fn client_for(base_urls: &[&str]) -> VerifaliaClient {
    VerifaliaClient::with_config_and_base_urls(
        AuthProvider::basic(TEST_USERNAME, TEST_PASSWORD),
        ClientConfig::default(),
        base_urls,
    )
    .expect("test client should build")
}

/// Job overview payload as returned by the API
pub fn overview_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "createdOn": "2024-05-10T09:23:41.1234567Z",
        "submittedOn": "2024-05-10T09:23:41.1234567Z",
        "priority": 127,
        "name": "integration",
        "owner": "3b2e1f0a-5c6d-4e7f-8a9b-0c1d2e3f4a5b",
        "clientIP": "203.0.113.7",
        "quality": "Standard",
        "retention": "30.0:0:0",
        "deduplication": "Off",
        "status": status,
        "noOfEntries": 2
    })
}

/// Submission / retrieval payload with an optional first page of entries
pub fn job_json(id: &str, status: &str, with_entries: bool) -> Value {
    if !with_entries {
        return json!({ "overview": overview_json(id, status) });
    }
    json!({
        "overview": overview_json(id, status),
        "entries": {
            "meta": {"isTruncated": false},
            "data": [
                {
                    "index": 0,
                    "inputData": "batman@gmail.com",
                    "emailAddress": "batman@gmail.com",
                    "emailAddressLocalPart": "batman",
                    "emailAddressDomainPart": "gmail.com",
                    "isFreeEmailAddress": true,
                    "status": "Success",
                    "classification": "Deliverable"
                },
                {
                    "index": 1,
                    "inputData": "robin@@gmail",
                    "status": "InvalidCharacterInSequence",
                    "classification": "Undeliverable",
                    "syntaxFailureIndex": 6
                }
            ]
        }
    })
}

/// Credit balance payload
pub fn balance_json() -> Value {
    json!({ "creditPacks": 10.5, "freeCredits": 25, "freeCreditsResetIn": "1.2:3:4" })
}
