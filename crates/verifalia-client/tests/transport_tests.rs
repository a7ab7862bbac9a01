/*
[INPUT]:  Mock HTTP servers and unreachable endpoints
[OUTPUT]: Test results for endpoint rotation, failover and authentication
[POS]:    Integration tests - multiplexed transport
[UPDATE]: When failover policy or default headers change
*/

mod common;

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use common::{
    TEST_PASSWORD, TEST_USERNAME, UNREACHABLE_URL, balance_json, client_for, setup_mock_server,
};
use tokio_test::assert_ok;
use verifalia_client::{
    AuthProvider, CancellationToken, ClientConfig, VerifaliaClient, VerifaliaError,
};
use wiremock::matchers::{header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_balance(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/credits/balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(balance_json()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fails_over_to_next_endpoint() {
    let server = setup_mock_server().await;
    mount_balance(&server, 1).await;

    let uri = server.uri();
    let client = client_for(&[UNREACHABLE_URL, UNREACHABLE_URL, &uri]);
    let balance = assert_ok!(client.get_balance(None).await);
    assert_eq!(balance.credit_packs.to_string(), "10.5");
}

#[tokio::test]
async fn test_rotation_visits_every_endpoint_before_repeating() {
    let first = setup_mock_server().await;
    let second = setup_mock_server().await;
    let third = setup_mock_server().await;
    for server in [&first, &second, &third] {
        mount_balance(server, 1).await;
    }

    let (a, b, c) = (first.uri(), second.uri(), third.uri());
    let client = client_for(&[&a, &b, &c]);
    for _ in 0..3 {
        assert_ok!(client.get_balance(None).await);
    }
}

#[tokio::test]
async fn test_clones_share_rotation() {
    let first = setup_mock_server().await;
    let second = setup_mock_server().await;
    mount_balance(&first, 1).await;
    mount_balance(&second, 1).await;

    let (a, b) = (first.uri(), second.uri());
    let client = client_for(&[&a, &b]);
    let clone = client.clone();
    assert_ok!(client.get_balance(None).await);
    assert_ok!(clone.get_balance(None).await);
}

#[tokio::test]
async fn test_unauthorized_stops_failover() {
    let rejecting = setup_mock_server().await;
    let healthy = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/credits/balance"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&rejecting)
        .await;
    mount_balance(&healthy, 0).await;

    let (a, b) = (rejecting.uri(), healthy.uri());
    let err = client_for(&[&a, &b]).get_balance(None).await.unwrap_err();
    assert!(err.is_auth_error());
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn test_forbidden_is_auth_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/credits/balance"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&[&server.uri()])
        .get_balance(None)
        .await
        .unwrap_err();
    assert!(matches!(err, VerifaliaError::Authentication { status: 403 }));
}

#[tokio::test]
async fn test_server_errors_are_not_failed_over() {
    let failing = setup_mock_server().await;
    let healthy = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/credits/balance"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&failing)
        .await;
    mount_balance(&healthy, 0).await;

    let (a, b) = (failing.uri(), healthy.uri());
    let err = client_for(&[&a, &b]).get_balance(None).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn test_all_endpoints_unreachable() {
    let client = client_for(&[UNREACHABLE_URL, UNREACHABLE_URL]);
    let err = client.get_balance(None).await.unwrap_err();

    match &err {
        VerifaliaError::AllEndpointsFailed { failures } => {
            assert_eq!(failures.len(), 2);
            assert!(failures.iter().all(|failure| failure.url.starts_with(UNREACHABLE_URL)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.is_retryable());
    assert!(err.to_string().starts_with("All the base URIs are unreachable."));
}

#[tokio::test]
async fn test_default_headers_and_basic_auth() {
    let server = setup_mock_server().await;
    let credentials = BASE64.encode(format!("{TEST_USERNAME}:{TEST_PASSWORD}"));
    Mock::given(method("GET"))
        .and(path("/credits/balance"))
        .and(header("accept", "application/json"))
        .and(header("authorization", format!("Basic {credentials}").as_str()))
        .and(header_regex("user-agent", "^verifalia-rest-client/rust/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(balance_json()))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(client_for(&[&server.uri()]).get_balance(None).await);
}

#[tokio::test]
async fn test_empty_username_fails_before_network() {
    let first = setup_mock_server().await;
    let second = setup_mock_server().await;
    mount_balance(&first, 0).await;
    mount_balance(&second, 0).await;

    let client = VerifaliaClient::with_config_and_base_urls(
        AuthProvider::basic("", "secret"),
        ClientConfig::default(),
        &[&first.uri(), &second.uri()],
    )
    .unwrap();
    let err = client.get_balance(None).await.unwrap_err();
    assert!(matches!(err, VerifaliaError::Config(_)));
}

#[tokio::test]
async fn test_cancellation_interrupts_in_flight_request() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/credits/balance"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(balance_json())
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let cancellation = CancellationToken::new();
    let trigger = cancellation.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let client = client_for(&[&server.uri()]);
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        client.get_balance(Some(cancellation)),
    )
    .await
    .expect("cancellation should end the call promptly");
    assert!(matches!(result, Err(VerifaliaError::Cancelled)));
}

#[tokio::test]
async fn test_already_cancelled_token_sends_nothing() {
    let server = setup_mock_server().await;
    mount_balance(&server, 0).await;

    let cancellation = CancellationToken::new();
    cancellation.cancel();
    let err = client_for(&[&server.uri()])
        .get_balance(Some(cancellation))
        .await
        .unwrap_err();
    assert!(matches!(err, VerifaliaError::Cancelled));
}
