use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use temu_seller_client::auth::{AntiContentProvider, SignatureError, StaticAntiContent};
use temu_seller_client::config::RetryConfig;
use temu_seller_client::error::SellerError;
use temu_seller_client::rest::SellerClient;
use temu_seller_client::rest::auth::LoginRequest;

const LOGIN_PATH: &str = "/bg/quiet/api/mms/login";

fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_retries: 3,
        min_wait: Duration::from_millis(1),
        max_wait: Duration::from_millis(5),
    }
}

fn client_with(server_uri: &str, signer: Arc<dyn AntiContentProvider>) -> SellerClient {
    SellerClient::builder()
        .base_url(server_uri)
        .seller_central_base_url(server_uri)
        .retry(fast_retry())
        .anti_content(signer)
        .build()
        .unwrap()
}

fn build_client(server: &MockServer) -> SellerClient {
    client_with(&server.uri(), Arc::new(StaticAntiContent::new("token")))
}

/// Signer yielding `ac-0`, `ac-1`, ... and failing from call `fail_from` on.
fn counting_signer(fail_from: Option<usize>) -> (Arc<dyn AntiContentProvider>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let signer: Arc<dyn AntiContentProvider> = Arc::new(move |_body: Option<&[u8]>| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        match fail_from {
            Some(limit) if n >= limit => Err(SignatureError::new("signer offline")),
            _ => Ok(format!("ac-{n}")),
        }
    });
    (signer, calls)
}

fn login_request() -> LoginRequest {
    LoginRequest::new("13800000000", "cipher")
}

fn success_body() -> serde_json::Value {
    serde_json::json!({ "success": true, "result": { "accountId": 123 } })
}

fn system_exception(msg: &str) -> serde_json::Value {
    serde_json::json!({ "success": false, "errorCode": 4000000, "errorMsg": msg })
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

#[tokio::test]
async fn test_rate_limit_retried_three_times_then_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.login(&login_request()).await.unwrap_err();

    assert!(matches!(err, SellerError::RateLimitExceeded { .. }));
    assert_eq!(request_count(&server).await, 4);
}

#[tokio::test]
async fn test_rate_limit_then_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let login = client.login(&login_request()).await.unwrap();

    assert_eq!(login.account_id, 123);
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_system_exception_retried_in_any_case() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(system_exception("system_exception")))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(system_exception("System_Exception")))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let login = client.login(&login_request()).await.unwrap();

    assert_eq!(login.account_id, 123);
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_system_exception_exhausted_becomes_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(system_exception("SYSTEM_EXCEPTION")))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.login(&login_request()).await.unwrap_err();

    match err {
        SellerError::Api(api) => assert!(api.is_system_exception()),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(request_count(&server).await, 4);
}

#[tokio::test]
async fn test_other_failures_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "errorCode": 4000000,
            "errorMsg": "  password incorrect \n"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.login(&login_request()).await.unwrap_err();

    match err {
        SellerError::Api(api) => {
            assert_eq!(api.code, 4000000);
            assert_eq!(api.message, "password incorrect");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_server_error_without_envelope_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.login(&login_request()).await.unwrap_err();

    assert!(matches!(err, SellerError::InvalidResponse(ref m) if m.contains("503")));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_anti_content_recomputed_on_every_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(system_exception("SYSTEM_EXCEPTION")))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .mount(&server)
        .await;

    let (signer, calls) = counting_signer(None);
    let client = client_with(&server.uri(), signer);
    client.login(&login_request()).await.unwrap();

    let sent: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| {
            r.headers
                .get("anti-content")
                .expect("Anti-Content header")
                .to_str()
                .unwrap()
                .to_string()
        })
        .collect();

    assert_eq!(sent, vec!["ac-0", "ac-1", "ac-2"]);
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    let bodies: Vec<Vec<u8>> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.body)
        .collect();
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn test_signature_failure_fails_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(0)
        .mount(&server)
        .await;

    let (signer, calls) = counting_signer(Some(0));
    let client = client_with(&server.uri(), signer);
    let err = client.login(&login_request()).await.unwrap_err();

    assert!(matches!(err, SellerError::Signature(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_signature_refresh_failure_stops_retrying() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(system_exception("SYSTEM_EXCEPTION")))
        .mount(&server)
        .await;

    let (signer, calls) = counting_signer(Some(1));
    let client = client_with(&server.uri(), signer);
    let err = client.login(&login_request()).await.unwrap_err();

    assert!(matches!(err, SellerError::Api(ref api) if api.is_system_exception()));
    assert_eq!(request_count(&server).await, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_retries_disabled() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let client = SellerClient::builder()
        .base_url(server.uri())
        .retry(RetryConfig::disabled())
        .anti_content(Arc::new(StaticAntiContent::new("token")))
        .build()
        .unwrap();
    let err = client.login(&login_request()).await.unwrap_err();

    assert!(matches!(
        err,
        SellerError::RateLimitExceeded {
            retry_after_secs: Some(30)
        }
    ));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_transport_error_not_retried() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let (signer, calls) = counting_signer(None);
    let client = client_with(&uri, signer);
    let err = client.login(&login_request()).await.unwrap_err();

    assert!(matches!(
        err,
        SellerError::HttpMiddleware(_) | SellerError::Http(_)
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_dropping_the_call_cancels_retries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let (signer, calls) = counting_signer(None);
    let client = client_with(&server.uri(), signer);
    let request = login_request();

    let outcome =
        tokio::time::timeout(Duration::from_millis(200), client.login(&request)).await;

    assert!(outcome.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(request_count(&server).await <= 1);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(8)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.login(&login_request()).await
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().account_id, 123);
    }
}
