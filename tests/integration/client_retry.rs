//! Integration tests for the text-generation client: parsing, retry, backoff, deadlines.

use crate::integration::mock_server::MockServerFixture;
use review_enrich::client::FailureKind;
use review_enrich::{Error, GenerateOptions, TextGenClientBuilder, TextGenerator};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

#[tokio::test]
async fn test_flat_content_and_request_shape() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_content("  Thanks for visiting!  ", 1).await;

    let client = fixture.client();
    let text = client.generate("say thanks").await.unwrap();

    assert_eq!(text, "Thanks for visiting!");
    assert_eq!(client.model(), "test/model");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_nested_choices_content() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json(
            200,
            r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"nested reply"}}]}"#,
            1,
        )
        .await;

    let text = fixture.client().generate("hi").await.unwrap();
    assert_eq!(text, "nested reply");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rate_limited_once_then_success() {
    let fixture = MockServerFixture::new().await;
    let base = Duration::from_millis(200);

    let limited = fixture.mock_error(429, 1).await;
    let ok = fixture.mock_content("after backoff", 1).await;

    let client = fixture.builder().backoff_base(base).build().unwrap();
    let start = Instant::now();
    let text = client.generate("hello").await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(text, "after backoff");
    assert!(
        elapsed >= base,
        "elapsed {:?} should include the first backoff {:?}",
        elapsed,
        base
    );
    limited.assert_async().await;
    ok.assert_async().await;
}

#[tokio::test]
async fn test_server_errors_exhaust_shared_budget() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_error(500, 3).await;

    let client = fixture.builder().max_retries(2).build().unwrap();
    let err = client.generate("hello").await.unwrap_err();

    match err {
        Error::AiUnavailable {
            attempts,
            last_failure,
            ..
        } => {
            assert_eq!(attempts, 3);
            assert_eq!(
                last_failure,
                Some(FailureKind::HttpStatus {
                    status: 500,
                    message: "Test error".to_string()
                })
            );
        }
        other => panic!("expected AiUnavailable, got {other}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_content_is_unavailable_not_empty_string() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_json(200, r#"{"content":""}"#, 2).await;

    let client = fixture.builder().max_retries(1).build().unwrap();
    let err = client.generate("hello").await.unwrap_err();

    assert!(err.is_ai_unavailable());
    assert!(err.to_string().contains("malformed response"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_credential_skips_network() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_content("never", 0).await;

    let client = fixture.builder().without_api_key().build().unwrap();
    let err = client.generate("hello").await.unwrap_err();

    match err {
        Error::AiUnavailable { attempts, .. } => assert_eq!(attempts, 0),
        other => panic!("expected AiUnavailable, got {other}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_per_call_retry_override() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_error(503, 1).await;

    let client = fixture.builder().max_retries(5).build().unwrap();
    let err = client
        .generate_with("hello", GenerateOptions::default().max_retries(0))
        .await
        .unwrap_err();

    assert!(err.is_ai_unavailable());
    mock.assert_async().await;
}

/// Accepts connections and never answers. Returns the endpoint and the accept task.
async fn hanging_server() -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hold = tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });
    (format!("http://{}/v1/chat/completions", addr), hold)
}

#[tokio::test]
async fn test_attempt_deadline_bounds_hanging_server() {
    let (endpoint, hold) = hanging_server().await;

    let client = TextGenClientBuilder::new()
        .endpoint(endpoint)
        .api_key("sk-test")
        .backoff_base(Duration::from_millis(10))
        .build()
        .unwrap();

    let start = Instant::now();
    let err = client
        .generate_with(
            "hello",
            GenerateOptions::default()
                .attempt_timeout(Duration::from_millis(150))
                .max_retries(1),
        )
        .await
        .unwrap_err();

    match err {
        Error::AiUnavailable {
            attempts,
            last_failure,
            ..
        } => {
            assert_eq!(attempts, 2);
            assert_eq!(
                last_failure,
                Some(FailureKind::Timeout(Duration::from_millis(150)))
            );
        }
        other => panic!("expected AiUnavailable, got {other}"),
    }
    assert!(start.elapsed() < Duration::from_secs(5));
    hold.abort();
}

#[tokio::test]
async fn test_per_call_deadline_longer_than_configured_is_honoured() {
    let (endpoint, hold) = hanging_server().await;

    let client = TextGenClientBuilder::new()
        .endpoint(endpoint)
        .api_key("sk-test")
        .attempt_timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    // Well past the configured deadline plus any fixed slack an HTTP client might add.
    let deadline = Duration::from_secs(6);
    let start = Instant::now();
    let err = client
        .generate_with(
            "hello",
            GenerateOptions::default()
                .attempt_timeout(deadline)
                .max_retries(0),
        )
        .await
        .unwrap_err();
    let elapsed = start.elapsed();

    match err {
        Error::AiUnavailable {
            attempts,
            last_failure,
            ..
        } => {
            assert_eq!(attempts, 1);
            assert_eq!(last_failure, Some(FailureKind::Timeout(deadline)));
        }
        other => panic!("expected AiUnavailable, got {other}"),
    }
    assert!(elapsed >= deadline, "attempt cut short after {:?}", elapsed);
    hold.abort();
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_content("shared", 8).await;

    let client = fixture.client();
    let calls = (0..8).map(|i| {
        let client = &client;
        async move { client.generate(&format!("prompt {}", i)).await }
    });
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(|r| r.as_deref().ok() == Some("shared")));
    mock.assert_async().await;
}
