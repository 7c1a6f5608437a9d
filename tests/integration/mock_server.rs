//! Mock HTTP server setup for integration tests

use mockito::{Matcher, Mock, Server, ServerGuard};
use review_enrich::{TextGenClient, TextGenClientBuilder};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const TEST_KEY: &str = "sk-test";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub endpoint: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let endpoint = format!("{}{}", server.url(), COMPLETIONS_PATH);
        Self {
            server: Arc::new(Mutex::new(server)),
            endpoint,
        }
    }

    /// Builder pointed at the mock server, with short test-friendly delays.
    pub fn builder(&self) -> TextGenClientBuilder {
        TextGenClientBuilder::new()
            .endpoint(&self.endpoint)
            .api_key(TEST_KEY)
            .model("test/model")
            .attempt_timeout(Duration::from_secs(5))
            .backoff_base(Duration::from_millis(10))
    }

    pub fn client(&self) -> TextGenClient {
        self.builder().build().expect("client builds")
    }

    /// Mock a JSON response with the given status, expected to be hit exactly `hits` times.
    pub async fn mock_json(&self, status: usize, body: &str, hits: usize) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", COMPLETIONS_PATH)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }

    /// Mock a successful flat `{content}` response that also checks the request shape.
    pub async fn mock_content(&self, content: &str, hits: usize) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", COMPLETIONS_PATH)
            .match_header("authorization", format!("Bearer {}", TEST_KEY).as_str())
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "test/model",
                "stream": false,
                "temperature": 0.7,
                "top_p": 0.8,
                "max_tokens": 500
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "content": content }).to_string())
            .expect(hits)
            .create_async()
            .await
    }

    /// Mock an error response
    pub async fn mock_error(&self, status: usize, hits: usize) -> Mock {
        self.mock_json(
            status,
            r#"{"error":{"message":"Test error"}}"#,
            hits,
        )
        .await
    }
}
