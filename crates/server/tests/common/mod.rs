//! Common test utilities for in-process API testing.
//!
//! This module provides a test fixture that builds the router with a
//! controllable converter injected, so handlers can be exercised without
//! binding a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use convertify_core::testing::MockConverter;
use convertify_core::{Config, Converter, ConverterConfig, LimitsConfig, SimulatedConverter};
use convertify_server::state::AppState;

/// Re-export fixtures for test convenience
#[allow(unused_imports)]
pub use convertify_core::testing::fixtures;

const BOUNDARY: &str = "convertify-test-boundary";

/// Test fixture for API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_convert() {
///     let fixture = TestFixture::new();
///
///     let response = fixture
///         .post_multipart("/api/convert", &[
///             Part::file("file", "report.docx", b"data"),
///             Part::text("targetFormat", "pdf"),
///         ])
///         .await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock converter, present when the fixture was built with one
    pub converter: Option<Arc<MockConverter>>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Raw body bytes
    pub bytes: Vec<u8>,
    /// Body parsed as JSON, `Null` when it is not JSON
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// One multipart form field.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

impl<'a> Part<'a> {
    pub fn text(name: &'a str, value: &'a str) -> Self {
        Part::Text(name, value)
    }

    pub fn file(name: &'a str, file_name: &'a str, bytes: &'a [u8]) -> Self {
        Part::File(name, file_name, bytes)
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Simulated processing delay for the real converter
    pub processing_delay_ms: u64,
    pub max_upload_bytes: u64,
    /// Use `MockConverter` instead of `SimulatedConverter`
    pub use_mock: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: 10,
            max_upload_bytes: LimitsConfig::default().max_upload_bytes,
            use_mock: false,
        }
    }
}

impl TestConfig {
    #[allow(dead_code)]
    pub fn with_mock() -> Self {
        Self {
            use_mock: true,
            ..Default::default()
        }
    }
}

impl TestFixture {
    /// Create a new test fixture with the simulated converter.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(test_config: TestConfig) -> Self {
        let config = Config {
            converter: ConverterConfig {
                processing_delay_ms: test_config.processing_delay_ms,
            },
            limits: LimitsConfig {
                max_upload_bytes: test_config.max_upload_bytes,
            },
            ..Default::default()
        };

        let (converter, mock): (Arc<dyn Converter>, Option<Arc<MockConverter>>) =
            if test_config.use_mock {
                let mock = Arc::new(MockConverter::new());
                (Arc::clone(&mock) as Arc<dyn Converter>, Some(mock))
            } else {
                (
                    Arc::new(SimulatedConverter::new(config.converter.clone())),
                    None,
                )
            };

        let state = Arc::new(AppState::new(config, converter));
        let router = convertify_server::api::create_router(state);

        Self {
            router,
            converter: mock,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a GET request with extra headers.
    #[allow(dead_code)]
    pub async fn get_with_headers(&self, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Send a multipart/form-data POST.
    pub async fn post_multipart(&self, path: &str, parts: &[Part<'_>]) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        let body: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            String::from_utf8_lossy(&$response.bytes)
        );
    };
}
