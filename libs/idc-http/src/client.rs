use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::Full;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;

use crate::builder::HttpClientBuilder;
use crate::config::TransportSecurity;
use crate::error::HttpError;
use crate::request::RequestBuilder;

/// The pooled hyper client underneath [`HttpClient`].
pub(crate) type HyperClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Immutable per-client state shared by all request builders.
pub(crate) struct Shared {
    pub(crate) request_timeout: Duration,
    pub(crate) max_body_size: usize,
    pub(crate) user_agent: http::HeaderValue,
    pub(crate) transport: TransportSecurity,
}

/// HTTP client with connection pooling and per-request timeouts.
///
/// `HttpClient` is `Clone + Send + Sync`; cloning is cheap (the hyper pool
/// and the shared configuration are reference-counted). There is no retry
/// machinery: every request is exactly one round trip.
///
/// Use [`HttpClientBuilder`] for custom configuration.
///
/// # Example
///
/// ```ignore
/// let client = HttpClient::builder().build()?;
/// let body: serde_json::Value = client
///     .get("https://api.example.com/roles")
///     .send()
///     .await?
///     .json()
///     .await?;
/// ```
#[derive(Clone)]
pub struct HttpClient {
    pub(crate) client: HyperClient,
    pub(crate) shared: Arc<Shared>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    ///
    /// # Errors
    /// Returns an error if TLS initialization fails
    pub fn new() -> Result<Self, HttpError> {
        HttpClientBuilder::new().build()
    }

    /// Create a builder for configuring the HTTP client
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Create a GET request builder
    ///
    /// The URL must be absolute (scheme + host); relative URLs are rejected
    /// with [`HttpError::InvalidUri`] at `send()` time. Query strings are
    /// composed externally and passed as part of the URL.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::GET, url)
    }

    /// Create a POST request builder
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::POST, url)
    }

    /// Create a PUT request builder
    pub fn put(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::PUT, url)
    }

    /// Create a PATCH request builder
    pub fn patch(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::PATCH, url)
    }

    /// Create a DELETE request builder
    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::DELETE, url)
    }

    /// Create a request builder for an arbitrary method
    pub fn request(&self, method: http::Method, url: &str) -> RequestBuilder {
        RequestBuilder::new(
            self.client.clone(),
            Arc::clone(&self.shared),
            method,
            url.to_owned(),
        )
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::HttpClientConfig;
    use httpmock::prelude::*;
    use serde_json::json;

    fn test_client() -> HttpClient {
        HttpClientBuilder::with_config(HttpClientConfig::for_testing())
            .build()
            .unwrap()
    }

    /// Compile-time assertion that `HttpClient` is shareable across tasks.
    #[test]
    fn client_is_send_sync_clone() {
        fn assert_traits<T: Send + Sync + Clone>() {}
        assert_traits::<HttpClient>();
    }

    #[tokio::test]
    async fn get_returns_status() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/test");
            then.status(200).json_body(json!({"ok": true}));
        });

        let client = test_client();
        let url = format!("{}/test", server.base_url());
        let resp = client.get(&url).send().await.unwrap();

        assert_eq!(resp.status(), http::StatusCode::OK);
    }

    #[tokio::test]
    async fn json_body_parses() {
        #[derive(serde::Deserialize)]
        struct TestResponse {
            name: String,
            value: i32,
        }

        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/json");
            then.status(200)
                .json_body(json!({"name": "test", "value": 42}));
        });

        let client = test_client();
        let url = format!("{}/json", server.base_url());

        let data: TestResponse = client.get(&url).send().await.unwrap().json().await.unwrap();
        assert_eq!(data.name, "test");
        assert_eq!(data.value, 42);
    }

    #[tokio::test]
    async fn post_json_sets_content_type() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST)
                .path("/users")
                .header("content-type", "application/json")
                .json_body(json!({"name": "Alice"}));
            then.status(201).json_body(json!({"id": 1}));
        });

        let client = test_client();
        let url = format!("{}/users", server.base_url());
        let resp = client
            .post(&url)
            .json(&json!({"name": "Alice"}))
            .unwrap()
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), http::StatusCode::CREATED);
    }

    #[tokio::test]
    async fn post_form_sets_content_type() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST)
                .path("/token")
                .header("content-type", "application/x-www-form-urlencoded")
                .body("grant_type=refresh_token&refresh_token=rt-1");
            then.status(200).json_body(json!({"access_token": "tok"}));
        });

        let client = test_client();
        let url = format!("{}/token", server.base_url());
        let resp = client
            .post(&url)
            .form(&[("grant_type", "refresh_token"), ("refresh_token", "rt-1")])
            .unwrap()
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), http::StatusCode::OK);
    }

    #[tokio::test]
    async fn delete_returns_no_content() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(DELETE).path("/resource/42");
            then.status(204);
        });

        let client = test_client();
        let url = format!("{}/resource/42", server.base_url());
        let resp = client.delete(&url).send().await.unwrap();

        assert_eq!(resp.status(), http::StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn put_and_patch_round_trip() {
        let server = MockServer::start();
        let _put = server.mock(|when, then| {
            when.method(PUT).path("/resource/1");
            then.status(200);
        });
        let _patch = server.mock(|when, then| {
            when.method(PATCH).path("/resource/1");
            then.status(200);
        });

        let client = test_client();
        let url = format!("{}/resource/1", server.base_url());
        assert_eq!(
            client.put(&url).send().await.unwrap().status(),
            http::StatusCode::OK
        );
        assert_eq!(
            client.patch(&url).send().await.unwrap().status(),
            http::StatusCode::OK
        );
    }

    #[tokio::test]
    async fn user_agent_header_is_sent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/ua")
                .header("user-agent", "custom/1.0");
            then.status(200);
        });

        let client = HttpClientBuilder::with_config(HttpClientConfig::for_testing())
            .user_agent("custom/1.0")
            .build()
            .unwrap();

        let url = format!("{}/ua", server.base_url());
        client.get(&url).send().await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn non_2xx_is_ok_from_send() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/error");
            then.status(404)
                .header("content-type", "application/json")
                .body(r#"{"title": "Not Found"}"#);
        });

        let client = test_client();
        let url = format!("{}/error", server.base_url());

        // send() returns Ok for every HTTP status; classification is the
        // caller's job (error_for_status/checked reads).
        let resp = client.get(&url).send().await.unwrap();
        assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);

        let err = resp.json::<serde_json::Value>().await.unwrap_err();
        match err {
            HttpError::HttpStatus {
                status,
                body_preview,
                content_type,
            } => {
                assert_eq!(status, http::StatusCode::NOT_FOUND);
                assert!(body_preview.contains("Not Found"));
                assert_eq!(content_type.as_deref(), Some("application/json"));
            }
            other => panic!("expected HttpStatus, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn body_size_limit_enforced() {
        let server = MockServer::start();
        let large_body = "x".repeat(64 * 1024);
        let _m = server.mock(|when, then| {
            when.method(GET).path("/large");
            then.status(200).body(&large_body);
        });

        let client = HttpClientBuilder::with_config(HttpClientConfig::for_testing())
            .max_body_size(1024)
            .build()
            .unwrap();

        let url = format!("{}/large", server.base_url());
        let result = client.get(&url).send().await.unwrap().bytes().await;

        assert!(matches!(result, Err(HttpError::BodyTooLarge { .. })));
    }

    #[tokio::test]
    async fn concurrent_requests_share_one_client() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/concurrent");
            then.status(200).body("ok");
        });

        let client = test_client();
        let url = format!("{}/concurrent", server.base_url());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let client = client.clone();
                let url = url.clone();
                tokio::spawn(async move { client.get(&url).send().await })
            })
            .collect();

        for handle in handles {
            let resp = handle.await.unwrap().unwrap();
            assert_eq!(resp.status(), http::StatusCode::OK);
        }
    }
}
