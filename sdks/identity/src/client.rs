use std::sync::Arc;

use http::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use idc_auth::{AuthError, TokenProvider};
use idc_errors::Problem;
use idc_http::{HttpClient, HttpClientBuilder, HttpClientConfig};

use crate::config::ApiConfig;
use crate::error::ApiClientError;
use crate::request::{ApiRequest, RequestBody};

/// The request gateway: the single chokepoint for every backend call.
///
/// Stateless aside from immutable configuration (base URL, default headers)
/// and the injected [`TokenProvider`] handle. The provider is consulted on
/// every authenticated request — the gateway never caches tokens itself, so
/// freshness stays entirely the provider's concern.
///
/// `execute` never retries; a failed call surfaces as one
/// [`ApiClientError`] and retry is the caller's decision.
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    default_headers: Vec<(String, String)>,
    scopes: Vec<String>,
    token_provider: Option<Arc<dyn TokenProvider>>,
}

impl ApiClient {
    /// Build a gateway from the given configuration with its own transport
    /// client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Transport`] if the transport client cannot
    /// be built (TLS initialization).
    pub fn new(config: ApiConfig) -> Result<Self, ApiClientError> {
        let http = HttpClientBuilder::new()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Build a gateway on top of an existing transport client.
    ///
    /// Use this to share one connection pool across gateways, or to inject
    /// a test-configured client.
    #[must_use]
    pub fn with_http_client(config: ApiConfig, http: HttpClient) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            default_headers: config.default_headers,
            scopes: Vec::new(),
            token_provider: None,
        }
    }

    /// Build a gateway for tests (plain-HTTP transport allowed).
    ///
    /// # Panics
    ///
    /// Panics if the transport client cannot be built; acceptable in the
    /// test contexts this is meant for.
    #[must_use]
    pub fn for_testing(config: ApiConfig) -> Self {
        let http = HttpClientBuilder::with_config(HttpClientConfig::for_testing())
            .build()
            .expect("test HTTP client must build");
        Self::with_http_client(config, http)
    }

    /// Inject the credential provider and the permission scopes requested
    /// with every authenticated call.
    #[must_use]
    pub fn with_token_provider(
        mut self,
        provider: Arc<dyn TokenProvider>,
        scopes: Vec<String>,
    ) -> Self {
        self.token_provider = Some(provider);
        self.scopes = scopes;
        self
    }

    /// The configured base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute one request descriptor.
    ///
    /// Processing: compose URL → merge headers (defaults, then overrides,
    /// then bearer token when required) → serialize body → issue the
    /// request → classify the response.
    ///
    /// Success classification: 204 or an empty payload deserializes from
    /// JSON `null` (so `()` and `Option<_>` targets work without a parse of
    /// raw bytes); a JSON content type parses the body; anything else is
    /// returned as raw text (deserialized from a JSON string value).
    ///
    /// # Errors
    ///
    /// - [`ApiClientError::Authentication`] — the descriptor requires
    ///   authentication and no provider is set or acquisition failed. No
    ///   network request is issued.
    /// - [`ApiClientError::Api`] — the backend answered outside 200–299;
    ///   carries the numeric status and the parsed (or synthesized)
    ///   problem details.
    /// - [`ApiClientError::Transport`] — the request never completed, or a
    ///   (de)serialization step failed.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ApiClientError> {
        let url = format!("{}{}", self.base_url, request.endpoint);

        // Defaults first, then per-request overrides (same-name override
        // wins over a default).
        let mut headers = self.default_headers.clone();
        for (name, value) in request.headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }

        if request.require_auth {
            let provider = self.token_provider.as_ref().ok_or_else(|| {
                ApiClientError::Authentication(AuthError::ConfigError(
                    "authentication provider not set".into(),
                ))
            })?;
            let token = provider.acquire_token(&self.scopes).await?;
            headers.push(("authorization".to_owned(), format!("Bearer {}", token.expose())));
        }

        // The transport sets the boundary-bearing content type for
        // multipart bodies; any inherited content-type default must go.
        if matches!(request.body, Some(RequestBody::Multipart(_))) {
            headers.retain(|(name, _)| !name.eq_ignore_ascii_case("content-type"));
        }

        tracing::debug!(method = %request.method, endpoint = %request.endpoint, "API request");

        let mut builder = self.http.request(request.method.clone(), &url).headers(headers);

        if request.method != Method::GET {
            match request.body {
                Some(RequestBody::Json(ref value)) => {
                    builder = builder.json(value)?;
                }
                Some(RequestBody::Multipart(ref form)) => {
                    builder = builder.multipart(form);
                }
                None => {}
            }
        }

        let response = builder.send().await?;

        let status = response.status();
        let content_type = response.content_type().map(str::to_owned);

        if !status.is_success() {
            let body = response.bytes().await?;
            let problem = parse_problem(&body, status);
            tracing::warn!(
                status = status.as_u16(),
                endpoint = %request.endpoint,
                "API request rejected"
            );
            return Err(ApiClientError::Api { status, problem });
        }

        if status == StatusCode::NO_CONTENT {
            return empty_value();
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return empty_value();
        }

        if content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
        {
            serde_json::from_slice(&body)
                .map_err(|e| ApiClientError::Transport(idc_http::HttpError::Json(e)))
        } else {
            let text = String::from_utf8_lossy(&body).into_owned();
            serde_json::from_value(serde_json::Value::String(text))
                .map_err(|e| ApiClientError::Transport(idc_http::HttpError::Json(e)))
        }
    }

    /// GET shorthand: parameter binding around [`execute`](Self::execute).
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiClientError> {
        self.execute(ApiRequest::get(endpoint)).await
    }

    /// POST shorthand with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiClientError> {
        self.execute(ApiRequest::post(endpoint).json(body)?).await
    }

    /// PUT shorthand with a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiClientError> {
        self.execute(ApiRequest::put(endpoint).json(body)?).await
    }

    /// PATCH shorthand with a JSON body.
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiClientError> {
        self.execute(ApiRequest::patch(endpoint).json(body)?).await
    }

    /// DELETE shorthand.
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiClientError> {
        self.execute(ApiRequest::delete(endpoint)).await
    }
}

/// Deserialize the "empty result" (204 / empty payload) from JSON `null`,
/// which satisfies `()` and `Option<_>` targets without inventing bytes.
fn empty_value<T: DeserializeOwned>() -> Result<T, ApiClientError> {
    serde_json::from_value(serde_json::Value::Null)
        .map_err(|e| ApiClientError::Transport(idc_http::HttpError::Json(e)))
}

/// Parse a problem-details body, synthesizing from the status line when the
/// body is missing or unparseable.
fn parse_problem(body: &[u8], status: StatusCode) -> Problem {
    if body.is_empty() {
        return Problem::from_status(status);
    }
    serde_json::from_slice(body).unwrap_or_else(|_| Problem::from_status(status))
}
