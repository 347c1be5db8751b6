use std::sync::Arc;

use bytes::Bytes;
use http::Request;
use http_body_util::Full;
use serde::Serialize;

use crate::client::{HyperClient, Shared};
use crate::config::TransportSecurity;
use crate::error::{HttpError, InvalidUriKind};
use crate::multipart::MultipartForm;
use crate::response::HttpResponse;

/// Body variants carried by the request builder.
#[derive(Clone, Debug)]
enum BodyKind {
    /// Empty body
    Empty,
    /// Raw bytes body
    Bytes(Bytes),
    /// JSON-serialized body (stored as bytes after serialization)
    Json(Bytes),
    /// Form URL-encoded body (stored as bytes after serialization)
    Form(Bytes),
    /// multipart/form-data body with its boundary-bearing content type
    Multipart { bytes: Bytes, content_type: String },
}

/// HTTP request builder with a fluent API.
///
/// Created by [`HttpClient::get`], [`HttpClient::post`], etc.; configure
/// headers and body, then [`send()`](RequestBuilder::send).
///
/// Default content types are applied only when the caller has not supplied
/// one: JSON bodies get `application/json`, form bodies
/// `application/x-www-form-urlencoded`, multipart bodies the form's own
/// boundary-bearing value.
///
/// [`HttpClient::get`]: crate::client::HttpClient::get
/// [`HttpClient::post`]: crate::client::HttpClient::post
#[must_use = "RequestBuilder does nothing until .send() is called"]
pub struct RequestBuilder {
    client: HyperClient,
    shared: Arc<Shared>,
    method: http::Method,
    url: String,
    headers: Vec<(http::header::HeaderName, http::header::HeaderValue)>,
    body: BodyKind,
    /// Error captured during building (deferred to `send()`)
    error: Option<HttpError>,
}

impl RequestBuilder {
    pub(crate) fn new(
        client: HyperClient,
        shared: Arc<Shared>,
        method: http::Method,
        url: String,
    ) -> Self {
        Self {
            client,
            shared,
            method,
            url,
            headers: Vec::new(),
            body: BodyKind::Empty,
            error: None,
        }
    }

    /// Add a single header to the request
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if self.error.is_some() {
            return self;
        }

        match (
            http::header::HeaderName::try_from(name),
            http::header::HeaderValue::try_from(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.push((name, value));
            }
            (Err(e), _) => {
                self.error = Some(HttpError::InvalidHeaderName(e));
            }
            (_, Err(e)) => {
                self.error = Some(HttpError::InvalidHeaderValue(e));
            }
        }
        self
    }

    /// Add multiple headers to the request
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in headers {
            self = self.header(name.as_ref(), value.as_ref());
            if self.error.is_some() {
                break;
            }
        }
        self
    }

    /// Set request body as JSON
    ///
    /// # Errors
    ///
    /// Returns `Err(HttpError::Json)` if serialization fails.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, HttpError> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }

        let json_bytes = serde_json::to_vec(body)?;
        self.body = BodyKind::Json(Bytes::from(json_bytes));
        Ok(self)
    }

    /// Set request body as form URL-encoded
    ///
    /// # Errors
    ///
    /// Returns `Err(HttpError::FormEncode)` if encoding fails.
    pub fn form(mut self, fields: &[(&str, &str)]) -> Result<Self, HttpError> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }

        let form_string = serde_urlencoded::to_string(fields)?;
        self.body = BodyKind::Form(Bytes::from(form_string));
        Ok(self)
    }

    /// Set request body as multipart/form-data
    ///
    /// The form's boundary-bearing content type is used unless the caller
    /// already supplied a `content-type` header.
    pub fn multipart(mut self, form: &MultipartForm) -> Self {
        self.body = BodyKind::Multipart {
            bytes: form.to_bytes(),
            content_type: form.content_type(),
        };
        self
    }

    /// Set request body as raw bytes
    pub fn body_bytes(mut self, body: Bytes) -> Self {
        self.body = BodyKind::Bytes(body);
        self
    }

    /// Set request body as a string
    pub fn body_string(mut self, body: String) -> Self {
        self.body = BodyKind::Bytes(Bytes::from(body));
        self
    }

    /// Validate URL and scheme against the transport security mode.
    fn validate_url(&self) -> Result<http::Uri, HttpError> {
        let uri: http::Uri =
            self.url
                .parse()
                .map_err(|e: http::uri::InvalidUri| HttpError::InvalidUri {
                    url: self.url.clone(),
                    kind: InvalidUriKind::ParseError,
                    reason: e.to_string(),
                })?;

        if uri.authority().is_none() {
            return Err(HttpError::InvalidUri {
                url: self.url.clone(),
                kind: InvalidUriKind::MissingAuthority,
                reason: "missing host/authority".to_owned(),
            });
        }

        match uri.scheme_str() {
            Some("https") => Ok(uri),
            Some("http") => match self.shared.transport {
                TransportSecurity::AllowInsecureHttp => Ok(uri),
                TransportSecurity::TlsOnly => Err(HttpError::InvalidScheme {
                    scheme: "http".to_owned(),
                    reason: "HTTPS required (transport security is TlsOnly)".to_owned(),
                }),
            },
            Some(scheme) => Err(HttpError::InvalidScheme {
                scheme: scheme.to_owned(),
                reason: "only http:// and https:// schemes are supported".to_owned(),
            }),
            None => Err(HttpError::InvalidUri {
                url: self.url.clone(),
                kind: InvalidUriKind::MissingScheme,
                reason: "missing scheme".to_owned(),
            }),
        }
    }

    /// Send the request and return the response
    ///
    /// Returns `Ok(HttpResponse)` for every HTTP status; only transport
    /// faults, timeouts, TLS failures and build errors are `Err`.
    ///
    /// # Errors
    ///
    /// Returns `HttpError` if:
    /// - Request building failed (invalid headers, URL, etc.)
    /// - URL scheme is invalid for the transport security mode
    /// - Network/transport error
    /// - The per-request timeout elapsed
    pub async fn send(mut self) -> Result<HttpResponse, HttpError> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }

        let uri = self.validate_url()?;

        let mut builder = Request::builder().method(self.method.clone()).uri(uri);

        // Default Content-Type only if the caller didn't supply one.
        let has_content_type = self
            .headers
            .iter()
            .any(|(name, _)| name == http::header::CONTENT_TYPE);
        if !has_content_type {
            match &self.body {
                BodyKind::Json(_) => {
                    builder = builder.header(http::header::CONTENT_TYPE, "application/json");
                }
                BodyKind::Form(_) => {
                    builder = builder
                        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                }
                BodyKind::Multipart { content_type, .. } => {
                    builder = builder.header(http::header::CONTENT_TYPE, content_type.as_str());
                }
                BodyKind::Empty | BodyKind::Bytes(_) => {}
            }
        }

        // Default User-Agent unless overridden.
        let has_user_agent = self
            .headers
            .iter()
            .any(|(name, _)| name == http::header::USER_AGENT);
        if !has_user_agent {
            builder = builder.header(http::header::USER_AGENT, self.shared.user_agent.clone());
        }

        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }

        let body_bytes = match self.body {
            BodyKind::Empty => Bytes::new(),
            BodyKind::Bytes(b)
            | BodyKind::Json(b)
            | BodyKind::Form(b)
            | BodyKind::Multipart { bytes: b, .. } => b,
        };

        let request = builder.body(Full::new(body_bytes))?;

        tracing::debug!(method = %self.method, url = %self.url, "sending request");

        let response = match tokio::time::timeout(
            self.shared.request_timeout,
            self.client.request(request),
        )
        .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(e.into()),
            Err(_elapsed) => return Err(HttpError::Timeout(self.shared.request_timeout)),
        };

        Ok(HttpResponse::new(response, self.shared.max_body_size))
    }
}
