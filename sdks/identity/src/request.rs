use http::Method;
use serde::Serialize;

use idc_http::MultipartForm;

use crate::error::ApiClientError;

/// Body of an [`ApiRequest`].
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Structured value, serialized as JSON text with a JSON content type.
    Json(serde_json::Value),
    /// Binary form payload, passed through with its own boundary-bearing
    /// content type.
    Multipart(MultipartForm),
}

/// Descriptor of one backend call.
///
/// Transient: constructed per call and handed to
/// [`ApiClient::execute`](crate::ApiClient::execute). Authentication is
/// required by default; opt out with [`no_auth`](Self::no_auth).
#[derive(Debug, Clone)]
#[must_use]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Endpoint path relative to the configured base URL (leading slash).
    pub endpoint: String,
    /// Per-request header overrides (win over configured defaults).
    pub headers: Vec<(String, String)>,
    /// Optional body; ignored for GET.
    pub body: Option<RequestBody>,
    /// Whether an `Authorization: Bearer` header must be attached.
    pub require_auth: bool,
}

impl ApiRequest {
    /// Create a descriptor for the given method and endpoint path.
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            headers: Vec::new(),
            body: None,
            require_auth: true,
        }
    }

    /// GET descriptor.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    /// POST descriptor.
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    /// PUT descriptor.
    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    /// PATCH descriptor.
    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PATCH, endpoint)
    }

    /// DELETE descriptor.
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Transport`] if serialization fails (the
    /// request never reaches the network).
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiClientError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiClientError::Transport(idc_http::HttpError::Json(e)))?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    /// Attach a multipart/form-data body.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    /// Add a header override.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Mark the request as unauthenticated (no bearer header).
    pub fn no_auth(mut self) -> Self {
        self.require_auth = false;
        self
    }
}
