use bytes::Bytes;
use http::{HeaderMap, Response, StatusCode};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// Cap on how much of a non-2xx body is read into the error preview.
pub const ERROR_BODY_PREVIEW_LIMIT: usize = 8 * 1024;

/// HTTP response wrapper with body-reading helpers.
///
/// - `resp.error_for_status()?` - check status without reading the body
/// - `resp.bytes().await?` - read raw bytes (no status check)
/// - `resp.checked_bytes().await?` - read bytes with status check
/// - `resp.json::<T>().await?` - parse as JSON with status check
/// - `resp.text().await?` - read UTF-8 text with status check
///
/// All body reads enforce the configured `max_body_size` limit.
#[derive(Debug)]
pub struct HttpResponse {
    inner: Response<Incoming>,
    max_body_size: usize,
}

impl HttpResponse {
    pub(crate) fn new(inner: Response<Incoming>, max_body_size: usize) -> Self {
        Self {
            inner,
            max_body_size,
        }
    }

    /// Get the response status code
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Get the response headers
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Content-Type header value, if present and valid UTF-8.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.inner
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Check status and return an error for non-2xx responses
    ///
    /// Does NOT read the response body; the error carries an empty preview.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::HttpStatus` if the response status is not 2xx.
    pub fn error_for_status(self) -> Result<Self, HttpError> {
        if self.inner.status().is_success() {
            return Ok(self);
        }

        let content_type = self.content_type().map(String::from);

        Err(HttpError::HttpStatus {
            status: self.inner.status(),
            body_preview: String::new(),
            content_type,
        })
    }

    /// Read the response body as bytes without a status check
    ///
    /// # Errors
    /// Returns `HttpError::BodyTooLarge` if the body exceeds the limit.
    pub async fn bytes(self) -> Result<Bytes, HttpError> {
        read_body_limited(self.inner, self.max_body_size).await
    }

    /// Read the response body as bytes with a status check
    ///
    /// # Errors
    /// Returns `HttpError::HttpStatus` (with a body preview) if status is
    /// not 2xx, `HttpError::BodyTooLarge` if the body exceeds the limit.
    pub async fn checked_bytes(self) -> Result<Bytes, HttpError> {
        checked_body(self.inner, self.max_body_size).await
    }

    /// Parse the response body as JSON with a status check
    ///
    /// # Errors
    /// Returns `HttpError::HttpStatus` if status is not 2xx,
    /// `HttpError::BodyTooLarge` if the body exceeds the limit,
    /// `HttpError::Json` if parsing fails.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, HttpError> {
        let body_bytes = checked_body(self.inner, self.max_body_size).await?;
        let value = serde_json::from_slice(&body_bytes)?;
        Ok(value)
    }

    /// Read the response body as UTF-8 text with a status check
    ///
    /// Invalid UTF-8 sequences are replaced with the replacement character.
    ///
    /// # Errors
    /// Returns `HttpError::HttpStatus` if status is not 2xx,
    /// `HttpError::BodyTooLarge` if the body exceeds the limit.
    pub async fn text(self) -> Result<String, HttpError> {
        let body_bytes = checked_body(self.inner, self.max_body_size).await?;
        Ok(String::from_utf8_lossy(&body_bytes).into_owned())
    }
}

/// Status-checking body read: non-2xx becomes `HttpStatus` with a capped
/// body preview, 2xx reads up to `max_body_size`.
async fn checked_body(
    response: Response<Incoming>,
    max_body_size: usize,
) -> Result<Bytes, HttpError> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    if !status.is_success() {
        // A BodyTooLarge while previewing must not hide the status error.
        let preview_limit = max_body_size.min(ERROR_BODY_PREVIEW_LIMIT);
        let body_preview = match read_body_limited(response, preview_limit).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(HttpError::BodyTooLarge { .. }) => "<body too large for preview>".to_owned(),
            Err(e) => return Err(e),
        };

        return Err(HttpError::HttpStatus {
            status,
            body_preview,
            content_type,
        });
    }

    read_body_limited(response, max_body_size).await
}

/// Collect the body, failing once the limit is exceeded.
async fn read_body_limited(
    response: Response<Incoming>,
    limit: usize,
) -> Result<Bytes, HttpError> {
    let (_parts, body) = response.into_parts();

    let mut collected = Vec::new();
    let mut body = std::pin::pin!(body);

    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(|e| HttpError::Transport(Box::new(e)))?;
        if let Some(chunk) = frame.data_ref() {
            if collected.len() + chunk.len() > limit {
                return Err(HttpError::BodyTooLarge {
                    limit,
                    actual: collected.len() + chunk.len(),
                });
            }
            collected.extend_from_slice(chunk);
        }
    }

    Ok(Bytes::from(collected))
}
