/// Format an [`idc_http::HttpError`] into a human-readable message with a
/// context prefix.
///
/// The prefix identifies the caller context (e.g. `"OIDC discovery"`,
/// `"token endpoint"`) so log output is immediately attributable.
///
/// # Security
///
/// `HttpStatus` errors include only the status code — the response body is
/// deliberately excluded so server-side diagnostics (which may echo
/// credentials) cannot leak into logs or error messages.
#[must_use]
pub fn format_http_error(e: &idc_http::HttpError, prefix: &str) -> String {
    use idc_http::HttpError;

    match e {
        HttpError::HttpStatus { status, .. } => {
            format!("{prefix} HTTP {status}")
        }
        HttpError::Json(err) => format!("{prefix} JSON parse failed: {err}"),
        HttpError::Timeout(duration) => {
            format!("{prefix} request timed out after {duration:?}")
        }
        HttpError::Transport(err) => format!("{prefix} transport error: {err}"),
        HttpError::BodyTooLarge { limit, actual } => {
            format!("{prefix} response too large: limit {limit} bytes, got {actual} bytes")
        }
        HttpError::Tls(err) => format!("{prefix} TLS error: {err}"),
        HttpError::RequestBuild(err) => format!("{prefix} request build failed: {err}"),
        HttpError::InvalidHeaderName(err) => format!("{prefix} invalid header name: {err}"),
        HttpError::InvalidHeaderValue(err) => format!("{prefix} invalid header value: {err}"),
        HttpError::FormEncode(err) => format!("{prefix} form encode error: {err}"),
        HttpError::InvalidUri { url, reason, .. } => {
            format!("{prefix} invalid URL '{url}': {reason}")
        }
        HttpError::InvalidScheme { scheme, reason } => {
            format!("{prefix} invalid scheme '{scheme}': {reason}")
        }
        // Future variants (HttpError is #[non_exhaustive]) — omit detail
        // to avoid leaking sensitive data from unknown Display impls.
        _ => format!("{prefix} request failed"),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn http_status_excludes_body() {
        let err = idc_http::HttpError::HttpStatus {
            status: http::StatusCode::UNAUTHORIZED,
            body_preview: "secret diagnostics".into(),
            content_type: None,
        };
        let msg = format_http_error(&err, "token endpoint");
        assert_eq!(msg, "token endpoint HTTP 401 Unauthorized");
        assert!(!msg.contains("secret diagnostics"));
    }

    #[test]
    fn timeout_mentions_duration() {
        let err = idc_http::HttpError::Timeout(std::time::Duration::from_secs(30));
        let msg = format_http_error(&err, "OIDC discovery");
        assert!(msg.starts_with("OIDC discovery request timed out"));
    }
}
