use std::time::Duration;

/// Base URL used when `IDENTITY_API_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://identity-api.example.com";

/// Request timeout used when `IDENTITY_API_TIMEOUT` is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration surface of the gateway.
///
/// Externally supplied per deployment environment; see
/// [`from_env`](Self::from_env).
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API base URL, without a trailing slash (normalized on construction).
    pub base_url: String,

    /// Per-request timeout.
    pub request_timeout: Duration,

    /// Headers attached to every request before per-request overrides.
    pub default_headers: Vec<(String, String)>,
}

impl ApiConfig {
    /// Create a config for the given base URL with default timeout and
    /// headers. A trailing slash on the base URL is trimmed.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            request_timeout: DEFAULT_TIMEOUT,
            default_headers: vec![("content-type".to_owned(), "application/json".to_owned())],
        }
    }

    /// Build the config from the environment.
    ///
    /// - `IDENTITY_API_BASE_URL` — base URL (default:
    ///   [`DEFAULT_BASE_URL`]).
    /// - `IDENTITY_API_TIMEOUT` — request timeout in humantime syntax
    ///   (e.g. `10s`, `1500ms`; default: [`DEFAULT_TIMEOUT`]). Unparseable
    ///   values are ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("IDENTITY_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let mut config = Self::new(base_url);

        if let Ok(raw) = std::env::var("IDENTITY_API_TIMEOUT") {
            match humantime::parse_duration(&raw) {
                Ok(timeout) => config.request_timeout = timeout,
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "ignoring unparseable IDENTITY_API_TIMEOUT");
                }
            }
        }

        config
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Replace the default header set.
    #[must_use]
    pub fn with_default_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.default_headers = headers;
        self
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ApiConfig::new("https://api.example.com/");
        assert_eq!(config.base_url, "https://api.example.com");
    }

    #[test]
    fn defaults_include_json_content_type() {
        let config = ApiConfig::new("https://api.example.com");
        assert_eq!(config.request_timeout, DEFAULT_TIMEOUT);
        assert!(
            config
                .default_headers
                .iter()
                .any(|(k, v)| k == "content-type" && v == "application/json")
        );
    }

    #[test]
    fn builders_override() {
        let config = ApiConfig::new("https://api.example.com")
            .with_timeout(Duration::from_secs(30))
            .with_default_headers(vec![]);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.default_headers.is_empty());
    }
}
