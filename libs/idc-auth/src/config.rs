use std::fmt;
use std::time::Duration;
use url::Url;

use crate::error::AuthError;
use crate::types::{ClientAuthMethod, SecretString};

/// Configuration for the session token provider.
///
/// Exactly one of [`token_endpoint`](Self::token_endpoint) or
/// [`issuer_url`](Self::issuer_url) must be set; with `issuer_url`, the
/// token endpoint is resolved once via OIDC discovery at construction.
///
/// `Debug` is manually implemented to redact
/// [`client_secret`](Self::client_secret).
pub struct AuthConfig {
    // ---- endpoint resolution ------------------------------------------------
    /// Direct token endpoint URL (mutually exclusive with `issuer_url`).
    pub token_endpoint: Option<Url>,

    /// OIDC issuer URL for discovery (mutually exclusive with
    /// `token_endpoint`). The token endpoint is resolved via
    /// `{issuer_url}/.well-known/openid-configuration`.
    pub issuer_url: Option<Url>,

    // ---- client registration ------------------------------------------------
    /// OAuth2 client identifier of the console registration.
    pub client_id: String,

    /// Optional client secret (redacted in `Debug` output).
    ///
    /// The console is normally registered as a public client and has none;
    /// confidential deployments set it together with
    /// [`auth_method`](Self::auth_method).
    pub client_secret: Option<SecretString>,

    /// Redirect URI of the interactive sign-in flow.
    ///
    /// Carried as deployment configuration for the View Layer; the silent
    /// path in this crate never uses it.
    pub redirect_uri: Option<Url>,

    /// Default scopes requested when the caller passes none.
    pub scopes: Vec<String>,

    /// How client credentials are transmitted to the token endpoint.
    pub auth_method: ClientAuthMethod,

    // ---- token cache policy -------------------------------------------------
    /// How close to expiry a cached access token is still considered fresh
    /// (default: 60 s). Tokens inside the leeway window are refreshed.
    pub leeway: Duration,

    /// Fallback TTL when the token endpoint omits `expires_in`
    /// (default: 5 min).
    pub default_ttl: Duration,

    // ---- HTTP client --------------------------------------------------------
    /// Override for the internal HTTP client configuration.
    /// When `None`,
    /// [`HttpClientConfig::token_endpoint()`](idc_http::HttpClientConfig::token_endpoint)
    /// is used.
    pub http_config: Option<idc_http::HttpClientConfig>,
}

impl AuthConfig {
    /// Validate that the configuration is self-consistent.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ConfigError`] if:
    /// - `client_id` is empty,
    /// - both `token_endpoint` and `issuer_url` are set, or neither is, or
    /// - `auth_method` is `Basic` without a `client_secret`.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.client_id.trim().is_empty() {
            return Err(AuthError::ConfigError(
                "client_id must not be empty".into(),
            ));
        }
        if self.auth_method == ClientAuthMethod::Basic
            && self.client_secret.as_ref().is_none_or(SecretString::is_empty)
        {
            return Err(AuthError::ConfigError(
                "auth_method Basic requires a client_secret".into(),
            ));
        }
        match (&self.token_endpoint, &self.issuer_url) {
            (Some(_), Some(_)) => Err(AuthError::ConfigError(
                "token_endpoint and issuer_url are mutually exclusive".into(),
            )),
            (None, None) => Err(AuthError::ConfigError(
                "one of token_endpoint or issuer_url must be set".into(),
            )),
            _ => Ok(()),
        }
    }
}

impl Clone for AuthConfig {
    fn clone(&self) -> Self {
        Self {
            token_endpoint: self.token_endpoint.clone(),
            issuer_url: self.issuer_url.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            redirect_uri: self.redirect_uri.clone(),
            scopes: self.scopes.clone(),
            auth_method: self.auth_method,
            leeway: self.leeway,
            default_ttl: self.default_ttl,
            http_config: self.http_config.clone(),
        }
    }
}

/// `Debug` redacts `client_secret` to prevent accidental exposure in logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_endpoint", &self.token_endpoint)
            .field("issuer_url", &self.issuer_url)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("auth_method", &self.auth_method)
            .field("leeway", &self.leeway)
            .field("default_ttl", &self.default_ttl)
            .field("http_config", &self.http_config)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_endpoint: None,
            issuer_url: None,
            client_id: String::new(),
            client_secret: None,
            redirect_uri: None,
            scopes: Vec::new(),
            auth_method: ClientAuthMethod::default(),
            leeway: Duration::from_secs(60),
            default_ttl: Duration::from_secs(5 * 60),
            http_config: None,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn test_url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    /// Minimal valid public-client config.
    fn valid_base() -> AuthConfig {
        AuthConfig {
            token_endpoint: Some(test_url("https://login.example.com/oauth2/token")),
            client_id: "console-client".into(),
            ..Default::default()
        }
    }

    #[test]
    fn validate_ok_public_client() {
        assert!(valid_base().validate().is_ok());
    }

    #[test]
    fn validate_ok_with_issuer_only() {
        let cfg = AuthConfig {
            token_endpoint: None,
            issuer_url: Some(test_url("https://login.example.com")),
            ..valid_base()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_err_when_both_endpoints_set() {
        let cfg = AuthConfig {
            issuer_url: Some(test_url("https://login.example.com")),
            ..valid_base()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("mutually exclusive"), "got: {err}");
    }

    #[test]
    fn validate_err_when_neither_endpoint_set() {
        let cfg = AuthConfig {
            token_endpoint: None,
            ..valid_base()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("must be set"), "got: {err}");
    }

    #[test]
    fn validate_err_when_client_id_blank() {
        let cfg = AuthConfig {
            client_id: "   ".into(),
            ..valid_base()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("client_id"), "got: {err}");
    }

    #[test]
    fn validate_err_basic_without_secret() {
        let cfg = AuthConfig {
            auth_method: ClientAuthMethod::Basic,
            ..valid_base()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("client_secret"), "got: {err}");
    }

    #[test]
    fn debug_redacts_client_secret() {
        let cfg = AuthConfig {
            client_secret: Some(SecretString::new("super-secret")),
            ..valid_base()
        };
        let dbg = format!("{cfg:?}");
        assert!(dbg.contains("[REDACTED]"));
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("console-client"));
    }

    #[test]
    fn default_durations() {
        let cfg = AuthConfig::default();
        assert_eq!(cfg.leeway, Duration::from_secs(60));
        assert_eq!(cfg.default_ttl, Duration::from_secs(5 * 60));
        assert_eq!(cfg.auth_method, ClientAuthMethod::Form);
    }
}
