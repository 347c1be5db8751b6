use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use http::header::AUTHORIZATION;
use url::Url;
use zeroize::Zeroizing;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::http_error::format_http_error;
use crate::types::{
    ClientAuthMethod, INTERACTION_ERROR_CODES, OAuthErrorResponse, SecretString, TokenResponse,
};

/// Source of bearer tokens for outbound API calls.
///
/// The gateway depends on `Arc<dyn TokenProvider>` only, so tests and
/// service-credential deployments can substitute their own source.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Acquire a currently valid access token for the given scope set.
    ///
    /// Implementations own freshness: callers invoke this per request and
    /// never cache the result themselves.
    ///
    /// # Errors
    ///
    /// [`AuthError::InteractionRequired`] when silent acquisition cannot
    /// succeed; other variants for transport/protocol failures.
    async fn acquire_token(&self, scopes: &[String]) -> Result<SecretString, AuthError>;
}

/// Access token cached from the last token-endpoint round trip.
struct CachedToken {
    value: SecretString,
    scope_key: String,
    expires_at: Instant,
}

/// Token provider backed by an identity-provider session.
///
/// Holds the refresh token produced by the interactive sign-in flow and
/// silently redeems it for access tokens on demand. Cached access tokens
/// are served lock-free (`ArcSwap`) while fresh; a token inside the
/// configured leeway window of its expiry is treated as stale and
/// refreshed.
///
/// The provider never starts interactive sign-in. When it cannot proceed
/// silently — no session installed, or the identity provider answers with
/// an interaction-class OAuth error — acquisition fails with
/// [`AuthError::InteractionRequired`] and the caller (the View Layer)
/// decides how to re-authenticate.
pub struct SessionTokenProvider {
    client: idc_http::HttpClient,
    token_endpoint: Url,
    client_id: String,
    client_secret: Option<SecretString>,
    auth_method: ClientAuthMethod,
    default_scopes: Vec<String>,
    leeway: Duration,
    default_ttl: Duration,
    refresh_token: ArcSwapOption<SecretString>,
    cached: ArcSwapOption<CachedToken>,
}

impl SessionTokenProvider {
    /// Build a provider from the given configuration.
    ///
    /// Resolves `issuer_url` to the token endpoint via OIDC discovery
    /// (one-time). The provider starts without a session; call
    /// [`begin_session`](Self::begin_session) with the refresh token from
    /// the interactive flow.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ConfigError`] if the config is invalid,
    /// [`AuthError::Http`] if the HTTP client cannot be built or discovery
    /// fails.
    pub async fn new(config: AuthConfig) -> Result<Self, AuthError> {
        config.validate()?;

        let http_config = config
            .http_config
            .clone()
            .unwrap_or_else(idc_http::HttpClientConfig::token_endpoint);
        let client = idc_http::HttpClientBuilder::with_config(http_config)
            .build()
            .map_err(|e| AuthError::Http(format_http_error(&e, "token endpoint")))?;

        let token_endpoint = match (config.token_endpoint, config.issuer_url) {
            (Some(endpoint), _) => endpoint,
            (None, Some(issuer)) => {
                crate::discovery::discover_token_endpoint(&client, &issuer).await?
            }
            // validate() rules this out
            (None, None) => {
                return Err(AuthError::ConfigError(
                    "one of token_endpoint or issuer_url must be set".into(),
                ));
            }
        };

        Ok(Self {
            client,
            token_endpoint,
            client_id: config.client_id,
            client_secret: config.client_secret,
            auth_method: config.auth_method,
            default_scopes: config.scopes,
            leeway: config.leeway,
            default_ttl: config.default_ttl,
            refresh_token: ArcSwapOption::const_empty(),
            cached: ArcSwapOption::const_empty(),
        })
    }

    /// Install the session produced by the interactive sign-in flow.
    ///
    /// Replaces any previous session and drops the cached access token.
    pub fn begin_session(&self, refresh_token: SecretString) {
        self.refresh_token.store(Some(Arc::new(refresh_token)));
        self.cached.store(None);
        tracing::debug!("identity session installed");
    }

    /// Drop the session and the cached access token (sign-out).
    pub fn end_session(&self) {
        self.refresh_token.store(None);
        self.cached.store(None);
        tracing::debug!("identity session cleared");
    }

    /// Whether a session (refresh token) is currently held.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.refresh_token.load().is_some()
    }

    /// Redeem the refresh token at the token endpoint.
    async fn redeem(&self, refresh_token: &SecretString, scope: &str) -> Result<TokenResponse, AuthError> {
        // -- build form fields -------------------------------------------------
        let refresh_expose = Zeroizing::new(refresh_token.expose().to_owned());
        let mut fields: Vec<(&str, &str)> = vec![("grant_type", "refresh_token")];
        fields.push(("refresh_token", &refresh_expose));
        fields.push(("client_id", &self.client_id));

        if !scope.is_empty() {
            fields.push(("scope", scope));
        }

        // For Form auth, an optional secret goes into the body; public
        // clients have none.
        let secret_expose;
        if self.auth_method == ClientAuthMethod::Form
            && let Some(ref secret) = self.client_secret
        {
            secret_expose = Zeroizing::new(secret.expose().to_owned());
            fields.push(("client_secret", &secret_expose));
        }

        // -- build request -----------------------------------------------------
        let mut builder = self.client.post(self.token_endpoint.as_str());

        if self.auth_method == ClientAuthMethod::Basic {
            // validate() guarantees the secret exists for Basic.
            let secret = self
                .client_secret
                .as_ref()
                .ok_or_else(|| AuthError::ConfigError("Basic auth requires a client_secret".into()))?;
            let credentials =
                Zeroizing::new(format!("{}:{}", self.client_id, secret.expose()));
            let encoded = Zeroizing::new(general_purpose::STANDARD.encode(credentials.as_bytes()));
            let header_value = Zeroizing::new(format!("Basic {}", &*encoded));
            builder = builder.header(AUTHORIZATION.as_str(), &header_value);
        }

        let response = builder
            .form(fields.as_slice())
            .map_err(|e| AuthError::Http(format_http_error(&e, "token endpoint")))?
            .send()
            .await
            .map_err(|e| AuthError::Http(format_http_error(&e, "token endpoint")))?;

        // -- classify ----------------------------------------------------------
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AuthError::Http(format_http_error(&e, "token endpoint")))?;

        if !status.is_success() {
            if let Ok(oauth_err) = serde_json::from_slice::<OAuthErrorResponse>(&body) {
                if INTERACTION_ERROR_CODES.contains(&oauth_err.error.as_str()) {
                    let reason = oauth_err.error_description.unwrap_or(oauth_err.error);
                    return Err(AuthError::InteractionRequired(reason));
                }
                // Only the error code — descriptions can echo request data.
                return Err(AuthError::Http(format!(
                    "token endpoint HTTP {status}: {}",
                    oauth_err.error
                )));
            }
            return Err(AuthError::Http(format!("token endpoint HTTP {status}")));
        }

        let token: TokenResponse = serde_json::from_slice(&body)
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        if let Some(ref tt) = token.token_type
            && !tt.eq_ignore_ascii_case("bearer")
        {
            return Err(AuthError::UnsupportedTokenType(tt.clone()));
        }

        Ok(token)
    }

    fn scope_key(&self, scopes: &[String]) -> String {
        if scopes.is_empty() {
            self.default_scopes.join(" ")
        } else {
            scopes.join(" ")
        }
    }
}

#[async_trait]
impl TokenProvider for SessionTokenProvider {
    async fn acquire_token(&self, scopes: &[String]) -> Result<SecretString, AuthError> {
        let scope_key = self.scope_key(scopes);

        // Fast path: cached token for the same scope set, still outside the
        // leeway window.
        if let Some(cached) = self.cached.load_full()
            && cached.scope_key == scope_key
            && Instant::now() + self.leeway < cached.expires_at
        {
            return Ok(cached.value.clone());
        }

        let Some(refresh_token) = self.refresh_token.load_full() else {
            return Err(AuthError::InteractionRequired(
                "no active session".into(),
            ));
        };

        let token = self.redeem(&refresh_token, &scope_key).await?;

        // The provider may rotate the refresh token on every redemption.
        if let Some(rotated) = token.refresh_token {
            self.refresh_token
                .store(Some(Arc::new(SecretString::new(rotated))));
        }

        let ttl = token
            .expires_in
            .map_or(self.default_ttl, Duration::from_secs);
        let cached = CachedToken {
            value: SecretString::new(token.access_token),
            scope_key,
            expires_at: Instant::now() + ttl,
        };
        let value = cached.value.clone();
        self.cached.store(Some(Arc::new(cached)));

        tracing::debug!(ttl_secs = ttl.as_secs(), "access token refreshed");
        Ok(value)
    }
}

/// Provider that always returns the same token.
///
/// For tests and non-interactive contexts (service credentials injected by
/// the environment).
pub struct StaticTokenProvider {
    token: SecretString,
}

impl StaticTokenProvider {
    /// Wrap a fixed token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn acquire_token(&self, _scopes: &[String]) -> Result<SecretString, AuthError> {
        Ok(self.token.clone())
    }
}
