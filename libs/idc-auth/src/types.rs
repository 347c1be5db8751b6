use serde::Deserialize;

pub use idc_utils::SecretString;

/// How client credentials are transmitted to the token endpoint.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ClientAuthMethod {
    /// Credentials in the request body (RFC 6749 §2.3.1 alternative).
    ///
    /// Default: the console registers as a public client, so there is
    /// usually no secret at all and `client_id` rides in the form.
    #[default]
    Form,
    /// HTTP Basic authentication (RFC 6749 §2.3.1).
    /// `Authorization: Basic base64(client_id:client_secret)`
    Basic,
}

/// Deserialized token endpoint success response.
///
/// Unknown fields are ignored. **Intentionally `Deserialize`-only** —
/// `Serialize` is not derived so access tokens cannot end up in logs or
/// error bodies by accident.
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    /// The access token issued by the authorization server.
    pub access_token: String,
    /// Lifetime in seconds of the access token (optional per RFC 6749).
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Token type (optional; must be "Bearer" if present).
    #[serde(default)]
    pub token_type: Option<String>,
    /// Rotated refresh token, when the provider issues one.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Deserialized token endpoint error response (RFC 6749 §5.2).
#[derive(Deserialize)]
pub(crate) struct OAuthErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// OAuth error codes that mean "silent acquisition cannot succeed; the user
/// has to sign in interactively".
pub(crate) const INTERACTION_ERROR_CODES: [&str; 4] = [
    "interaction_required",
    "consent_required",
    "login_required",
    "invalid_grant",
];
