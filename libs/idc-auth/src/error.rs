use thiserror::Error;

/// Errors returned by token acquisition.
///
/// Variants are constructed so that secret values (refresh tokens, access
/// tokens, client secrets) can never appear in the formatted output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// Silent acquisition is not possible; the user must sign in
    /// interactively.
    ///
    /// Raised when no session is held, or when the identity provider
    /// answers with an OAuth error that requires user interaction
    /// (`interaction_required`, `consent_required`, `login_required`,
    /// `invalid_grant`). The View Layer reacts by starting a redirect or
    /// popup flow; this crate never does.
    #[error("interactive sign-in required: {0}")]
    InteractionRequired(String),

    /// HTTP transport or status error during token acquisition.
    ///
    /// The inner string is produced by
    /// [`format_http_error`](crate::http_error::format_http_error) and never
    /// contains secrets.
    #[error("{0}")]
    Http(String),

    /// The token endpoint returned an unparseable or incomplete response.
    #[error("invalid token response: {0}")]
    InvalidResponse(String),

    /// The token endpoint returned a `token_type` that is not `Bearer`.
    #[error("unsupported token type: {0}")]
    UnsupportedTokenType(String),

    /// Configuration is invalid (e.g. both `token_endpoint` and
    /// `issuer_url` are set, or neither is set).
    #[error("auth config error: {0}")]
    ConfigError(String),
}

impl AuthError {
    /// Whether this failure calls for interactive sign-in.
    #[must_use]
    pub fn is_interaction_required(&self) -> bool {
        matches!(self, AuthError::InteractionRequired(_))
    }
}
