use http::StatusCode;
use thiserror::Error;

use idc_auth::AuthError;
use idc_errors::{Problem, ValidationErrors};
use idc_http::HttpError;

/// Failure of one gateway operation, normalized to three tiers.
///
/// - [`Authentication`](Self::Authentication): no usable credential — the
///   caller redirects to interactive sign-in.
/// - [`Api`](Self::Api): the backend rejected the request — the caller
///   surfaces `detail`/`title` and, for validation failures, the per-field
///   messages.
/// - [`Transport`](Self::Transport): the request never completed — the
///   caller surfaces a generic retry-prompting message.
///
/// No raw transport exceptions cross this boundary, and nothing here
/// retries: retry is a user action in the View Layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiClientError {
    /// Token acquisition failed, or no token provider is configured.
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthError),

    /// The backend answered outside the success range.
    #[error("API error {status}: {}", .problem.message().unwrap_or("request rejected"))]
    Api {
        /// Numeric status code of the response.
        status: StatusCode,
        /// Parsed (or synthesized) problem-details body.
        problem: Problem,
    },

    /// Transport-level failure (network, timeout, serialization) before or
    /// after the HTTP exchange.
    #[error("request failed: {0}")]
    Transport(#[from] HttpError),
}

impl ApiClientError {
    /// Status code of an [`Api`](Self::Api) failure.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message of an [`Api`](Self::Api) failure
    /// (`detail`, falling back to `title`).
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiClientError::Api { problem, .. } => problem.message(),
            _ => None,
        }
    }

    /// Per-field validation messages of an [`Api`](Self::Api) failure.
    #[must_use]
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ApiClientError::Api { problem, .. } => problem.errors.as_ref(),
            _ => None,
        }
    }

    /// Whether the caller must route the user to interactive sign-in.
    #[must_use]
    pub fn is_interaction_required(&self) -> bool {
        matches!(
            self,
            ApiClientError::Authentication(err) if err.is_interaction_required()
        )
    }
}
