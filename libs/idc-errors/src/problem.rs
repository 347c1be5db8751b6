use std::collections::BTreeMap;

use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Content type for Problem Details responses per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Field-level validation failures: field name → list of messages.
///
/// This is the `errors` extension member the backend attaches to 400/422
/// validation problems (ASP.NET `ValidationProblemDetails` convention).
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

/// Serialize `Option<StatusCode>` as a bare number.
#[allow(clippy::ref_option)] // serde requires the &Option<T> signature
fn serialize_status<S>(status: &Option<StatusCode>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match status {
        Some(code) => serializer.serialize_some(&code.as_u16()),
        None => serializer.serialize_none(),
    }
}

/// Deserialize `Option<StatusCode>` from a bare number.
fn deserialize_status<'de, D>(deserializer: D) -> Result<Option<StatusCode>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<u16>::deserialize(deserializer)? {
        Some(code) => StatusCode::from_u16(code)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Problem Details for HTTP APIs as emitted by the identity backend.
///
/// Every member is optional on the wire; responses synthesized client-side
/// (unparseable error bodies) carry at least `title`, `status` and `detail`.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct Problem {
    /// URI reference identifying the problem type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_url: Option<String>,

    /// Short, human-readable summary of the problem type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// HTTP status code for this occurrence (bare number on the wire).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_status",
        deserialize_with = "deserialize_status"
    )]
    pub status: Option<StatusCode>,

    /// Human-readable explanation specific to this occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Field-level validation errors for 4xx validation problems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl Problem {
    /// Create a problem with the given status, title and detail.
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: None,
            title: Some(title.into()),
            status: Some(status),
            detail: Some(detail.into()),
            instance: None,
            errors: None,
        }
    }

    /// Synthesize a problem from a bare status line.
    ///
    /// Used when a non-2xx response body is missing or cannot be parsed:
    /// `title` falls back to the HTTP reason phrase and `detail` to
    /// `"HTTP {code}: {reason}"`.
    pub fn from_status(status: StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unknown Status");
        Self::new(status, reason, format!("HTTP {}: {reason}", status.as_u16()))
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = Some(type_url.into());
        self
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = Some(uri.into());
        self
    }

    pub fn with_errors(mut self, errors: ValidationErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Best human-readable message: `detail`, falling back to `title`.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.detail.as_deref().or(self.title.as_deref())
    }
}
