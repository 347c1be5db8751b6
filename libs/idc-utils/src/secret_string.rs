use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Opaque wrapper around a credential value (access token, refresh token,
/// client secret).
///
/// `Debug` and `Display` both render `[REDACTED]`; the wrapped value can only
/// be reached through [`expose`](Self::expose), which keeps accidental
/// logging of bearer material out of the codebase. The backing buffer is
/// zeroed on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a plain value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Read-only access to the wrapped value.
    ///
    /// Callers must not log or persist the returned slice.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the wrapped value is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn formatting_is_redacted() {
        let s = SecretString::new("bearer-material");
        assert_eq!(format!("{s:?}"), "[REDACTED]");
        assert_eq!(format!("{s}"), "[REDACTED]");
    }

    #[test]
    fn expose_returns_value() {
        let s = SecretString::new("tok-1");
        assert_eq!(s.expose(), "tok-1");
        assert!(!s.is_empty());
    }

    #[test]
    fn empty_value() {
        assert!(SecretString::new("").is_empty());
    }

    #[test]
    fn clone_preserves_value() {
        let s = SecretString::new("value");
        let c = s.clone();
        assert_eq!(c.expose(), "value");
    }
}
