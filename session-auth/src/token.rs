//! Access token type.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Short-lived credential returned by the refresh endpoint.
///
/// Opaque to this crate: no expiry metadata is tracked, and the value is held
/// in memory only. `Debug` output is redacted.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Wrap a raw token string. Returns `None` for an empty string.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return None;
        }
        Some(Self(SecretString::from(raw)))
    }

    /// Get the raw token, e.g. to build an `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

impl PartialEq for AccessToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for AccessToken {}

impl PartialEq<&str> for AccessToken {
    fn eq(&self, other: &&str) -> bool {
        self.expose() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_rejected() {
        assert!(AccessToken::new("").is_none());
    }

    #[test]
    fn test_expose_returns_raw_value() {
        let token = AccessToken::new("tok").unwrap();
        assert_eq!(token.expose(), "tok");
        assert_eq!(token, "tok");
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = AccessToken::new("super-secret").unwrap();
        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("super-secret"));
    }
}
