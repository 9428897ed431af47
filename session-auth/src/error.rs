//! Error types for the `session-auth` crate.
//!
//! Follows the same pattern as the other layers: a root Error struct holding an
//! error kind tree and an optional source for error chaining.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for session-auth crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in session-auth.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    Session(SessionErrorKind),
    Http(HttpErrorKind),
    Config(ConfigErrorKind),
}

/// Errors reported by the refresh endpoint.
#[derive(Debug, PartialEq)]
pub enum SessionErrorKind {
    /// A 200 response without a usable `accessToken`.
    InvalidAuthResponse,
    /// Any status other than 200 or 401.
    UnexpectedStatus { status: u16, status_text: String },
}

/// Errors from HTTP client operations.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    BuilderFailed,
    RequestFailed,
    Network,
}

/// Errors from building a session client out of its configuration.
#[derive(Debug, PartialEq)]
pub enum ConfigErrorKind {
    InvalidBaseUrl,
}

impl Error {
    /// Status code of the refresh response that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        match &self.error_kind {
            ErrorKind::Session(SessionErrorKind::UnexpectedStatus { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// True for transport level failures where no response was received.
    pub fn is_network(&self) -> bool {
        matches!(
            self.error_kind,
            ErrorKind::Http(HttpErrorKind::Network) | ErrorKind::Http(HttpErrorKind::RequestFailed)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::Session(SessionErrorKind::InvalidAuthResponse) => {
                write!(f, "Invalid auth response")
            }
            // Callers match on the bare status text, keep it unprefixed.
            ErrorKind::Session(SessionErrorKind::UnexpectedStatus { status_text, .. }) => {
                write!(f, "{}", status_text)
            }
            ErrorKind::Http(kind) => match &self.source {
                Some(source) => write!(f, "HTTP error: {:?}: {}", kind, source),
                None => write!(f, "HTTP error: {:?}", kind),
            },
            ErrorKind::Config(kind) => write!(f, "Config error: {:?}", kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let error_kind = if err.is_builder() {
            ErrorKind::Http(HttpErrorKind::BuilderFailed)
        } else if err.is_request() {
            ErrorKind::Http(HttpErrorKind::RequestFailed)
        } else {
            ErrorKind::Http(HttpErrorKind::Network)
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

/// Helper function to create session errors.
pub fn session_error(kind: SessionErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Session(kind),
    }
}

/// Helper function to create configuration errors.
pub fn config_error(kind: ConfigErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Config(kind),
    }
}

/// Error for a refresh response carrying a status other than 200 or 401.
pub fn unexpected_status(status: reqwest::StatusCode, status_text: String) -> Error {
    Error {
        source: None,
        error_kind: ErrorKind::Session(SessionErrorKind::UnexpectedStatus {
            status: status.as_u16(),
            status_text,
        }),
    }
}
