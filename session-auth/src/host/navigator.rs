//! Page navigation capability.

use std::sync::{Mutex, PoisonError};

use log::info;

/// Trait for reading and changing the current page location.
///
/// Redirects are fire-and-forget: the caller does not wait for the
/// destination to load and there is no failure path.
pub trait Navigator: Send + Sync {
    /// The full URL of the page the user is on.
    fn current_url(&self) -> String;

    /// Navigate the page to `url`.
    fn redirect(&self, url: &str);
}

/// Navigator with a fixed current location that records every redirect.
///
/// Used where there is no page to navigate, such as tests and the command-line
/// binary, which prints the targets instead.
pub struct RecordingNavigator {
    current_url: String,
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Create a navigator positioned at `current_url`.
    pub fn new(current_url: impl Into<String>) -> Self {
        Self {
            current_url: current_url.into(),
            redirects: Mutex::new(Vec::new()),
        }
    }

    /// All redirect targets, oldest first.
    pub fn redirects(&self) -> Vec<String> {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent redirect target.
    pub fn last_redirect(&self) -> Option<String> {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn current_url(&self) -> String {
        self.current_url.clone()
    }

    fn redirect(&self, url: &str) {
        info!("Redirecting to {}", url);
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
    }
}
