//! Client-side cookie capability.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::Duration;

/// SameSite attribute for a client-side cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// Attributes applied when writing a cookie.
#[derive(Debug, Clone, PartialEq)]
pub struct CookieOptions {
    /// Cookie path.
    pub path: String,
    /// Lifetime; `None` makes it a session cookie.
    pub max_age: Option<Duration>,
    /// Only send over HTTPS.
    pub secure: bool,
    /// Cross-site sending policy.
    pub same_site: SameSite,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            max_age: None,
            secure: false,
            same_site: SameSite::Lax,
        }
    }
}

/// Trait for the host's client-side (script readable) cookie storage.
///
/// This is not where the session lives; the session is held in HTTP-only
/// cookies managed by the auth service.
pub trait CookieStore: Send + Sync {
    /// Read a cookie value.
    fn get(&self, name: &str) -> Option<String>;

    /// Write a cookie value with the given attributes.
    fn set(&self, name: &str, value: &str, options: &CookieOptions);

    /// Delete a cookie.
    fn remove(&self, name: &str);
}

/// In-memory cookie store.
#[derive(Default)]
pub struct MemoryCookieStore {
    cookies: Mutex<HashMap<String, (String, CookieOptions)>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes the cookie was last written with.
    pub fn options(&self, name: &str) -> Option<CookieOptions> {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|(_, options)| options.clone())
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|(value, _)| value.clone())
    }

    fn set(&self, name: &str, value: &str, options: &CookieOptions) {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), (value.to_string(), options.clone()));
    }

    fn remove(&self, name: &str) {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }
}
