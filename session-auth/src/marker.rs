//! "Already logged" marker cookie.
//!
//! Records that the user has signed in on this device before, for UX hints
//! such as showing "Sign in" rather than "Create account". It carries no
//! credential and must never be used for authorization decisions.

use chrono::Duration;

use crate::host::{CookieOptions, CookieStore, SameSite};

/// Name of the marker cookie.
pub const ALREADY_LOGGED_COOKIE: &str = "already_logged";

const MARKER_VALUE: &str = "true";
const MARKER_MAX_AGE_DAYS: i64 = 365;

/// Reads and writes the already-logged marker through a [`CookieStore`].
pub struct AlreadyLoggedMarker;

impl AlreadyLoggedMarker {
    /// True when the marker cookie is present and set.
    pub fn is_set(cookies: &dyn CookieStore) -> bool {
        cookies
            .get(ALREADY_LOGGED_COOKIE)
            .map(|value| value == MARKER_VALUE)
            .unwrap_or(false)
    }

    /// Persist the marker for a year.
    pub fn set(cookies: &dyn CookieStore) {
        cookies.set(ALREADY_LOGGED_COOKIE, MARKER_VALUE, &Self::options());
    }

    /// Remove the marker.
    pub fn clear(cookies: &dyn CookieStore) {
        cookies.remove(ALREADY_LOGGED_COOKIE);
    }

    fn options() -> CookieOptions {
        CookieOptions {
            path: "/".to_string(),
            max_age: Some(Duration::days(MARKER_MAX_AGE_DAYS)),
            secure: false,
            same_site: SameSite::Lax,
        }
    }
}
