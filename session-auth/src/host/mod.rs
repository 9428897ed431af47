//! Host environment capabilities.
//!
//! The session client never talks to a browser directly. Page navigation and
//! client-side cookies are reached through these traits so the lifecycle can
//! run (and be tested) without a real page.

mod cookies;
mod navigator;

pub use cookies::{CookieOptions, CookieStore, MemoryCookieStore, SameSite};
pub use navigator::{Navigator, RecordingNavigator};
