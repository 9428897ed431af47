//! # session-auth
//!
//! Client side helper for an auth service that keeps the user's session in
//! HTTP-only cookies:
//! - Access token acquisition and refresh, held in memory only
//! - Login and logout redirects
//! - Lifecycle callbacks for the hosting application
//! - The advisory "already logged" marker cookie
//!
//! ## Usage
//!
//! ```rust,ignore
//! use session_auth::{
//!     host::{MemoryCookieStore, RecordingNavigator},
//!     SessionClient, SessionConfig,
//! };
//!
//! let client = SessionClient::new(
//!     SessionConfig::new().on_login_required(|| println!("please sign in")),
//!     Arc::new(RecordingNavigator::new("https://app.example.com/")),
//!     Arc::new(MemoryCookieStore::new()),
//! )?;
//! client.init().await;
//! ```

pub mod error;
pub mod host;
pub mod http;
pub mod marker;
pub mod redirect;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
pub use session::{SessionClient, SessionConfig, SessionState, DEFAULT_BASE_URL};
pub use token::AccessToken;
