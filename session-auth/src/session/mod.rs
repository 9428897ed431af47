//! Session lifecycle: restore, refresh, login and logout.

mod client;
mod config;
mod state;

pub use client::SessionClient;
pub use config::{Callbacks, SessionConfig, DEFAULT_BASE_URL};
pub use state::SessionState;
