//! Ambient infrastructure shared by the workspace binaries: configuration
//! from CLI flags and environment, and terminal logging.

pub mod config;
pub mod logging;
