//! Credentialed HTTP client builder.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;

use crate::error::Error;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout. `None` leaves requests pending until the transport gives up.
    pub timeout: Option<Duration>,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: format!("session-auth/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for the HTTP client used to reach the auth service.
///
/// The client always keeps a cookie store so the session cookies set by the
/// auth service are sent with every refresh request. Pass a shared [`Jar`] to
/// seed or inspect those cookies from outside.
pub struct HttpClientBuilder {
    config: HttpClientConfig,
    cookie_jar: Option<Arc<Jar>>,
}

impl HttpClientBuilder {
    /// Create a new client builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: HttpClientConfig::default(),
            cookie_jar: None,
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: HttpClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.config.user_agent = user_agent;
        self
    }

    /// Use a shared cookie jar instead of a private one.
    pub fn with_cookie_jar(mut self, jar: Arc<Jar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Build the configured HTTP client.
    pub fn build(self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder().user_agent(self.config.user_agent);

        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }

        builder = match self.cookie_jar {
            Some(jar) => builder.cookie_provider(jar),
            None => builder.cookie_store(true),
        };

        Ok(builder.build()?)
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
