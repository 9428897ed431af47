//! Session client configuration and lifecycle callbacks.

use std::sync::Arc;

use reqwest::cookie::Jar;

use crate::error::Error;
use crate::http::HttpClientConfig;
use crate::token::AccessToken;

/// Production auth service origin used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://accounts.example.com";

type Handler = Arc<dyn Fn() + Send + Sync>;
type TokenHandler = Arc<dyn Fn(&AccessToken) + Send + Sync>;
type ErrorHandler = Arc<dyn Fn(&Error) + Send + Sync>;
type ParamsSupplier = Arc<dyn Fn() -> Vec<(String, String)> + Send + Sync>;

/// Optional handlers invoked at session state transitions.
///
/// Every handler is optional; a missing handler is a no-op.
#[derive(Clone, Default)]
pub struct Callbacks {
    login_success: Option<Handler>,
    login_required: Option<Handler>,
    logout: Option<Handler>,
    token_refresh: Option<TokenHandler>,
    error: Option<ErrorHandler>,
    additional_auth_params: Option<ParamsSupplier>,
}

impl Callbacks {
    pub(crate) fn login_success(&self) {
        if let Some(handler) = &self.login_success {
            handler();
        }
    }

    pub(crate) fn login_required(&self) {
        if let Some(handler) = &self.login_required {
            handler();
        }
    }

    pub(crate) fn logout(&self) {
        if let Some(handler) = &self.logout {
            handler();
        }
    }

    pub(crate) fn token_refresh(&self, token: &AccessToken) {
        if let Some(handler) = &self.token_refresh {
            handler(token);
        }
    }

    pub(crate) fn error(&self, error: &Error) {
        if let Some(handler) = &self.error {
            handler(error);
        }
    }

    /// Extra query parameters for login and refresh requests, in order.
    pub(crate) fn additional_auth_params(&self) -> Vec<(String, String)> {
        self.additional_auth_params
            .as_ref()
            .map(|supplier| supplier())
            .unwrap_or_default()
    }
}

/// Configuration bundle for a [`SessionClient`](super::SessionClient).
///
/// All fields are optional.
///
/// # Examples
///
/// ```rust,ignore
/// let config = SessionConfig::new()
///     .with_base_url("https://accounts.example.com")
///     .on_login_required(|| show_sign_in_button())
///     .on_error(|e| log::warn!("session error: {}", e))
///     .with_additional_auth_params(|| vec![("customToken".into(), "abc123".into())]);
/// ```
#[derive(Clone, Default)]
pub struct SessionConfig {
    pub(crate) base_url: Option<String>,
    pub(crate) callbacks: Callbacks,
    pub(crate) http: HttpClientConfig,
    pub(crate) cookie_jar: Option<Arc<Jar>>,
}

impl SessionConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the auth service origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Called by `init()` when a session was restored.
    pub fn on_login_success(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.callbacks.login_success = Some(Arc::new(handler));
        self
    }

    /// Called by `init()` when there is no session to restore.
    pub fn on_login_required(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.callbacks.login_required = Some(Arc::new(handler));
        self
    }

    /// Called by `logout()` before redirecting.
    pub fn on_logout(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.callbacks.logout = Some(Arc::new(handler));
        self
    }

    /// Called with every newly obtained access token.
    pub fn on_token_refresh(
        mut self,
        handler: impl Fn(&AccessToken) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.token_refresh = Some(Arc::new(handler));
        self
    }

    /// Called when a refresh fails.
    pub fn on_error(mut self, handler: impl Fn(&Error) + Send + Sync + 'static) -> Self {
        self.callbacks.error = Some(Arc::new(handler));
        self
    }

    /// Supplier of extra query parameters for login and refresh requests.
    pub fn with_additional_auth_params(
        mut self,
        supplier: impl Fn() -> Vec<(String, String)> + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.additional_auth_params = Some(Arc::new(supplier));
        self
    }

    /// HTTP client settings.
    pub fn with_http_config(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }

    /// Cookie jar holding the auth service's session cookies.
    pub fn with_cookie_jar(mut self, jar: Arc<Jar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// The base URL that will be used, falling back to [`DEFAULT_BASE_URL`].
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}
