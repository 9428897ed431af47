//! Session client: access token lifecycle against the auth service.

use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info, warn};
use reqwest::StatusCode;
use serde::Deserialize;

use super::{Callbacks, SessionConfig, SessionState};
use crate::error::{
    config_error, session_error, unexpected_status, ConfigErrorKind, Error, ErrorKind,
    SessionErrorKind,
};
use crate::host::{CookieStore, Navigator};
use crate::http::HttpClientBuilder;
use crate::marker::AlreadyLoggedMarker;
use crate::redirect;
use crate::token::AccessToken;

/// Body of a successful refresh response.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    #[serde(rename = "accessToken", default)]
    access_token: Option<String>,
}

/// Client side view of an auth session.
///
/// Holds the access token in memory only. The session itself lives in
/// HTTP-only cookies owned by the auth service; this client restores a token
/// from it via the refresh endpoint and sends the user to the service's login
/// and logout pages.
///
/// All operations take `&self`. Concurrent `refresh()` calls are not
/// coalesced: each sends its own request and whichever completes last decides
/// the stored token.
pub struct SessionClient {
    base_url: String,
    access_token: RwLock<Option<AccessToken>>,
    callbacks: Callbacks,
    http_client: reqwest::Client,
    navigator: Arc<dyn Navigator>,
    cookies: Arc<dyn CookieStore>,
}

impl SessionClient {
    /// Create a session client. No request is sent and no callback runs.
    ///
    /// # Arguments
    ///
    /// * `config` - Base URL override, callbacks and HTTP settings
    /// * `navigator` - Page navigation used by `login()` and `logout()`
    /// * `cookies` - Client-side cookie storage for the already-logged marker
    pub fn new(
        config: SessionConfig,
        navigator: Arc<dyn Navigator>,
        cookies: Arc<dyn CookieStore>,
    ) -> Result<Self, Error> {
        let base_url = config.base_url().trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| {
            config_error(
                ConfigErrorKind::InvalidBaseUrl,
                &format!("Invalid auth base URL {}: {}", base_url, e),
            )
        })?;

        let mut builder = HttpClientBuilder::new().with_config(config.http);
        if let Some(jar) = config.cookie_jar {
            builder = builder.with_cookie_jar(jar);
        }
        let http_client = builder.build()?;

        Ok(Self {
            base_url,
            access_token: RwLock::new(None),
            callbacks: config.callbacks,
            http_client,
            navigator,
            cookies,
        })
    }

    /// Restore the session at application startup.
    ///
    /// Runs a refresh, then calls `on_login_success` if a token is now held or
    /// `on_login_required` if not. A failed refresh is reported once through
    /// `on_error` and not propagated.
    pub async fn init(&self) -> SessionState {
        if let Err(e) = self.refresh_token().await {
            warn!("Session restore failed: {}", e);
            self.callbacks.error(&e);
            return SessionState::Unauthenticated;
        }

        let state = self.state();
        match state {
            SessionState::Authenticated => self.callbacks.login_success(),
            SessionState::Unauthenticated => self.callbacks.login_required(),
        }
        state
    }

    /// Exchange the session cookies for a fresh access token.
    ///
    /// A 401 response is not an error: it clears the token and returns `Ok`.
    /// Every error is also reported through `on_error` before being returned.
    pub async fn refresh(&self) -> Result<(), Error> {
        let result = self.refresh_token().await;
        if let Err(e) = &result {
            self.callbacks.error(e);
        }
        result
    }

    /// Redirect to the auth service login page.
    ///
    /// The current page is passed as `returnUrl` so the service can send the
    /// user back afterwards. Token state is left untouched.
    pub fn login(&self) {
        let params = self.callbacks.additional_auth_params();
        let url = redirect::login_url(&self.base_url, &self.navigator.current_url(), &params);
        debug!("Redirecting to login");
        self.navigator.redirect(&url);
    }

    /// Run `on_logout` and redirect to the auth service logout page, which
    /// clears the server side session cookies.
    pub fn logout(&self) {
        self.callbacks.logout();
        debug!("Redirecting to logout");
        self.navigator.redirect(&redirect::logout_url(&self.base_url));
    }

    /// The access token held in memory, if any.
    pub fn get_access_token(&self) -> Option<AccessToken> {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn state(&self) -> SessionState {
        if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Effective auth service origin, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the user has signed in on this device before.
    pub fn is_already_logged(&self) -> bool {
        AlreadyLoggedMarker::is_set(self.cookies.as_ref())
    }

    pub fn mark_already_logged(&self) {
        AlreadyLoggedMarker::set(self.cookies.as_ref());
    }

    pub fn clear_already_logged(&self) {
        AlreadyLoggedMarker::clear(self.cookies.as_ref());
    }

    /// Refresh without reporting errors through `on_error`.
    async fn refresh_token(&self) -> Result<(), Error> {
        match self.request_token().await {
            Ok(Some(token)) => {
                self.set_access_token(Some(token.clone()));
                self.callbacks.token_refresh(&token);
                Ok(())
            }
            Ok(None) => {
                self.set_access_token(None);
                Ok(())
            }
            Err(e) => {
                self.set_access_token(None);
                Err(e)
            }
        }
    }

    /// Call the refresh endpoint. `Ok(None)` means there is no valid session.
    async fn request_token(&self) -> Result<Option<AccessToken>, Error> {
        let params = self.callbacks.additional_auth_params();
        let url = redirect::refresh_url(&self.base_url, &params);

        debug!("Refreshing access token");

        let response = self.http_client.post(&url).send().await.map_err(|e| {
            warn!("Failed to reach auth refresh endpoint: {:?}", e);
            Error::from(e)
        })?;

        match response.status() {
            StatusCode::OK => {
                let body = response.bytes().await.map_err(|e| {
                    warn!("Failed to read auth refresh response: {:?}", e);
                    Error::from(e)
                })?;
                let token = Self::parse_token(&body)?;
                info!("Successfully refreshed access token");
                Ok(Some(token))
            }
            StatusCode::UNAUTHORIZED => {
                info!("No active session");
                Ok(None)
            }
            status => {
                warn!("Auth refresh failed with status {}", status);
                let status_text = Self::status_text(&response);
                Err(unexpected_status(status, status_text))
            }
        }
    }

    /// Reason phrase as sent on the wire. hyper only records it when it
    /// differs from the canonical one for the code.
    fn status_text(response: &reqwest::Response) -> String {
        match response.extensions().get::<hyper::ext::ReasonPhrase>() {
            Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
            None => response
                .status()
                .canonical_reason()
                .unwrap_or("")
                .to_string(),
        }
    }

    fn parse_token(body: &[u8]) -> Result<AccessToken, Error> {
        let response: RefreshResponse = serde_json::from_slice(body).map_err(|e| {
            warn!("Failed to parse auth refresh response: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: ErrorKind::Session(SessionErrorKind::InvalidAuthResponse),
            }
        })?;

        response
            .access_token
            .and_then(AccessToken::new)
            .ok_or_else(|| {
                warn!("Auth refresh response has no access token");
                session_error(
                    SessionErrorKind::InvalidAuthResponse,
                    "Missing or empty accessToken",
                )
            })
    }

    fn set_access_token(&self, token: Option<AccessToken>) {
        *self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }
}
