use log::{debug, error, info, warn};
use reqwest::cookie::Jar;
use reqwest::Url;
use service::config::{Command, Config};
use service::logging::Logger;
use session_auth::host::{MemoryCookieStore, RecordingNavigator};
use session_auth::{SessionClient, SessionConfig, SessionState};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to start logger: {e}");
        std::process::exit(1);
    }

    let auth_params = match config.auth_params() {
        Ok(params) => params,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let jar = Arc::new(Jar::default());
    if let Some(cookie) = config.session_cookie() {
        match Url::parse(config.auth_base_url()) {
            Ok(url) => jar.add_cookie_str(&cookie, &url),
            Err(e) => {
                error!("Invalid auth base URL [{}]: {e}", config.auth_base_url());
                std::process::exit(1);
            }
        }
    }

    let session_config = SessionConfig::new()
        .with_base_url(config.auth_base_url())
        .with_http_config(config.http_client_config())
        .with_cookie_jar(jar)
        .with_additional_auth_params(move || auth_params.clone())
        .on_login_success(|| info!("Session restored"))
        .on_login_required(|| info!("Login required"))
        .on_logout(|| info!("Logging out"))
        .on_token_refresh(|_| debug!("Received a new access token"))
        .on_error(|e| warn!("Session error: {e}"));

    let navigator = Arc::new(RecordingNavigator::new(config.return_url()));
    let client = match SessionClient::new(
        session_config,
        navigator.clone(),
        Arc::new(MemoryCookieStore::new()),
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create session client: {e}");
            std::process::exit(1);
        }
    };

    match config.command() {
        Command::Init => {
            info!("Restoring session from [{}]...", client.base_url());
            let state = client.init().await;
            if state == SessionState::Authenticated {
                client.mark_already_logged();
            }
            println!("{}", state.as_str());
        }
        Command::LoginUrl => {
            client.login();
            print_redirect(&navigator);
        }
        Command::LogoutUrl => {
            client.logout();
            print_redirect(&navigator);
        }
    }
}

fn print_redirect(navigator: &RecordingNavigator) {
    if let Some(url) = navigator.last_redirect() {
        println!("{url}");
    }
}
