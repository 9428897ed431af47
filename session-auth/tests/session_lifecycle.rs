use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mockito::{Server, ServerGuard};
use session_auth::host::{MemoryCookieStore, RecordingNavigator};
use session_auth::{SessionClient, SessionConfig, SessionState};

const PAGE_URL: &str = "https://app.example.com/projects?id=7";

/// Everything a test wants to observe about the callbacks.
#[derive(Default)]
struct Observed {
    events: Mutex<Vec<String>>,
    errors: AtomicUsize,
}

impl Observed {
    fn push(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

fn observed_config(base_url: &str, observed: &Arc<Observed>) -> SessionConfig {
    let (a, b, c, d, e) = (
        observed.clone(),
        observed.clone(),
        observed.clone(),
        observed.clone(),
        observed.clone(),
    );
    SessionConfig::new()
        .with_base_url(base_url)
        .on_login_success(move || a.push("login_success"))
        .on_login_required(move || b.push("login_required"))
        .on_logout(move || c.push("logout"))
        .on_token_refresh(move |token| d.push(format!("token:{}", token.expose())))
        .on_error(move |_| {
            e.errors.fetch_add(1, Ordering::SeqCst);
            e.push("error");
        })
}

async fn setup() -> (ServerGuard, Arc<Observed>) {
    (Server::new_async().await, Arc::new(Observed::default()))
}

fn build(config: SessionConfig) -> (SessionClient, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::new(PAGE_URL));
    let client = SessionClient::new(config, navigator.clone(), Arc::new(MemoryCookieStore::new()))
        .expect("client should build");
    (client, navigator)
}

#[tokio::test]
async fn test_every_valid_token_is_stored_and_reported_once() {
    let (mut server, observed) = setup().await;
    let (client, _) = build(observed_config(&server.url(), &observed));

    for token in ["tok", "eyJhbGciOiJIUzI1NiJ9.e30.sig", "a b/c+d=="] {
        server.reset_async().await;
        let _mock = server
            .mock("POST", "/auth/refresh")
            .with_status(200)
            .with_body(serde_json::json!({ "accessToken": token }).to_string())
            .create_async()
            .await;

        client.refresh().await.unwrap();
        assert_eq!(client.get_access_token().unwrap().expose(), token);
    }

    assert_eq!(
        observed.events(),
        vec![
            "token:tok",
            "token:eyJhbGciOiJIUzI1NiJ9.e30.sig",
            "token:a b/c+d==",
        ]
    );
}

#[tokio::test]
async fn test_unauthorized_scenario_has_no_error_callback() {
    let (mut server, observed) = setup().await;
    let _mock = server
        .mock("POST", "/auth/refresh")
        .with_status(401)
        .create_async()
        .await;
    let (client, _) = build(observed_config(&server.url(), &observed));

    assert!(client.refresh().await.is_ok());
    assert!(client.get_access_token().is_none());
    assert_eq!(observed.errors.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failed_refresh_after_success_returns_to_unauthenticated() {
    let (mut server, observed) = setup().await;
    let _ok = server
        .mock("POST", "/auth/refresh")
        .with_status(200)
        .with_body(r#"{"accessToken":"tok"}"#)
        .create_async()
        .await;
    let (client, _) = build(observed_config(&server.url(), &observed));

    client.refresh().await.unwrap();
    assert_eq!(client.state(), SessionState::Authenticated);

    server.reset_async().await;
    let _failing = server
        .mock("POST", "/auth/refresh")
        .with_status(502)
        .create_async()
        .await;

    let err = client.refresh().await.unwrap_err();
    assert_eq!(err.to_string(), "Bad Gateway");
    assert_eq!(client.state(), SessionState::Unauthenticated);
    assert_eq!(observed.errors.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_init_never_fails_on_network_error() {
    let observed = Arc::new(Observed::default());
    let (client, _) = build(observed_config("http://127.0.0.1:1", &observed));

    let state = client.init().await;

    assert_eq!(state, SessionState::Unauthenticated);
    assert_eq!(observed.events(), vec!["error"]);
    assert_eq!(observed.errors.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_full_lifecycle() {
    let (mut server, observed) = setup().await;
    let unauthorized = server
        .mock("POST", "/auth/refresh")
        .match_query(mockito::Matcher::UrlEncoded(
            "customToken".into(),
            "abc123".into(),
        ))
        .with_status(401)
        .create_async()
        .await;
    let (client, navigator) = build(
        observed_config(&server.url(), &observed)
            .with_additional_auth_params(|| vec![("customToken".into(), "abc123".into())]),
    );

    // First visit: nothing to restore, so the user is sent to log in.
    assert_eq!(client.init().await, SessionState::Unauthenticated);
    unauthorized.assert_async().await;
    client.login();

    let login_target = navigator.last_redirect().unwrap();
    assert!(login_target.starts_with(&format!("{}/auth/login?", server.url())));
    assert!(login_target.contains("returnUrl=https%3A%2F%2Fapp.example.com%2Fprojects%3Fid%3D7"));
    assert!(login_target.contains("customToken=abc123"));

    // Back from the login page with a session cookie in place.
    server.reset_async().await;
    let ok = server
        .mock("POST", "/auth/refresh")
        .match_query(mockito::Matcher::UrlEncoded(
            "customToken".into(),
            "abc123".into(),
        ))
        .with_status(200)
        .with_body(r#"{"accessToken":"tok"}"#)
        .create_async()
        .await;

    assert_eq!(client.init().await, SessionState::Authenticated);
    ok.assert_async().await;
    client.mark_already_logged();

    client.logout();
    assert_eq!(
        navigator.last_redirect().unwrap(),
        format!("{}/auth/logout", server.url())
    );
    // Logout navigates away; the in-memory token is left for the next page to discard.
    assert!(client.is_authenticated());
    assert!(client.is_already_logged());

    assert_eq!(
        observed.events(),
        vec!["login_required", "token:tok", "login_success", "logout"]
    );
}
