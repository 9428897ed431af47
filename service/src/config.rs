use clap::builder::TypedValueParser as _;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::LevelFilter;
use session_auth::http::HttpClientConfig;
use session_auth::DEFAULT_BASE_URL;
use std::fmt;
use std::time::Duration;

/// Page the binary pretends to be on when building the login redirect.
pub const DEFAULT_RETURN_URL: &str = "http://localhost:3000/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthParamParseError {
    pub param: String,
}

impl fmt::Display for AuthParamParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "invalid auth param \"{}\", expected key=value",
            self.param
        )
    }
}

impl std::error::Error for AuthParamParseError {}

#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Restore the session from the configured cookies and report the result
    Init,
    /// Print the login redirect target
    LoginUrl,
    /// Print the logout redirect target
    LogoutUrl,
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// What to do; defaults to `init`.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Origin of the auth service exposing /auth/login, /auth/refresh and /auth/logout.
    #[arg(long, env, default_value = DEFAULT_BASE_URL)]
    auth_base_url: String,

    /// URL of the current page, sent as `returnUrl` on login.
    #[arg(long, env, default_value = DEFAULT_RETURN_URL)]
    return_url: String,

    /// Extra query parameters for login and refresh requests, as key=value.
    #[arg(
        long = "auth-param",
        env = "AUTH_PARAMS",
        value_delimiter = ','
    )]
    auth_params: Vec<String>,

    /// Raw `name=value` session cookie to send to the refresh endpoint.
    #[arg(long, env)]
    session_cookie: Option<String>,

    /// Timeout in seconds for the refresh request. Unset means no timeout.
    #[arg(long, env)]
    pub request_timeout_secs: Option<u64>,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Init)
    }

    pub fn set_auth_base_url(mut self, auth_base_url: String) -> Self {
        self.auth_base_url = auth_base_url;
        self
    }

    pub fn auth_base_url(&self) -> &str {
        &self.auth_base_url
    }

    pub fn return_url(&self) -> &str {
        &self.return_url
    }

    pub fn session_cookie(&self) -> Option<String> {
        self.session_cookie.clone()
    }

    /// Parses the configured `key=value` auth params, keeping their order.
    pub fn auth_params(&self) -> Result<Vec<(String, String)>, AuthParamParseError> {
        self.auth_params
            .iter()
            .map(|param| match param.split_once('=') {
                Some((key, value)) if !key.is_empty() => {
                    Ok((key.to_string(), value.to_string()))
                }
                _ => Err(AuthParamParseError {
                    param: param.clone(),
                }),
            })
            .collect()
    }

    /// HTTP settings for the session client.
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..HttpClientConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const CONFIG_VARS: [&str; 6] = [
        "AUTH_BASE_URL",
        "RETURN_URL",
        "AUTH_PARAMS",
        "SESSION_COOKIE",
        "REQUEST_TIMEOUT_SECS",
        "LOG_LEVEL_FILTER",
    ];

    struct EnvGuard {
        saved_vars: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new(vars: &[&str]) -> Self {
            let saved_vars = vars
                .iter()
                .map(|var| (var.to_string(), env::var(var).ok()))
                .collect();
            EnvGuard { saved_vars }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.saved_vars {
                match value {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
        }
    }

    /// Saves the config variables and clears them for the duration of a test.
    fn clean_env() -> EnvGuard {
        let guard = EnvGuard::new(&CONFIG_VARS);
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
        guard
    }

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["session-probe"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    #[serial]
    fn test_command_defaults_to_init() {
        let _guard = clean_env();
        let config = parse(&[]);
        assert_eq!(config.command(), Command::Init);
    }

    #[test]
    #[serial]
    fn test_subcommands_parse() {
        let _guard = clean_env();
        assert_eq!(parse(&["login-url"]).command(), Command::LoginUrl);
        assert_eq!(parse(&["logout-url"]).command(), Command::LogoutUrl);
    }

    #[test]
    #[serial]
    fn test_auth_params_keep_order() {
        let _guard = clean_env();
        let config = parse(&[
            "--auth-param",
            "customToken=abc123",
            "--auth-param",
            "tenant=acme,locale=en=US",
        ]);

        assert_eq!(
            config.auth_params().unwrap(),
            vec![
                ("customToken".to_string(), "abc123".to_string()),
                ("tenant".to_string(), "acme".to_string()),
                ("locale".to_string(), "en=US".to_string()),
            ]
        );
    }

    #[test]
    #[serial]
    fn test_malformed_auth_param_is_rejected() {
        let _guard = clean_env();
        let config = parse(&["--auth-param", "novalue"]);
        let err = config.auth_params().unwrap_err();
        assert_eq!(err.param, "novalue");

        let config = parse(&["--auth-param", "=value"]);
        assert!(config.auth_params().is_err());
    }

    #[test]
    #[serial]
    fn test_http_client_config_timeout() {
        let _guard = clean_env();
        let config = parse(&["--request-timeout-secs", "15"]);
        assert_eq!(
            config.http_client_config().timeout,
            Some(Duration::from_secs(15))
        );
    }

    #[test]
    #[serial]
    fn test_set_auth_base_url() {
        let _guard = clean_env();
        let config = parse(&[]).set_auth_base_url("http://localhost:8080".to_string());
        assert_eq!(config.auth_base_url(), "http://localhost:8080");
    }

    #[test]
    #[serial]
    fn test_values_from_env() {
        let _guard = clean_env();
        env::set_var("AUTH_BASE_URL", "http://localhost:8080");
        env::set_var("AUTH_PARAMS", "customToken=abc123,tenant=acme");
        env::set_var("REQUEST_TIMEOUT_SECS", "5");

        let config = parse(&[]);
        assert_eq!(config.auth_base_url(), "http://localhost:8080");
        assert_eq!(
            config.auth_params().unwrap(),
            vec![
                ("customToken".to_string(), "abc123".to_string()),
                ("tenant".to_string(), "acme".to_string()),
            ]
        );
        assert_eq!(config.request_timeout_secs, Some(5));
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        let _guard = clean_env();
        let config = parse(&[]);
        assert_eq!(config.auth_base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.return_url(), DEFAULT_RETURN_URL);
        assert!(config.auth_params().unwrap().is_empty());
        assert_eq!(config.session_cookie(), None);
        assert_eq!(config.http_client_config().timeout, None);
        assert_eq!(config.log_level_filter, LevelFilter::Info);
    }
}
