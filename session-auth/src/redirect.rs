//! Auth service endpoint URLs.

const REFRESH_PATH: &str = "/auth/refresh";
const LOGIN_PATH: &str = "/auth/login";
const LOGOUT_PATH: &str = "/auth/logout";

/// URL for the token refresh request, with any extra parameters as the query.
pub fn refresh_url(base_url: &str, params: &[(String, String)]) -> String {
    let url = format!("{}{}", base_url, REFRESH_PATH);
    if params.is_empty() {
        return url;
    }
    format!("{}?{}", url, encode_query(params))
}

/// Login redirect target. `returnUrl` comes first, extra parameters follow in order.
pub fn login_url(base_url: &str, return_url: &str, params: &[(String, String)]) -> String {
    let mut url = format!(
        "{}{}?returnUrl={}",
        base_url,
        LOGIN_PATH,
        urlencoding::encode(return_url)
    );
    if !params.is_empty() {
        url.push('&');
        url.push_str(&encode_query(params));
    }
    url
}

/// Logout redirect target.
pub fn logout_url(base_url: &str) -> String {
    format!("{}{}", base_url, LOGOUT_PATH)
}

fn encode_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
