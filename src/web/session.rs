use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use url::form_urlencoded;
use crate::api::credentials::Credentials;

pub const USERNAME_COOKIE: &str = "registry_username";
pub const PASSWORD_COOKIE: &str = "registry_password";

/// Read the value of a cookie from the request headers
pub fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| decode(value))
}

/// Credentials stored by the login form, if both cookies are present
pub fn credentials(headers: &HeaderMap) -> Option<Credentials> {
    Credentials::from_parts(get_cookie(headers, USERNAME_COOKIE), get_cookie(headers, PASSWORD_COOKIE))
}

pub fn set_cookie(name: &str, value: &str) -> String {
    format!("{name}={}; Path=/; HttpOnly; SameSite=Lax", encode(value))
}

pub fn clear_cookie(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

pub fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn decode(value: &str) -> String {
    form_urlencoded::parse(value.as_bytes())
        .next()
        .map(|(value, _)| value.into_owned())
        .unwrap_or_default()
}
