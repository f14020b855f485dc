//! Session cookie handling.
//!
//! The login session travels in a single HttpOnly cookie carrying the raw
//! session token. API clients may send the same token as a Bearer header.

use axum::http::{
    header::{AUTHORIZATION, COOKIE, SET_COOKIE},
    HeaderMap, HeaderValue,
};

use crate::config::SessionConfig;

/// Builds and reads the session cookie according to [`SessionConfig`].
#[derive(Debug, Clone)]
pub struct CookieHelper {
    config: SessionConfig,
}

impl CookieHelper {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// `Set-Cookie` value carrying a fresh session token.
    pub fn build_session_cookie(&self, token: &str) -> String {
        self.with_attributes(format!(
            "{}={}; Path=/; Max-Age={}",
            self.config.cookie_name, token, self.config.ttl_secs
        ))
    }

    /// `Set-Cookie` value that makes the browser drop the session cookie.
    pub fn build_clear_cookie(&self) -> String {
        self.with_attributes(format!(
            "{}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            self.config.cookie_name
        ))
    }

    pub fn set_session_cookie(&self, headers: &mut HeaderMap, token: &str) {
        if let Ok(value) = HeaderValue::from_str(&self.build_session_cookie(token)) {
            headers.append(SET_COOKIE, value);
        }
    }

    pub fn clear_session_cookie(&self, headers: &mut HeaderMap) {
        if let Ok(value) = HeaderValue::from_str(&self.build_clear_cookie()) {
            headers.append(SET_COOKIE, value);
        }
    }

    /// Returns the session token from the cookie, falling back to an
    /// `Authorization: Bearer` header.
    pub fn extract_token(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.config.cookie_name)
            .or_else(|| extract_bearer(headers))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }

    fn with_attributes(&self, mut cookie: String) -> String {
        cookie.push_str("; HttpOnly");
        if self.config.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", same_site_label(&self.config.same_site)));
        if !self.config.domain.is_empty() {
            cookie.push_str(&format!("; Domain={}", self.config.domain));
        }
        cookie
    }
}

fn same_site_label(value: &str) -> &'static str {
    match value.to_lowercase().as_str() {
        "strict" => "Strict",
        "none" => "None",
        _ => "Lax",
    }
}

/// Finds a cookie by name across all `Cookie` headers.
pub fn extract_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then_some(value)
        })
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}
