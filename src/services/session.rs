// SPDX-License-Identifier: MIT

//! Session cookie management.
//!
//! The OAuth session lives entirely in four httpOnly cookies owned by the
//! browser. Removal cookies must carry the same attributes as creation
//! cookies or browsers keep the stale value.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::models::{GoogleUserInfo, SessionMeta};
use crate::services::google::GoogleTokenResponse;

pub const ACCESS_TOKEN_COOKIE: &str = "google_access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "google_refresh_token";
pub const USER_INFO_COOKIE: &str = "google_user_info";
pub const SESSION_META_COOKIE: &str = "oauth_session_meta";

/// All four session cookie names, in teardown order.
pub const SESSION_COOKIES: [&str; 4] = [
    ACCESS_TOKEN_COOKIE,
    REFRESH_TOKEN_COOKIE,
    USER_INFO_COOKIE,
    SESSION_META_COOKIE,
];

const REFRESH_TOKEN_MAX_AGE_DAYS: i64 = 30;
const METADATA_MAX_AGE_HOURS: i64 = 24;

/// Session state reconstructed from a request's cookie jar.
#[derive(Debug, Default)]
pub struct SessionView {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user_info: Option<GoogleUserInfo>,
    pub meta: Option<SessionMeta>,
}

/// Read the session back out of the cookie jar.
///
/// Corrupt JSON in the info/meta cookies is treated as absent, not as an
/// error; the status endpoint degrades gracefully.
pub fn read_session(jar: &CookieJar) -> SessionView {
    SessionView {
        access_token: jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string()),
        refresh_token: jar.get(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_string()),
        user_info: jar
            .get(USER_INFO_COOKIE)
            .and_then(|c| serde_json::from_str(c.value()).ok()),
        meta: jar
            .get(SESSION_META_COOKIE)
            .and_then(|c| serde_json::from_str(c.value()).ok()),
    }
}

fn session_cookie(name: &'static str, value: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .build()
}

/// Cookies set by the OAuth callback after a successful exchange.
///
/// The refresh-token cookie is only written when Google granted one; the
/// userinfo cookie only when the profile fetch succeeded.
pub fn creation_cookies(
    tokens: &GoogleTokenResponse,
    user_info: Option<&GoogleUserInfo>,
    meta: &SessionMeta,
    secure: bool,
) -> Vec<Cookie<'static>> {
    let mut cookies = vec![session_cookie(
        ACCESS_TOKEN_COOKIE,
        tokens.access_token.clone(),
        Duration::seconds(tokens.expires_in),
        secure,
    )];

    if let Some(refresh_token) = &tokens.refresh_token {
        cookies.push(session_cookie(
            REFRESH_TOKEN_COOKIE,
            refresh_token.clone(),
            Duration::days(REFRESH_TOKEN_MAX_AGE_DAYS),
            secure,
        ));
    }

    if let Some(info) = user_info {
        if let Ok(json) = serde_json::to_string(info) {
            cookies.push(session_cookie(
                USER_INFO_COOKIE,
                json,
                Duration::hours(METADATA_MAX_AGE_HOURS),
                secure,
            ));
        }
    }

    if let Ok(json) = serde_json::to_string(meta) {
        cookies.push(session_cookie(
            SESSION_META_COOKIE,
            json,
            Duration::hours(METADATA_MAX_AGE_HOURS),
            secure,
        ));
    }

    cookies
}

/// Cookies overwritten by a successful refresh: access token and metadata
/// only. Refresh token and user info are untouched.
pub fn refresh_cookies(
    tokens: &GoogleTokenResponse,
    meta: &SessionMeta,
    secure: bool,
) -> Vec<Cookie<'static>> {
    let mut cookies = vec![session_cookie(
        ACCESS_TOKEN_COOKIE,
        tokens.access_token.clone(),
        Duration::seconds(tokens.expires_in),
        secure,
    )];

    if let Ok(json) = serde_json::to_string(meta) {
        cookies.push(session_cookie(
            SESSION_META_COOKIE,
            json,
            Duration::hours(METADATA_MAX_AGE_HOURS),
            secure,
        ));
    }

    cookies
}

/// Removal cookies for all four session cookies (Max-Age=0, matching
/// attributes). Used by disconnect and by forced teardown when Google
/// rejects the refresh token; partial cleanup is never acceptable.
pub fn removal_cookies(secure: bool) -> Vec<Cookie<'static>> {
    SESSION_COOKIES
        .iter()
        .map(|name| {
            Cookie::build((*name, ""))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(secure)
                .max_age(Duration::ZERO)
                .build()
        })
        .collect()
}
