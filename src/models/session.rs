// SPDX-License-Identifier: MIT

//! OAuth session metadata and derived state.
//!
//! The server keeps no copy of the session; everything here is
//! reconstructed from cookies on each request.

use serde::{Deserialize, Serialize};

/// Session metadata stored in the `oauth_session_meta` cookie.
///
/// Field names stay camelCase on the wire so existing cookies written by
/// the previous incarnation of the admin panel remain readable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMeta {
    /// When the session was established (unix ms)
    pub connected_at: i64,
    /// When the access token expires (unix ms)
    pub expires_at: i64,
    /// Granted OAuth scopes
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Last successful token refresh (unix ms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_refresh: Option<i64>,
}

impl SessionMeta {
    /// Whether the access token is past its expiry at `now_ms`.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }

    /// Milliseconds until expiry, clamped to zero.
    pub fn time_to_expiry(&self, now_ms: i64) -> i64 {
        (self.expires_at - now_ms).max(0)
    }
}

/// Google account profile stored in the `google_user_info` cookie.
///
/// Fetched best-effort after the token exchange; any field may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleUserInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

/// Connection status reported by `GET /api/auth/google/refresh`.
///
/// This is a local judgment from cookies only; a remotely revoked token
/// still reports `connected: true` until a refresh attempt fails.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_expired: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_expiry: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_refresh: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<GoogleUserInfo>,
}

impl SessionStatus {
    /// Status when no access-token cookie is present.
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            is_expired: None,
            time_to_expiry: None,
            connected_at: None,
            last_refresh: None,
            scopes: None,
            user: None,
        }
    }
}

/// Current wall clock in unix milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
