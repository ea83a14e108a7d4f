// SPDX-License-Identifier: MIT

//! Google OAuth authentication routes.
//!
//! The session is four httpOnly cookies; the server reconstructs it from
//! the jar on every request and holds no copy of its own.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::session::{now_ms, SessionMeta, SessionStatus};
use crate::services::session::{creation_cookies, read_session, refresh_cookies, removal_cookies};
use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Maximum age of the OAuth state parameter (10 minutes).
const STATE_MAX_AGE_MS: i64 = 10 * 60 * 1000;

/// Scopes requested from Google: identity plus read-only Search Console
/// and Analytics for the admin SEO dashboard.
const OAUTH_SCOPES: [&str; 5] = [
    "openid",
    "email",
    "profile",
    "https://www.googleapis.com/auth/webmasters.readonly",
    "https://www.googleapis.com/auth/analytics.readonly",
];

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/google/oauth", get(auth_start))
        .route("/api/auth/google/callback", get(oauth_callback))
        .route(
            "/api/auth/google/refresh",
            get(session_status).post(refresh_access_token),
        )
        .route("/api/auth/google/disconnect", post(disconnect))
}

// ─── State parameter ─────────────────────────────────────────

/// Payload round-tripped through Google in the `state` parameter.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OauthState {
    return_url: String,
    /// Creation time, unix ms; stale states are replays
    ts: i64,
}

/// Sign and encode the state: `base64url(json).hex(hmac_sha256(json))`.
fn encode_state(state: &OauthState, key: &[u8]) -> Result<String> {
    let payload = serde_json::to_string(state)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("State serialization failed: {}", e)))?;

    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    Ok(format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(payload.as_bytes()),
        signature
    ))
}

/// Verify the signature and freshness of an echoed state parameter.
///
/// Returns None for malformed input, a bad signature, or a timestamp
/// older than [`STATE_MAX_AGE_MS`]; the callback must not exchange the
/// code in any of those cases.
fn verify_and_decode_state(encoded: &str, key: &[u8], now: i64) -> Option<OauthState> {
    let (payload_b64, signature_hex) = encoded.split_once('.')?;

    let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;

    let mut mac = HmacSha256::new_from_slice(key).ok()?;
    mac.update(&payload);
    let expected = hex::encode(mac.finalize().into_bytes());

    if signature_hex != expected {
        tracing::error!("OAuth state signature mismatch, possible tampering");
        return None;
    }

    let state: OauthState = serde_json::from_slice(&payload).ok()?;

    if now - state.ts > STATE_MAX_AGE_MS {
        tracing::warn!(age_ms = now - state.ts, "OAuth state expired");
        return None;
    }

    Some(state)
}

// ─── Initiate authorization ──────────────────────────────────

#[derive(Deserialize)]
pub struct AuthStartParams {
    /// Admin route to return to after OAuth completes (default `/admin`).
    #[serde(default)]
    return_url: Option<String>,
}

/// Start the OAuth flow: 302 to Google's consent screen.
async fn auth_start(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AuthStartParams>,
) -> Result<Redirect> {
    let return_url = params.return_url.unwrap_or_else(|| "/admin".to_string());

    // Only site-relative return targets; anything else is an open redirect
    if !return_url.starts_with('/') || return_url.starts_with("//") {
        return Err(AppError::BadRequest(
            "return_url must be a site-relative path".to_string(),
        ));
    }

    let oauth_state = encode_state(
        &OauthState {
            return_url,
            ts: now_ms(),
        },
        &state.config.oauth_state_key,
    )?;

    let auth_url = format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent&state={}",
        state.config.google_auth_url,
        state.config.google_client_id,
        urlencoding::encode(&state.config.google_redirect_uri),
        urlencoding::encode(&OAUTH_SCOPES.join(" ")),
        oauth_state
    );

    tracing::info!(
        client_id = %state.config.google_client_id,
        "Starting OAuth flow, redirecting to Google"
    );

    Ok(Redirect::temporary(&auth_url))
}

// ─── Callback ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Redirect target for every callback failure path. The raw detail goes
/// into the `message` query param as a debug aid for the admin page.
fn error_redirect(frontend_url: &str, error: &str, message: &str) -> Redirect {
    let url = format!(
        "{}/admin?error={}&message={}",
        frontend_url,
        error,
        urlencoding::encode(message)
    );
    Redirect::temporary(&url)
}

/// OAuth callback: validate state, exchange code, set session cookies.
///
/// Never answers with an error status; every failure becomes a redirect
/// back to the admin page with `error`/`message` query params.
async fn oauth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> (CookieJar, Redirect) {
    let frontend = &state.config.frontend_url;

    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Google");
        return (jar, error_redirect(frontend, "oauth_denied", &error));
    }

    let Some(code) = params.code else {
        return (
            jar,
            error_redirect(frontend, "missing_code", "No authorization code in callback"),
        );
    };

    // Replay/CSRF gate: a missing, tampered or stale state means we never
    // touch the token endpoint.
    let oauth_state = params.state.as_deref().and_then(|s| {
        verify_and_decode_state(s, &state.config.oauth_state_key, now_ms())
    });
    let Some(oauth_state) = oauth_state else {
        return (
            jar,
            error_redirect(frontend, "invalid_state", "Invalid or expired state parameter"),
        );
    };

    tracing::info!("Exchanging authorization code for tokens");

    let tokens = match state.google.exchange_code(&code).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "Token exchange failed");
            return (
                jar,
                error_redirect(frontend, "token_exchange_failed", &e.to_string()),
            );
        }
    };

    // Profile is optional metadata; a failed fetch must not fail the flow
    let user_info = match state.google.get_user_info(&tokens.access_token).await {
        Ok(info) => Some(info),
        Err(e) => {
            tracing::warn!(error = %e, "Userinfo fetch failed, continuing without profile");
            None
        }
    };

    let now = now_ms();
    let meta = SessionMeta {
        connected_at: now,
        expires_at: now + tokens.expires_in * 1000,
        scopes: tokens.scopes(),
        last_refresh: None,
    };

    let mut jar = jar;
    for cookie in creation_cookies(&tokens, user_info.as_ref(), &meta, state.config.is_production())
    {
        jar = jar.add(cookie);
    }

    tracing::info!(
        email = user_info.as_ref().and_then(|u| u.email.as_deref()),
        "Google account connected"
    );

    let redirect_url = format!("{}{}?connected=google", frontend, oauth_state.return_url);
    (jar, Redirect::temporary(&redirect_url))
}

// ─── Status ──────────────────────────────────────────────────

/// Connection status: a pure cookie read, no call to Google.
///
/// A remotely revoked token still reports connected until a refresh
/// attempt fails.
async fn session_status(jar: CookieJar) -> Json<SessionStatus> {
    let view = read_session(&jar);

    if view.access_token.is_none() {
        return Json(SessionStatus::disconnected());
    }

    let now = now_ms();
    let status = match view.meta {
        Some(meta) => SessionStatus {
            connected: true,
            is_expired: Some(meta.is_expired(now)),
            time_to_expiry: Some(meta.time_to_expiry(now)),
            connected_at: Some(meta.connected_at),
            last_refresh: meta.last_refresh,
            scopes: Some(meta.scopes),
            user: view.user_info,
        },
        // Metadata cookie gone or corrupt: the token may still work but we
        // cannot judge expiry, so report expired and let the caller refresh.
        None => SessionStatus {
            connected: true,
            is_expired: Some(true),
            time_to_expiry: Some(0),
            connected_at: None,
            last_refresh: None,
            scopes: None,
            user: view.user_info,
        },
    };

    Json(status)
}

// ─── Refresh ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "expiresAt", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl RefreshResponse {
    fn reauth_required() -> Self {
        Self {
            success: false,
            error: Some("reauth_required".to_string()),
            expires_at: None,
        }
    }
}

/// Refresh the access token.
///
/// - No refresh-token cookie: `reauth_required` (a result, not a fault;
///   idempotent on an already-clean jar).
/// - Google 400: the refresh token is dead. Tear down all four cookies,
///   then `reauth_required`. A stale access-token cookie with no refresh
///   path is a latent bug, so partial cleanup is not acceptable.
/// - Other upstream errors: 502, cookies untouched, caller may retry.
async fn refresh_access_token(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar, Json<RefreshResponse>)> {
    let view = read_session(&jar);

    let Some(refresh_token) = view.refresh_token else {
        return Ok((
            StatusCode::UNAUTHORIZED,
            jar,
            Json(RefreshResponse::reauth_required()),
        ));
    };

    match state.google.refresh_token(&refresh_token).await {
        Ok(tokens) => {
            let now = now_ms();
            let meta = match view.meta {
                Some(prev) => SessionMeta {
                    expires_at: now + tokens.expires_in * 1000,
                    last_refresh: Some(now),
                    ..prev
                },
                None => SessionMeta {
                    connected_at: now,
                    expires_at: now + tokens.expires_in * 1000,
                    scopes: tokens.scopes(),
                    last_refresh: Some(now),
                },
            };

            let mut jar = jar;
            for cookie in refresh_cookies(&tokens, &meta, state.config.is_production()) {
                jar = jar.add(cookie);
            }

            tracing::info!(expires_at = meta.expires_at, "Access token refreshed");

            Ok((
                StatusCode::OK,
                jar,
                Json(RefreshResponse {
                    success: true,
                    error: None,
                    expires_at: Some(meta.expires_at),
                }),
            ))
        }
        Err(AppError::RefreshRejected(body)) => {
            tracing::warn!(body = %body, "Refresh token rejected, tearing down session");

            let mut jar = jar;
            for cookie in removal_cookies(state.config.is_production()) {
                jar = jar.add(cookie);
            }

            Ok((
                StatusCode::UNAUTHORIZED,
                jar,
                Json(RefreshResponse::reauth_required()),
            ))
        }
        // Transient upstream failure: report it, leave the session intact
        Err(e) => Err(e),
    }
}

// ─── Disconnect ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct DisconnectResponse {
    pub success: bool,
}

/// Explicit disconnect: remove all four session cookies.
async fn disconnect(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<DisconnectResponse>) {
    let mut jar = jar;
    for cookie in removal_cookies(state.config.is_production()) {
        jar = jar.add(cookie);
    }

    tracing::info!("Google account disconnected");
    (jar, Json(DisconnectResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"test_state_key_32_bytes_minimum!";

    fn signed_state(return_url: &str, ts: i64) -> String {
        encode_state(
            &OauthState {
                return_url: return_url.to_string(),
                ts,
            },
            KEY,
        )
        .unwrap()
    }

    #[test]
    fn test_state_roundtrip() {
        let now = 1_700_000_000_000;
        let encoded = signed_state("/admin/seo", now);

        let decoded = verify_and_decode_state(&encoded, KEY, now + 1_000).unwrap();
        assert_eq!(decoded.return_url, "/admin/seo");
        assert_eq!(decoded.ts, now);
    }

    #[test]
    fn test_state_rejects_tampered_signature() {
        let now = 1_700_000_000_000;
        let encoded = signed_state("/admin", now);
        let (payload, _) = encoded.split_once('.').unwrap();
        let tampered = format!("{}.{}", payload, "00".repeat(32));

        assert!(verify_and_decode_state(&tampered, KEY, now).is_none());
    }

    #[test]
    fn test_state_rejects_wrong_key() {
        let now = 1_700_000_000_000;
        let encoded = signed_state("/admin", now);

        assert!(verify_and_decode_state(&encoded, b"another_key", now).is_none());
    }

    #[test]
    fn test_state_rejects_when_older_than_ten_minutes() {
        let ts = 1_700_000_000_000;
        let encoded = signed_state("/admin", ts);

        // Just inside the window
        assert!(verify_and_decode_state(&encoded, KEY, ts + STATE_MAX_AGE_MS).is_some());
        // Just past it
        assert!(verify_and_decode_state(&encoded, KEY, ts + STATE_MAX_AGE_MS + 1).is_none());
    }

    #[test]
    fn test_state_rejects_malformed_input() {
        assert!(verify_and_decode_state("", KEY, 0).is_none());
        assert!(verify_and_decode_state("no-dot-here", KEY, 0).is_none());
        assert!(verify_and_decode_state("not_base64!!!.deadbeef", KEY, 0).is_none());
    }

    #[test]
    fn test_state_is_url_safe() {
        let encoded = signed_state("/admin?tab=seo&x=1", 1_700_000_000_000);
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('='));
    }
}
