// SPDX-License-Identifier: MIT

//! Google OAuth2 client.
//!
//! Handles:
//! - Authorization-code exchange
//! - Access-token refresh (400 signals a revoked refresh token)
//! - Best-effort userinfo fetch

use crate::error::AppError;
use crate::models::GoogleUserInfo;
use serde::Deserialize;

/// Google OAuth HTTP client.
///
/// Endpoint URLs are injected from config so tests can point them at a
/// local mock server.
#[derive(Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    token_url: String,
    userinfo_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl GoogleClient {
    pub fn new(config: &crate::config::Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_url: config.google_token_url.clone(),
            userinfo_url: config.google_userinfo_url.clone(),
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.google_redirect_uri.clone(),
        }
    }

    /// Exchange an authorization code for tokens.
    ///
    /// Any non-2xx response is terminal for the callback; the raw body is
    /// carried in the error for diagnostics.
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleTokenResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::GoogleApi(format!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Google token exchange failed");
            return Err(AppError::GoogleApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::GoogleApi(format!("Failed to parse token response: {}", e)))
    }

    /// Refresh an access token.
    ///
    /// HTTP 400 means Google rejected the refresh token (revoked or
    /// invalid grant) and maps to [`AppError::RefreshRejected`]; other
    /// failures are transient and the caller may retry.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<GoogleTokenResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AppError::GoogleApi(format!("Token refresh request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 400 {
                tracing::warn!(body = %body, "Google rejected refresh token");
                return Err(AppError::RefreshRejected(body));
            }

            return Err(AppError::GoogleApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::GoogleApi(format!("Failed to parse refresh response: {}", e)))
    }

    /// Fetch the account profile for a freshly issued access token.
    pub async fn get_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, AppError> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::GoogleApi(format!("Userinfo request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::GoogleApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::GoogleApi(format!("Failed to parse userinfo: {}", e)))
    }
}

/// Token response from Google's token endpoint.
///
/// `refresh_token` is only present on the initial exchange (and only when
/// the consent screen ran with `access_type=offline`); refresh responses
/// omit it.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds
    pub expires_in: i64,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl GoogleTokenResponse {
    /// Granted scopes as a list (Google returns them space-separated).
    pub fn scopes(&self) -> Vec<String> {
        self.scope
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_split() {
        let resp = GoogleTokenResponse {
            access_token: "at".to_string(),
            refresh_token: None,
            expires_in: 3599,
            scope: Some("openid email https://www.googleapis.com/auth/webmasters.readonly".to_string()),
            token_type: Some("Bearer".to_string()),
        };
        assert_eq!(
            resp.scopes(),
            vec![
                "openid",
                "email",
                "https://www.googleapis.com/auth/webmasters.readonly"
            ]
        );
    }

    #[test]
    fn test_scopes_empty_when_absent() {
        let resp = GoogleTokenResponse {
            access_token: "at".to_string(),
            refresh_token: None,
            expires_in: 3599,
            scope: None,
            token_type: None,
        };
        assert!(resp.scopes().is_empty());
    }

    #[test]
    fn test_token_response_parses_without_refresh_token() {
        let json = r#"{"access_token":"ya29.x","expires_in":3599,"token_type":"Bearer"}"#;
        let resp: GoogleTokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access_token, "ya29.x");
        assert!(resp.refresh_token.is_none());
    }
}
