// SPDX-License-Identifier: MIT

use betonpump_api::config::Config;
use betonpump_api::routes::create_router;
use betonpump_api::services::{GoogleClient, Mailer};
use betonpump_api::store::Stores;
use betonpump_api::AppState;
use std::sync::Arc;

/// Create a test app with empty stores and a mock mailer.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::default())
}

/// Create a test app with a custom config (mock Google endpoints,
/// production cookie attributes, ...).
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        stores: Stores::new(),
        google: GoogleClient::new(&config),
        mailer: Mailer::new_mock(),
        config,
    });

    (create_router(state.clone()), state)
}

/// Test config pointed at a wiremock server for Google's endpoints.
#[allow(dead_code)]
pub fn config_with_google_mock(mock_uri: &str) -> Config {
    Config {
        google_token_url: format!("{}/token", mock_uri),
        google_userinfo_url: format!("{}/userinfo", mock_uri),
        ..Config::default()
    }
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body is not valid JSON")
}

/// All Set-Cookie header values of a response.
#[allow(dead_code)]
pub fn set_cookie_headers(response: &axum::response::Response) -> Vec<String> {
    response
        .headers()
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// Find the Set-Cookie header for a given cookie name.
#[allow(dead_code)]
pub fn find_cookie(headers: &[String], name: &str) -> String {
    headers
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
        .unwrap_or_else(|| panic!("missing Set-Cookie header for {name}: {headers:?}"))
}
