//! Application configuration loaded from environment variables.
//!
//! All secrets (Google client secret, SMTP password, state-signing key)
//! come from the environment; nothing sensitive lives in source.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Google OAuth client ID (public)
    pub google_client_id: String,
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// Redirect URI registered with the Google OAuth client
    pub google_redirect_uri: String,
    /// Frontend URL for post-OAuth redirects and CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// HMAC key for signing the OAuth state parameter
    pub oauth_state_key: Vec<u8>,
    /// `production` turns on the Secure cookie attribute
    pub app_env: String,

    /// Google endpoint URLs (overridable so tests can point at a mock)
    pub google_auth_url: String,
    pub google_token_url: String,
    pub google_userinfo_url: String,

    /// SMTP relay for the contact form; None disables outbound mail
    pub smtp: Option<SmtpConfig>,
}

/// SMTP relay settings for contact-form mail.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    /// Recipient for contact-form leads
    pub contact_email: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            google_client_id: "test_client_id".to_string(),
            google_client_secret: "test_secret".to_string(),
            google_redirect_uri: "http://localhost:8080/api/auth/google/callback".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            oauth_state_key: b"test_state_key_32_bytes_minimum!".to_vec(),
            app_env: "development".to_string(),
            google_auth_url: DEFAULT_AUTH_URL.to_string(),
            google_token_url: DEFAULT_TOKEN_URL.to_string(),
            google_userinfo_url: DEFAULT_USERINFO_URL.to_string(),
            smtp: None,
        }
    }
}

const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_ID"))?,
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_SECRET"))?,
            google_redirect_uri: env::var("GOOGLE_REDIRECT_URI")
                .map_err(|_| ConfigError::Missing("GOOGLE_REDIRECT_URI"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            oauth_state_key: env::var("OAUTH_STATE_KEY")
                .map_err(|_| ConfigError::Missing("OAUTH_STATE_KEY"))?
                .into_bytes(),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            google_auth_url: env::var("GOOGLE_AUTH_URL")
                .unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string()),
            google_token_url: env::var("GOOGLE_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
            google_userinfo_url: env::var("GOOGLE_USERINFO_URL")
                .unwrap_or_else(|_| DEFAULT_USERINFO_URL.to_string()),
            smtp: SmtpConfig::from_env()?,
        })
    }

    /// Whether we are running in production (controls the Secure cookie flag).
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}

impl SmtpConfig {
    /// Load the SMTP block; absent SMTP_HOST disables mail entirely.
    /// A partially-set block is a configuration error, not a silent no-op.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let host = match env::var("SMTP_HOST") {
            Ok(h) => h,
            Err(_) => return Ok(None),
        };

        Ok(Some(Self {
            host,
            port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .unwrap_or(587),
            username: env::var("SMTP_USERNAME").map_err(|_| ConfigError::Missing("SMTP_USERNAME"))?,
            password: env::var("SMTP_PASSWORD").map_err(|_| ConfigError::Missing("SMTP_PASSWORD"))?,
            from: env::var("SMTP_FROM").map_err(|_| ConfigError::Missing("SMTP_FROM"))?,
            contact_email: env::var("CONTACT_EMAIL")
                .map_err(|_| ConfigError::Missing("CONTACT_EMAIL"))?,
        }))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test because env vars are process-global and tests run in
    // parallel threads.
    #[test]
    fn test_config_from_env() {
        env::set_var("GOOGLE_CLIENT_ID", "test_id");
        env::set_var("GOOGLE_CLIENT_SECRET", "test_secret");
        env::set_var(
            "GOOGLE_REDIRECT_URI",
            "http://localhost:8080/api/auth/google/callback",
        );
        env::set_var("OAUTH_STATE_KEY", "test_state_key_32_bytes_minimum!");
        env::remove_var("SMTP_HOST");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.google_client_id, "test_id");
        assert_eq!(config.google_client_secret, "test_secret");
        assert_eq!(config.port, 8080);
        assert!(config.smtp.is_none());
        assert!(!config.is_production());

        // A partially-set SMTP block must fail loudly
        env::set_var("SMTP_HOST", "smtp.example.com");
        env::remove_var("SMTP_USERNAME");
        assert!(Config::from_env().is_err());
        env::remove_var("SMTP_HOST");
    }
}
