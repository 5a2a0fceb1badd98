//! Service configuration loaded from the environment

use anyhow::Result;
use std::env;

use crate::youtube::DEFAULT_API_BASE;

/// Configuration for the API service
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Google OAuth2 client id
    pub google_client_id: String,
    /// Google OAuth2 client secret
    pub google_client_secret: String,
    /// Redirect URL registered with the provider for the OAuth callback
    pub oauth_redirect_url: String,
    /// Where the browser is sent after a successful login
    pub dashboard_url: String,
    /// Origins allowed by the CORS layer
    pub allowed_origins: Vec<String>,
    /// Whether the session cookie is marked Secure
    pub cookie_secure: bool,
    /// Session lifetime in seconds (default: 24 hours)
    pub session_ttl_seconds: u64,
    /// Base URL of the YouTube Data API; overridable for proxies and tests
    pub youtube_api_base: String,
    /// Listening port
    pub port: u16,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET`: required provider credentials
    /// - `OAUTH_REDIRECT_URL`: callback URL (default: "http://localhost:5000/auth/google/callback")
    /// - `DASHBOARD_URL`: post-login redirect target (default: "http://localhost:5173/")
    /// - `ALLOWED_ORIGINS`: comma-separated CORS origins (default: "http://localhost:5173")
    /// - `COOKIE_SECURE`: mark the session cookie Secure (default: false)
    /// - `SESSION_TTL_SECONDS`: session lifetime (default: 86400)
    /// - `YOUTUBE_API_BASE_URL`: YouTube Data API base (default: production endpoint)
    /// - `PORT`: listening port (default: 5000)
    pub fn from_env() -> Result<Self> {
        let google_client_id = env::var("GOOGLE_CLIENT_ID")
            .map_err(|_| anyhow::anyhow!("GOOGLE_CLIENT_ID environment variable not set"))?;
        let google_client_secret = env::var("GOOGLE_CLIENT_SECRET")
            .map_err(|_| anyhow::anyhow!("GOOGLE_CLIENT_SECRET environment variable not set"))?;

        let oauth_redirect_url = env::var("OAUTH_REDIRECT_URL")
            .unwrap_or_else(|_| "http://localhost:5000/auth/google/callback".to_string());
        let dashboard_url =
            env::var("DASHBOARD_URL").unwrap_or_else(|_| "http://localhost:5173/".to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let session_ttl_seconds = env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(86400);

        let youtube_api_base =
            env::var("YOUTUBE_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);

        Ok(Self {
            google_client_id,
            google_client_secret,
            oauth_redirect_url,
            dashboard_url,
            allowed_origins,
            cookie_secure,
            session_ttl_seconds,
            youtube_api_base,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_optional_vars() {
        unsafe {
            for var in [
                "OAUTH_REDIRECT_URL",
                "DASHBOARD_URL",
                "ALLOWED_ORIGINS",
                "COOKIE_SECURE",
                "SESSION_TTL_SECONDS",
                "YOUTUBE_API_BASE_URL",
                "PORT",
            ] {
                env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_config_requires_client_credentials() {
        clear_optional_vars();
        unsafe {
            env::remove_var("GOOGLE_CLIENT_ID");
            env::remove_var("GOOGLE_CLIENT_SECRET");
        }

        assert!(AppConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        clear_optional_vars();
        unsafe {
            env::set_var("GOOGLE_CLIENT_ID", "client-id");
            env::set_var("GOOGLE_CLIENT_SECRET", "client-secret");
        }

        let config = AppConfig::from_env().expect("Failed to create config");
        assert_eq!(
            config.oauth_redirect_url,
            "http://localhost:5000/auth/google/callback"
        );
        assert_eq!(config.dashboard_url, "http://localhost:5173/");
        assert_eq!(config.allowed_origins, vec!["http://localhost:5173"]);
        assert!(!config.cookie_secure);
        assert_eq!(config.session_ttl_seconds, 86400);
        assert_eq!(config.youtube_api_base, DEFAULT_API_BASE);
        assert_eq!(config.port, 5000);
    }

    #[test]
    #[serial]
    fn test_config_parses_origin_list() {
        clear_optional_vars();
        unsafe {
            env::set_var("GOOGLE_CLIENT_ID", "client-id");
            env::set_var("GOOGLE_CLIENT_SECRET", "client-secret");
            env::set_var(
                "ALLOWED_ORIGINS",
                "http://localhost:5173, https://dashboard.example.com,",
            );
            env::set_var("COOKIE_SECURE", "true");
            env::set_var("SESSION_TTL_SECONDS", "3600");
        }

        let config = AppConfig::from_env().expect("Failed to create config");
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:5173", "https://dashboard.example.com"]
        );
        assert!(config.cookie_secure);
        assert_eq!(config.session_ttl_seconds, 3600);

        clear_optional_vars();
    }
}
