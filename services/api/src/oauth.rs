//! OAuth2 integration with Google
//!
//! The repo standardizes on the `oauth2` crate with authorization-code +
//! PKCE and a CSRF state token, rather than a manual token exchange. The
//! handshake record (state + verifier) lives in the session store between
//! the redirect to Google and the callback.

use anyhow::Result;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, PkceCodeChallenge,
    PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl, basic::BasicClient,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AppConfig;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Scopes requested on every login: profile, email, and video management
pub const LOGIN_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/userinfo.profile",
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/youtube.force-ssl",
];

/// OAuth2 client wrapper for the Google identity provider
#[derive(Clone)]
pub struct OAuthClient {
    client: BasicClient,
    http: reqwest::Client,
}

impl OAuthClient {
    /// Create a new OAuth2 client for Google
    pub fn new_google(config: &AppConfig, http: reqwest::Client) -> Result<Self> {
        let client = BasicClient::new(
            ClientId::new(config.google_client_id.clone()),
            Some(ClientSecret::new(config.google_client_secret.clone())),
            AuthUrl::new(GOOGLE_AUTH_URL.to_string())?,
            Some(TokenUrl::new(GOOGLE_TOKEN_URL.to_string())?),
        )
        .set_redirect_uri(RedirectUrl::new(config.oauth_redirect_url.clone())?);

        Ok(Self { client, http })
    }

    /// Generate the consent URL with PKCE and a CSRF state token
    pub fn authorize_url(&self, scopes: &[&str]) -> (String, CsrfToken, PkceCodeVerifier) {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let mut request = self
            .client
            .authorize_url(CsrfToken::new_random)
            .set_pkce_challenge(pkce_challenge)
            // Without offline access Google never issues a refresh token
            .add_extra_param("access_type", "offline")
            .add_extra_param("prompt", "consent");

        for scope in scopes {
            request = request.add_scope(Scope::new(scope.to_string()));
        }

        let (auth_url, csrf_token) = request.url();

        (auth_url.to_string(), csrf_token, pkce_verifier)
    }

    /// Exchange an authorization code for access/refresh tokens
    pub async fn exchange_code(
        &self,
        code: String,
        pkce_verifier: PkceCodeVerifier,
    ) -> Result<ProviderTokens> {
        info!("Exchanging authorization code for access token");

        let token_response = self
            .client
            .exchange_code(AuthorizationCode::new(code))
            .set_pkce_verifier(pkce_verifier)
            .request_async(oauth2::reqwest::async_http_client)
            .await?;

        Ok(ProviderTokens {
            access_token: token_response.access_token().secret().clone(),
            refresh_token: token_response
                .refresh_token()
                .map(|token| token.secret().clone()),
        })
    }

    /// Resolve the provider profile for an access token
    pub async fn fetch_profile(&self, access_token: &str) -> Result<GoogleProfile> {
        let response = self
            .http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await?;

        if response.status().is_success() {
            let profile: GoogleProfile = response.json().await?;
            Ok(profile)
        } else {
            Err(anyhow::anyhow!(
                "Failed to get Google user profile: {}",
                response.status()
            ))
        }
    }
}

/// Tokens issued by the provider on a successful exchange
#[derive(Debug)]
pub struct ProviderTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Google userinfo response
#[derive(Debug, Deserialize)]
pub struct GoogleProfile {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl GoogleProfile {
    /// Display name, falling back to the email address
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.email.clone())
    }
}

/// In-flight OAuth handshake, stored between redirect and callback
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginHandshake {
    pub csrf_token: String,
    pub pkce_verifier: String,
    pub created_at: u64,
}

impl LoginHandshake {
    /// Create a new handshake record
    pub fn new(csrf_token: String, pkce_verifier: String, created_at: u64) -> Self {
        Self {
            csrf_token,
            pkce_verifier,
            created_at,
        }
    }
}
