//! OAuth authorization-code exchange for the Calendly API
//!
//! Only the pieces this engine needs: building the authorization URL
//! and trading a callback code for an access token. Token refresh is
//! the caller's concern.

use reqwest::Client;
use serde::Deserialize;
use slotbroker_domain::{Result, SchedulerError};
use tracing::debug;
use url::Url;

const CALENDLY_AUTH_BASE: &str = "https://auth.calendly.com";

/// Configuration for the OAuth flow.
#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Override for tests; production uses the hosted endpoint
    pub auth_base_url: String,
}

impl OAuthSettings {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            auth_base_url: CALENDLY_AUTH_BASE.to_owned(),
        }
    }

    pub fn with_auth_base_url(mut self, auth_base_url: impl Into<String>) -> Self {
        self.auth_base_url = auth_base_url.into().trim_end_matches('/').to_owned();
        self
    }
}

/// Access token material returned by the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

/// Minimal OAuth client for the provider's authorization server.
pub struct CalendlyOAuth {
    http: Client,
    settings: OAuthSettings,
}

impl CalendlyOAuth {
    pub fn new(settings: OAuthSettings) -> Self {
        Self { http: Client::new(), settings }
    }

    /// Authorization URL the user agent is redirected to.
    pub fn authorization_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/oauth/authorize", self.settings.auth_base_url))
            .map_err(|err| SchedulerError::Config(format!("invalid auth base URL: {err}")))?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.settings.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.settings.redirect_uri);
        Ok(url)
    }

    /// Trade an authorization code for an access token.
    pub async fn exchange_authorization_code(&self, code: &str) -> Result<TokenResponse> {
        let url = format!("{}/oauth/token", self.settings.auth_base_url);
        debug!(%url, "exchanging authorization code");

        let response = self
            .http
            .post(&url)
            .form(&[
                ("client_id", self.settings.client_id.as_str()),
                ("client_secret", self.settings.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|err| SchedulerError::Auth(format!("token exchange request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail =
                response.text().await.unwrap_or_else(|_| "unknown error".to_owned());
            return Err(SchedulerError::Auth(format!(
                "token exchange failed ({status}): {detail}"
            )));
        }

        response
            .json()
            .await
            .map_err(|err| SchedulerError::Auth(format!("invalid token response: {err}")))
    }
}
