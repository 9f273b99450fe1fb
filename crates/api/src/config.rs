//! Server configuration from environment variables
//!
//! ## Environment Variables
//! - `SLOTBROKER_BASE_URL`: Public base URL of this server (used for the
//!   OAuth redirect and the webhook callback)
//! - `SLOTBROKER_PORT`: Listen port (default 3000)
//! - `CALENDLY_API_BASE_URL`: Provider API base override (optional)
//! - `CALENDLY_CLIENT_ID`: OAuth client id
//! - `CALENDLY_CLIENT_SECRET`: OAuth client secret
//! - `CALENDLY_ORGANIZATION`: Organization URI webhook subscriptions are
//!   scoped to
//! - `CALENDLY_WEBHOOK_SIGNING_KEY`: Shared key for webhook signatures

use slotbroker_domain::{Result, SchedulerError};

const DEFAULT_PORT: u16 = 3000;

/// Everything the server needs from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub port: u16,
    /// Provider API base override; `None` means the hosted endpoint
    pub api_base_url: Option<String>,
    pub client_id: String,
    pub client_secret: String,
    pub organization: String,
    pub signing_key: String,
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// # Errors
    /// Returns `SchedulerError::Config` when a required variable is
    /// missing or the port is not a valid number.
    pub fn from_env() -> Result<Self> {
        let base_url =
            env_var("SLOTBROKER_BASE_URL").map(|s| s.trim_end_matches('/').to_owned())?;
        let port = match std::env::var("SLOTBROKER_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| SchedulerError::Config(format!("Invalid port: {e}")))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            base_url,
            port,
            api_base_url: std::env::var("CALENDLY_API_BASE_URL").ok(),
            client_id: env_var("CALENDLY_CLIENT_ID")?,
            client_secret: env_var("CALENDLY_CLIENT_SECRET")?,
            organization: env_var("CALENDLY_ORGANIZATION")?,
            signing_key: env_var("CALENDLY_WEBHOOK_SIGNING_KEY")?,
        })
    }

    /// URL the provider redirects back to after authorization.
    pub fn redirect_uri(&self) -> String {
        format!("{}/auth/callback", self.base_url)
    }

    /// URL the provider delivers confirmation webhooks to.
    pub fn callback_url(&self) -> String {
        format!("{}/webhooks/confirmations", self.base_url)
    }
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        SchedulerError::Config(format!("Missing required environment variable: {key}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_urls_append_route_paths() {
        let settings = Settings {
            base_url: "https://broker.example.com".to_owned(),
            port: 3000,
            api_base_url: None,
            client_id: "id".to_owned(),
            client_secret: "secret".to_owned(),
            organization: "org".to_owned(),
            signing_key: "key".to_owned(),
        };

        assert_eq!(settings.redirect_uri(), "https://broker.example.com/auth/callback");
        assert_eq!(
            settings.callback_url(),
            "https://broker.example.com/webhooks/confirmations"
        );
    }
}
