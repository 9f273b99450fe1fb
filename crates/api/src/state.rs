//! Shared application state

use std::sync::Arc;

use slotbroker_core::{SchedulingConfig, SchedulingProvider, SchedulingService, SystemClock};
use slotbroker_domain::constants::WEBHOOK_SCOPE_ORGANIZATION;
use slotbroker_infra::{AccessTokenStore, CalendlyClient, CalendlyOAuth, OAuthSettings};

use crate::config::Settings;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub scheduler: Arc<SchedulingService>,
    pub tokens: Arc<AccessTokenStore>,
    pub oauth: Arc<CalendlyOAuth>,
}

impl AppState {
    pub fn new(
        scheduler: Arc<SchedulingService>,
        tokens: Arc<AccessTokenStore>,
        oauth: Arc<CalendlyOAuth>,
    ) -> Self {
        Self { scheduler, tokens, oauth }
    }

    /// Wire the production dependency graph from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let tokens = Arc::new(AccessTokenStore::new());
        let provider: Arc<dyn SchedulingProvider> = match &settings.api_base_url {
            Some(base) => Arc::new(CalendlyClient::with_base_url(
                base,
                &settings.organization,
                tokens.clone(),
            )),
            None => Arc::new(CalendlyClient::new(&settings.organization, tokens.clone())),
        };
        let oauth = Arc::new(CalendlyOAuth::new(OAuthSettings::new(
            &settings.client_id,
            &settings.client_secret,
            settings.redirect_uri(),
        )));
        let scheduler = Arc::new(SchedulingService::new(
            provider,
            Arc::new(SystemClock),
            SchedulingConfig {
                callback_url: settings.callback_url(),
                webhook_scope: WEBHOOK_SCOPE_ORGANIZATION.to_owned(),
                signing_key: settings.signing_key.clone(),
            },
        ));

        Self::new(scheduler, tokens, oauth)
    }
}
