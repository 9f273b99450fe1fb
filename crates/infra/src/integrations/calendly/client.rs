//! Calendly API client implementing the scheduling provider port

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use slotbroker_core::scheduling::ports::SchedulingProvider;
use slotbroker_domain::{
    BookingLink, Requester, Result, SchedulerError, Slot, WaitlistEntry, WebhookRegistration,
};
use tracing::debug;

use crate::errors::InfraError;
use crate::token_store::AccessTokenStore;

const CALENDLY_API_BASE: &str = "https://api.calendly.com";

/// HTTP client for the Calendly REST API.
///
/// Authorizes every call with the access token held in the shared store.
/// The base URL is configurable so tests can point the client at a mock
/// server.
pub struct CalendlyClient {
    http: Client,
    base_url: String,
    organization: String,
    tokens: Arc<AccessTokenStore>,
}

impl CalendlyClient {
    /// Client against the production API.
    pub fn new(organization: impl Into<String>, tokens: Arc<AccessTokenStore>) -> Self {
        Self::with_base_url(CALENDLY_API_BASE, organization, tokens)
    }

    /// Client against an explicit API base (tests, staging).
    pub fn with_base_url(
        base_url: impl Into<String>,
        organization: impl Into<String>,
        tokens: Arc<AccessTokenStore>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            organization: organization.into(),
            tokens,
        }
    }

    /// Reject non-2xx responses, carrying the provider's error detail.
    async fn check(response: Response, context: &str) -> Result<Response> {
        let status = response.status();
        if !status.is_success() {
            let detail =
                response.text().await.unwrap_or_else(|_| "unknown error".to_owned());
            return Err(SchedulerError::Provider(format!(
                "{context} failed ({status}): {detail}"
            )));
        }
        Ok(response)
    }
}

/// Event type references are URIs; the API addresses some resources by
/// the trailing UUID segment.
fn event_type_uuid(event_type: &str) -> &str {
    event_type.rsplit('/').next().unwrap_or(event_type)
}

#[derive(Debug, Deserialize)]
struct CollectionResponse<T> {
    collection: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct AvailableTime {
    start_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct SchedulingLinkResponse {
    resource: SchedulingLinkResource,
}

#[derive(Debug, Deserialize)]
struct SchedulingLinkResource {
    booking_url: String,
}

#[derive(Debug, Deserialize)]
struct WaitlistResponse {
    id: String,
}

#[async_trait]
impl SchedulingProvider for CalendlyClient {
    async fn list_availability(
        &self,
        event_type: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        timezone: &str,
    ) -> Result<Vec<Slot>> {
        let token = self.tokens.require()?;
        let url = format!("{}/event_type_available_times", self.base_url);
        debug!(%url, event_type, "listing availability");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .query(&[
                ("event_type", event_type),
                ("start_time", &start.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("end_time", &end.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("timezone", timezone),
            ])
            .send()
            .await
            .map_err(InfraError::from)?;
        let response = Self::check(response, "availability lookup").await?;

        let body: CollectionResponse<AvailableTime> =
            response.json().await.map_err(InfraError::from)?;
        Ok(body.collection.into_iter().map(|t| Slot { start_time: t.start_time }).collect())
    }

    async fn create_booking_link(
        &self,
        event_type: &str,
        max_event_count: u32,
    ) -> Result<BookingLink> {
        let token = self.tokens.require()?;
        let url = format!("{}/scheduling_links", self.base_url);
        debug!(%url, event_type, "creating scheduling link");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&json!({
                "max_event_count": max_event_count,
                "owner": event_type,
                "owner_type": "EventType",
            }))
            .send()
            .await
            .map_err(InfraError::from)?;
        let response = Self::check(response, "scheduling link creation").await?;

        let body: SchedulingLinkResponse = response.json().await.map_err(InfraError::from)?;
        Ok(BookingLink { booking_url: body.resource.booking_url })
    }

    async fn list_webhook_registrations(&self, scope: &str) -> Result<Vec<WebhookRegistration>> {
        let token = self.tokens.require()?;
        let url = format!("{}/webhook_subscriptions", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .query(&[("organization", self.organization.as_str()), ("scope", scope)])
            .send()
            .await
            .map_err(InfraError::from)?;
        let response = Self::check(response, "webhook subscription listing").await?;

        let body: CollectionResponse<WebhookRegistration> =
            response.json().await.map_err(InfraError::from)?;
        Ok(body.collection)
    }

    async fn create_webhook_registration(
        &self,
        callback_url: &str,
        events: &[String],
        scope: &str,
        signing_key: &str,
    ) -> Result<()> {
        let token = self.tokens.require()?;
        let url = format!("{}/webhook_subscriptions", self.base_url);
        debug!(%url, callback_url, "creating webhook subscription");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&json!({
                "url": callback_url,
                "events": events,
                "organization": self.organization,
                "scope": scope,
                "signing_key": signing_key,
            }))
            .send()
            .await
            .map_err(InfraError::from)?;
        Self::check(response, "webhook subscription creation").await?;
        Ok(())
    }

    async fn patch_event_type_template(
        &self,
        event_type: &str,
        subject: &str,
        body: &str,
    ) -> Result<()> {
        let token = self.tokens.require()?;
        let url = format!("{}/event_types/{}", self.base_url, event_type_uuid(event_type));

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&token)
            .json(&json!({
                "email_template": {
                    "subject": subject,
                    "body": body,
                }
            }))
            .send()
            .await
            .map_err(InfraError::from)?;
        Self::check(response, "event type template update").await?;
        Ok(())
    }

    async fn add_to_waitlist(
        &self,
        event_type: &str,
        requester: &Requester,
    ) -> Result<WaitlistEntry> {
        let token = self.tokens.require()?;
        let url =
            format!("{}/event_types/{}/waitlist", self.base_url, event_type_uuid(event_type));
        debug!(%url, "adding requester to waitlist");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(requester)
            .send()
            .await
            .map_err(InfraError::from)?;
        let response = Self::check(response, "waitlist enrollment").await?;

        let body: WaitlistResponse = response.json().await.map_err(InfraError::from)?;
        Ok(WaitlistEntry { id: body.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_uuid_takes_last_path_segment() {
        assert_eq!(
            event_type_uuid("https://api.calendly.com/event_types/ABCDEF"),
            "ABCDEF"
        );
        assert_eq!(event_type_uuid("ABCDEF"), "ABCDEF");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = CalendlyClient::with_base_url(
            "https://api.calendly.com/",
            "org-1",
            Arc::new(AccessTokenStore::new()),
        );
        assert_eq!(client.base_url, "https://api.calendly.com");
    }
}
