//! Port interfaces for the scheduling engine
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotbroker_domain::{BookingLink, Requester, Result, Slot, WaitlistEntry, WebhookRegistration};

/// Trait for the external calendar provider collaborator.
///
/// Production implements this over the provider's REST API; tests supply
/// in-memory fakes returning canned slot lists or fixed failures.
#[async_trait]
pub trait SchedulingProvider: Send + Sync {
    /// Fetch provider-offered slots within a UTC window
    async fn list_availability(
        &self,
        event_type: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        timezone: &str,
    ) -> Result<Vec<Slot>>;

    /// Create a single-use scheduling link for an event type
    async fn create_booking_link(&self, event_type: &str, max_event_count: u32)
        -> Result<BookingLink>;

    /// List current webhook subscriptions for a scope
    async fn list_webhook_registrations(&self, scope: &str) -> Result<Vec<WebhookRegistration>>;

    /// Subscribe a callback URL to the given event kinds
    async fn create_webhook_registration(
        &self,
        callback_url: &str,
        events: &[String],
        scope: &str,
        signing_key: &str,
    ) -> Result<()>;

    /// Patch the notification template of an event type
    async fn patch_event_type_template(
        &self,
        event_type: &str,
        subject: &str,
        body: &str,
    ) -> Result<()>;

    /// Record a requester on the event type's waitlist
    async fn add_to_waitlist(&self, event_type: &str, requester: &Requester)
        -> Result<WaitlistEntry>;
}

/// Trait for wall-clock access to enable deterministic testing.
///
/// Resolution and expiry calculations depend on "now"; tests inject a
/// fixed reference instant instead of the system clock.
pub trait Clock: Send + Sync {
    /// Current wall-clock time in UTC
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Real system clock implementation. Use this in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
