//! Scheduling orchestration service - core business logic

use std::sync::Arc;

use chrono::Duration;
use slotbroker_domain::constants::{
    AVAILABILITY_WINDOW_DAYS, BOOKING_LINK_TTL_MINUTES, DEFAULT_TIME_EXPRESSION,
    WAITLIST_RECHECK_HOURS, WEBHOOK_EVENT_INVITEE_CREATED,
};
use slotbroker_domain::{
    BookingOutcome, BookingRequest, ConfirmationOutcome, MatchResult, ResolvedInstant, Result,
    WebhookEvent,
};
use tracing::{debug, info, warn};

use super::ports::{Clock, SchedulingProvider};
use crate::matching::SlotMatcher;
use crate::render;
use crate::resolve::{DateExpression, TimeExpressionResolver};
use crate::webhook::{self, WebhookVerifier};

/// Externally supplied context for the orchestrator.
///
/// Replaces the process-global token/registration store of a naive
/// design: everything the service needs is passed in explicitly, which
/// keeps it testable with injected fakes.
#[derive(Debug, Clone)]
pub struct SchedulingConfig {
    /// Callback URL this system exposes for confirmation webhooks
    pub callback_url: String,
    /// Scope under which webhook subscriptions are listed and created
    pub webhook_scope: String,
    /// Shared key for signing and verifying webhook payloads
    pub signing_key: String,
}

/// Scheduling orchestration service
pub struct SchedulingService {
    provider: Arc<dyn SchedulingProvider>,
    clock: Arc<dyn Clock>,
    resolver: TimeExpressionResolver,
    verifier: WebhookVerifier,
    config: SchedulingConfig,
}

impl SchedulingService {
    /// Create a new scheduling service
    pub fn new(
        provider: Arc<dyn SchedulingProvider>,
        clock: Arc<dyn Clock>,
        config: SchedulingConfig,
    ) -> Self {
        let resolver = TimeExpressionResolver::new(clock.clone());
        let verifier = WebhookVerifier::new(config.signing_key.clone());
        Self { provider, clock, resolver, verifier, config }
    }

    /// Run the end-to-end "request a booking" flow.
    ///
    /// Resolution errors surface to the caller as client errors; provider
    /// failures propagate immediately without retry. No partial side
    /// effect is ever reported as success.
    pub async fn request_booking(&self, request: &BookingRequest) -> Result<BookingOutcome> {
        match request.preferred_time.as_deref() {
            Some(preferred) => self.book_preferred(request, preferred).await,
            None => self.book_default(request).await,
        }
    }

    /// Preferred-time flow: resolve, match under tolerance, then book.
    async fn book_preferred(
        &self,
        request: &BookingRequest,
        preferred: &str,
    ) -> Result<BookingOutcome> {
        let expression = DateExpression::from_raw(preferred);
        let resolved = self.resolver.resolve(&expression, &request.timezone)?;
        debug!(
            event_type = %request.event_type,
            resolved = %resolved.local,
            timezone = %resolved.timezone,
            "resolved preferred time"
        );

        let slots = self.fetch_availability(request, &resolved).await?;

        match SlotMatcher::find_match(&resolved, &slots) {
            MatchResult::NoMatch => {
                info!(
                    event_type = %request.event_type,
                    requested = %resolved.local,
                    alternatives = slots.len(),
                    "preferred time unavailable"
                );
                Ok(BookingOutcome::TimeUnavailable {
                    message: "Your preferred time is not available".to_owned(),
                    requested_time: render::format_full(resolved.utc, resolved.timezone),
                    available_slots: render::slot_views(&slots, resolved.timezone),
                })
            }
            MatchResult::Matched(slot) => {
                debug!(slot = %slot.start_time, "matched provider slot");
                let booking_url = self.create_booking(request).await?;
                Ok(BookingOutcome::ConfirmationRequired {
                    booking_url,
                    confirmed_time: Some(render::formatted_time(resolved.utc, resolved.timezone)),
                    available_slots: None,
                    expires_at: self.clock.now_utc()
                        + Duration::minutes(BOOKING_LINK_TTL_MINUTES),
                })
            }
        }
    }

    /// Default flow: "tomorrow 9am" window, with waitlist fallback when
    /// the provider has zero openings.
    async fn book_default(&self, request: &BookingRequest) -> Result<BookingOutcome> {
        let expression = DateExpression::NaturalLanguage(DEFAULT_TIME_EXPRESSION.to_owned());
        let resolved = self.resolver.resolve(&expression, &request.timezone)?;

        let slots = self.fetch_availability(request, &resolved).await?;

        if slots.is_empty() {
            let entry = self.provider.add_to_waitlist(&request.event_type, &request.requester).await?;
            info!(
                event_type = %request.event_type,
                waitlist_id = %entry.id,
                "no openings; requester waitlisted"
            );
            return Ok(BookingOutcome::Waitlisted {
                message: "No available slots. You've been added to our waitlist.".to_owned(),
                waitlist_id: entry.id,
                next_check_date: self.clock.now_utc() + Duration::hours(WAITLIST_RECHECK_HOURS),
            });
        }

        // No preference was given, so no single-slot matching is attempted;
        // the requester picks from the full list
        let booking_url = self.create_booking(request).await?;
        Ok(BookingOutcome::ConfirmationRequired {
            booking_url,
            confirmed_time: None,
            available_slots: Some(render::slot_views(&slots, resolved.timezone)),
            expires_at: self.clock.now_utc() + Duration::minutes(BOOKING_LINK_TTL_MINUTES),
        })
    }

    async fn fetch_availability(
        &self,
        request: &BookingRequest,
        resolved: &ResolvedInstant,
    ) -> Result<Vec<slotbroker_domain::Slot>> {
        let window_end = resolved.utc + Duration::days(AVAILABILITY_WINDOW_DAYS);
        self.provider
            .list_availability(&request.event_type, resolved.utc, window_end, &request.timezone)
            .await
    }

    /// Create the scheduling link and register the confirmation webhook.
    ///
    /// Registration happens after link creation, mirroring the provider
    /// flow; a registration failure therefore fails the whole request
    /// rather than silently reporting success.
    async fn create_booking(&self, request: &BookingRequest) -> Result<String> {
        let link = self.provider.create_booking_link(&request.event_type, 1).await?;
        self.ensure_webhook_registration().await?;
        Ok(link.booking_url)
    }

    /// Register the confirmation callback, skipping when already
    /// registered so subscriptions never accumulate per booking attempt.
    async fn ensure_webhook_registration(&self) -> Result<()> {
        let existing =
            self.provider.list_webhook_registrations(&self.config.webhook_scope).await?;

        if webhook::is_registered(&existing, &self.config.callback_url) {
            debug!(callback_url = %self.config.callback_url, "webhook already registered; skipping");
            return Ok(());
        }

        self.provider
            .create_webhook_registration(
                &self.config.callback_url,
                &[WEBHOOK_EVENT_INVITEE_CREATED.to_owned()],
                &self.config.webhook_scope,
                &self.config.signing_key,
            )
            .await
    }

    /// Replace the confirmation email template on an event type.
    pub async fn update_email_template(
        &self,
        event_type: &str,
        subject: &str,
        body: &str,
    ) -> Result<()> {
        self.provider.patch_event_type_template(event_type, subject, body).await
    }

    /// Handle an inbound confirmation callback.
    ///
    /// An unverified payload is rejected outright and triggers no side
    /// effect. Of the verified payloads, only `invitee.created` is
    /// processed; other event kinds are accepted and ignored.
    pub fn handle_confirmation(
        &self,
        raw_body: &[u8],
        claimed_signature: &str,
    ) -> ConfirmationOutcome {
        if !self.verifier.verify(raw_body, claimed_signature) {
            warn!("rejected confirmation webhook: signature verification failed");
            return ConfirmationOutcome::Rejected;
        }

        match serde_json::from_slice::<WebhookEvent>(raw_body) {
            Ok(event) if event.event == WEBHOOK_EVENT_INVITEE_CREATED => {
                info!(event = %event.event, "booking confirmed");
                ConfirmationOutcome::Accepted { processed: true }
            }
            Ok(event) => {
                debug!(event = %event.event, "ignoring webhook event kind");
                ConfirmationOutcome::Accepted { processed: false }
            }
            Err(err) => {
                warn!(error = %err, "verified webhook body was not valid JSON");
                ConfirmationOutcome::Accepted { processed: false }
            }
        }
    }
}
