use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotbroker_core::scheduling::ports::{Clock, SchedulingProvider};
use slotbroker_domain::{
    BookingLink, Requester, Result as DomainResult, SchedulerError, Slot, WaitlistEntry,
    WebhookRegistration,
};

/// Clock pinned to a fixed reference instant for deterministic tests.
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.now
    }
}

/// In-memory fake for `SchedulingProvider`.
///
/// Returns canned slot lists, records registration and waitlist calls,
/// and can be told to fail availability lookups. Designed for
/// orchestrator tests where deterministic responses are required.
#[derive(Default)]
pub struct FakeProvider {
    slots: Mutex<Vec<Slot>>,
    registrations: Mutex<Vec<WebhookRegistration>>,
    registration_creates: AtomicUsize,
    waitlist_adds: Mutex<Vec<String>>,
    fail_availability: bool,
}

impl FakeProvider {
    /// Fake seeded with the provided slots.
    pub fn with_slots(slots: Vec<Slot>) -> Self {
        Self { slots: Mutex::new(slots), ..Self::default() }
    }

    /// Fake whose availability lookups fail with a provider error.
    pub fn failing() -> Self {
        Self { fail_availability: true, ..Self::default() }
    }

    /// Number of `create_webhook_registration` calls observed.
    pub fn registration_creates(&self) -> usize {
        self.registration_creates.load(Ordering::SeqCst)
    }

    /// Event types whose waitlists were appended to.
    pub fn waitlist_adds(&self) -> Vec<String> {
        self.waitlist_adds.lock().unwrap().clone()
    }
}

#[async_trait]
impl SchedulingProvider for FakeProvider {
    async fn list_availability(
        &self,
        _event_type: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        _timezone: &str,
    ) -> DomainResult<Vec<Slot>> {
        if self.fail_availability {
            return Err(SchedulerError::Provider("availability lookup failed".into()));
        }
        Ok(self
            .slots
            .lock()
            .unwrap()
            .iter()
            .filter(|slot| slot.start_time >= start && slot.start_time <= end)
            .copied()
            .collect())
    }

    async fn create_booking_link(
        &self,
        event_type: &str,
        _max_event_count: u32,
    ) -> DomainResult<BookingLink> {
        Ok(BookingLink { booking_url: format!("https://calendly.com/d/{event_type}") })
    }

    async fn list_webhook_registrations(
        &self,
        _scope: &str,
    ) -> DomainResult<Vec<WebhookRegistration>> {
        Ok(self.registrations.lock().unwrap().clone())
    }

    async fn create_webhook_registration(
        &self,
        callback_url: &str,
        events: &[String],
        scope: &str,
        _signing_key: &str,
    ) -> DomainResult<()> {
        self.registration_creates.fetch_add(1, Ordering::SeqCst);
        self.registrations.lock().unwrap().push(WebhookRegistration {
            callback_url: callback_url.to_owned(),
            scope: scope.to_owned(),
            events: events.to_vec(),
        });
        Ok(())
    }

    async fn patch_event_type_template(
        &self,
        _event_type: &str,
        _subject: &str,
        _body: &str,
    ) -> DomainResult<()> {
        Ok(())
    }

    async fn add_to_waitlist(
        &self,
        event_type: &str,
        _requester: &Requester,
    ) -> DomainResult<WaitlistEntry> {
        self.waitlist_adds.lock().unwrap().push(event_type.to_owned());
        Ok(WaitlistEntry { id: format!("waitlist-{event_type}") })
    }
}

/// Convenience wrapper bundling the fake collaborators behind `Arc`s.
pub struct TestHarness {
    pub provider: Arc<FakeProvider>,
    pub clock: Arc<FixedClock>,
}

impl TestHarness {
    pub fn new(provider: FakeProvider, now: DateTime<Utc>) -> Self {
        Self { provider: Arc::new(provider), clock: Arc::new(FixedClock::at(now)) }
    }
}
