//! Common data types used throughout the scheduling engine

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Identity of the person requesting a booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requester {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One provider-offered appointment opening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start_time: DateTime<Utc>,
}

/// A time expression resolved into a canonical UTC instant.
///
/// Created once per booking request, immutable afterwards. The UTC
/// timestamp is guaranteed to be strictly in the future at resolution
/// time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstant {
    /// Canonical instant, always compared in UTC internally
    pub utc: DateTime<Utc>,
    /// Originating IANA timezone
    pub timezone: Tz,
    /// Wall-clock rendering in the originating timezone (`yyyy-MM-dd HH:mm`)
    pub local: String,
}

/// Outcome of matching a resolved instant against provider slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// No candidate within the tolerance window; a normal outcome, not an
    /// error
    NoMatch,
    Matched(Slot),
}

/// Scheduling link created by the provider for a single booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingLink {
    pub booking_url: String,
}

/// Webhook subscription as reported by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookRegistration {
    pub callback_url: String,
    pub scope: String,
    #[serde(default)]
    pub events: Vec<String>,
}

/// Waitlist membership created by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: String,
}

/// Inbound confirmation payload
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub event: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// A booking request as accepted by the orchestrator
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub event_type: String,
    pub requester: Requester,
    pub timezone: String,
    #[serde(default)]
    pub preferred_time: Option<String>,
}

/// A provider slot rendered in the requester's timezone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotView {
    pub date: String,
    pub time: String,
    pub iso: DateTime<Utc>,
    pub timezone: String,
}

/// A single instant rendered in the requester's timezone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedTime {
    pub formatted: String,
    pub iso: DateTime<Utc>,
    pub timezone: String,
}

/// Terminal outcome of one booking request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookingOutcome {
    /// A scheduling link was created; the requester must confirm through it
    ConfirmationRequired {
        booking_url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        confirmed_time: Option<FormattedTime>,
        #[serde(skip_serializing_if = "Option::is_none")]
        available_slots: Option<Vec<SlotView>>,
        /// Advisory validity window for the booking link, not enforced here
        expires_at: DateTime<Utc>,
    },
    /// No slot within tolerance of the requested time
    TimeUnavailable {
        message: String,
        requested_time: String,
        available_slots: Vec<SlotView>,
    },
    /// Provider had zero openings; requester was waitlisted
    #[serde(rename = "waitlist")]
    Waitlisted {
        message: String,
        waitlist_id: String,
        next_check_date: DateTime<Utc>,
    },
}

/// Result of handling an inbound confirmation webhook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    /// Signature verified; `processed` is true only for event kinds that
    /// trigger a side effect
    Accepted { processed: bool },
    /// Signature verification failed; the caller must respond 403 and take
    /// no further action
    Rejected,
}
