//! Domain constants
//!
//! Centralized location for the scheduling constants used throughout the
//! engine.

// Slot matching
pub const SLOT_TOLERANCE_MINUTES: i64 = 30;

// Time resolution
pub const DEFAULT_BOOKING_HOUR: u32 = 9;
pub const DEFAULT_TIME_EXPRESSION: &str = "tomorrow 9am";
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

// Availability window queried per booking request
pub const AVAILABILITY_WINDOW_DAYS: i64 = 7;

// Booking link validity communicated to callers (advisory only)
pub const BOOKING_LINK_TTL_MINUTES: i64 = 30;

// Waitlist re-check interval communicated to callers
pub const WAITLIST_RECHECK_HOURS: i64 = 24;

// Webhook event kinds
pub const WEBHOOK_EVENT_INVITEE_CREATED: &str = "invitee.created";
pub const WEBHOOK_SCOPE_ORGANIZATION: &str = "organization";
