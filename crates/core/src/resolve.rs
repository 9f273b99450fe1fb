//! Time expression resolution
//!
//! Turns natural-language or machine-readable time input plus an IANA
//! timezone name into a canonical, timezone-correct, future UTC instant.

use std::sync::Arc;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use slotbroker_domain::constants::{DEFAULT_BOOKING_HOUR, LOCAL_DATETIME_FORMAT};
use slotbroker_domain::{ResolvedInstant, Result, SchedulerError};

use crate::scheduling::ports::Clock;

/// A time expression classified by how it should be interpreted.
///
/// The resolver dispatches on this variant rather than on loose runtime
/// type inspection of the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateExpression {
    /// Free-text input for the natural-language parser ("tomorrow 2pm")
    NaturalLanguage(String),
    /// Input that already denotes an exact instant (RFC 3339 or epoch
    /// seconds)
    MachineTimestamp(DateTime<Utc>),
}

impl DateExpression {
    /// Classify raw input, promoting machine-readable timestamps so they
    /// bypass the natural-language parser.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::MachineTimestamp(parsed.with_timezone(&Utc));
        }

        if let Ok(epoch_secs) = trimmed.parse::<i64>() {
            if let Some(parsed) = DateTime::from_timestamp(epoch_secs, 0) {
                return Self::MachineTimestamp(parsed);
            }
        }

        Self::NaturalLanguage(trimmed.to_owned())
    }
}

/// Resolves time expressions into canonical future UTC instants.
///
/// The injected clock governs the future check; tests supply a fixed
/// clock to pin it. Relative natural-language phrases ("tomorrow") are
/// anchored at the process clock by the parser itself, which exposes no
/// reference-time hook, so only machine timestamps and absolute phrases
/// resolve reproducibly under a fixed clock.
pub struct TimeExpressionResolver {
    clock: Arc<dyn Clock>,
}

impl TimeExpressionResolver {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Resolve `expression` against `timezone`.
    ///
    /// # Errors
    /// - `InvalidExpression` when the timezone is unknown, the text cannot
    ///   be parsed into any date/time, or the wall clock does not exist in
    ///   the target zone (spring-forward gap).
    /// - `PastDate` when the resolved instant is not strictly after now.
    pub fn resolve(&self, expression: &DateExpression, timezone: &str) -> Result<ResolvedInstant> {
        let tz: Tz = timezone.parse().map_err(|_| {
            SchedulerError::InvalidExpression(format!("unknown timezone: {timezone}"))
        })?;

        let utc = match expression {
            DateExpression::MachineTimestamp(instant) => *instant,
            DateExpression::NaturalLanguage(text) => Self::resolve_natural(text, tz)?,
        };

        let local = utc.with_timezone(&tz).format(LOCAL_DATETIME_FORMAT).to_string();

        if utc <= self.clock.now_utc() {
            return Err(SchedulerError::PastDate(local));
        }

        Ok(ResolvedInstant { utc, timezone: tz, local })
    }

    /// Parse free text and interpret the resulting wall clock in the
    /// target timezone.
    ///
    /// When the text carries no time-of-day token the hour defaults to
    /// 09:00 **in the target zone**. The wall-clock datetime is built
    /// first and only then converted to UTC using the zone's offset
    /// rules, so DST transitions are honoured.
    fn resolve_natural(text: &str, tz: Tz) -> Result<DateTime<Utc>> {
        let expanded = expand_abbreviations(text);
        let parsed = fuzzydate::parse(&expanded).map_err(|_| {
            SchedulerError::InvalidExpression(format!("could not parse date/time: \"{text}\""))
        })?;

        let wall_clock = if has_time_component(text) {
            parsed
        } else {
            default_booking_time(parsed)?
        };

        match tz.from_local_datetime(&wall_clock) {
            LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
            // Fall-back transition: the wall clock occurs twice; take the
            // earlier offset
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
            // Spring-forward gap: the wall clock does not exist in this zone
            LocalResult::None => Err(SchedulerError::InvalidExpression(format!(
                "\"{text}\" resolves to a nonexistent local time in {tz}"
            ))),
        }
    }
}

fn default_booking_time(parsed: NaiveDateTime) -> Result<NaiveDateTime> {
    parsed.date().and_hms_opt(DEFAULT_BOOKING_HOUR, 0, 0).ok_or_else(|| {
        SchedulerError::Internal("default booking hour out of range".to_owned())
    })
}

/// Expand weekday/month abbreviations the natural-language parser does
/// not handle on its own.
fn expand_abbreviations(input: &str) -> String {
    const ABBREVS: &[(&str, &str)] = &[
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    let lower = input.to_lowercase();
    let mut expanded = String::with_capacity(lower.len());

    for (i, word) in lower.split_whitespace().enumerate() {
        if i > 0 {
            expanded.push(' ');
        }
        let replacement = ABBREVS
            .iter()
            .find(|(abbrev, _)| *abbrev == word)
            .map_or(word, |(_, full)| *full);
        expanded.push_str(replacement);
    }

    expanded
}

/// Whether the input text specifies a time of day.
///
/// Looks for am/pm markers, HH:MM patterns, "noon"/"midnight", and
/// "at <digit>". Token detection is required because the parser renders
/// date-only input as midnight, which is indistinguishable from an
/// explicit "midnight".
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();

    if lower.contains("noon") || lower.contains("midnight") {
        return true;
    }

    let bytes = lower.as_bytes();

    // "6pm", "6 pm", "11am"
    for (i, &b) in bytes.iter().enumerate() {
        if (b == b'a' || b == b'p') && bytes.get(i + 1) == Some(&b'm') {
            if i > 0 && bytes[i - 1].is_ascii_digit() {
                return true;
            }
            if i > 1 && bytes[i - 1] == b' ' && bytes[i - 2].is_ascii_digit() {
                return true;
            }
        }
    }

    // "14:30"
    for (i, &b) in bytes.iter().enumerate() {
        if b == b':'
            && i > 0
            && bytes[i - 1].is_ascii_digit()
            && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
        {
            return true;
        }
    }

    // "at 3", "at 15"
    let after_at = lower
        .strip_prefix("at ")
        .or_else(|| lower.find(" at ").map(|pos| &lower[pos + 4..]));
    if let Some(rest) = after_at {
        if rest.starts_with(|c: char| c.is_ascii_digit()) {
            return true;
        }
    }

    false
}
