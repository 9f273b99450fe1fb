//! Locale rendering of instants in a requester's timezone

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use slotbroker_domain::{FormattedTime, Slot, SlotView};

/// Render the date part, e.g. `Jul 1, 2999`.
pub fn format_date(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%b %-d, %Y").to_string()
}

/// Render the time part, e.g. `2:00 PM`.
pub fn format_time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%-I:%M %p").to_string()
}

/// Render the full form, e.g. `Jul 1, 2999, 2:00 PM`.
pub fn format_full(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Render a full instant with its source ISO value and zone name.
pub fn formatted_time(instant: DateTime<Utc>, tz: Tz) -> FormattedTime {
    FormattedTime {
        formatted: format_full(instant, tz),
        iso: instant,
        timezone: tz.name().to_owned(),
    }
}

/// Render provider slots in the requester's timezone.
pub fn slot_views(slots: &[Slot], tz: Tz) -> Vec<SlotView> {
    slots
        .iter()
        .map(|slot| SlotView {
            date: format_date(slot.start_time, tz),
            time: format_time(slot.start_time, tz),
            iso: slot.start_time,
            timezone: tz.name().to_owned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    use super::*;

    #[test]
    fn renders_in_target_timezone() {
        // 18:00 UTC on a July day is 14:00 EDT
        let instant = Utc.with_ymd_and_hms(2999, 7, 1, 18, 0, 0).unwrap();

        assert_eq!(format_date(instant, New_York), "Jul 1, 2999");
        assert_eq!(format_time(instant, New_York), "2:00 PM");
        assert_eq!(format_full(instant, New_York), "Jul 1, 2999, 2:00 PM");
    }

    #[test]
    fn slot_views_carry_iso_and_zone() {
        let instant = Utc.with_ymd_and_hms(2999, 7, 1, 18, 0, 0).unwrap();
        let views = slot_views(&[Slot { start_time: instant }], New_York);

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].iso, instant);
        assert_eq!(views[0].timezone, "America/New_York");
    }
}
