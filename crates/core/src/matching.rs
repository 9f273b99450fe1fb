//! Slot matching
//!
//! Decides whether a provider-offered slot is an acceptable match for a
//! resolved instant, with deterministic tie-breaking.

use chrono::Duration;
use slotbroker_domain::constants::SLOT_TOLERANCE_MINUTES;
use slotbroker_domain::{MatchResult, ResolvedInstant, Slot};

/// Matches a target instant against discrete provider slots.
pub struct SlotMatcher;

impl SlotMatcher {
    /// Find the acceptable slot for `target`, if any.
    ///
    /// A candidate qualifies when its absolute distance from the target is
    /// strictly below the 30-minute tolerance. Among qualifying candidates
    /// the smallest distance wins; ties break to the earliest slot start.
    /// The result is a total order over candidates, independent of their
    /// input ordering. Never fails: `NoMatch` is a normal outcome.
    pub fn find_match(target: &ResolvedInstant, candidates: &[Slot]) -> MatchResult {
        let tolerance = Duration::minutes(SLOT_TOLERANCE_MINUTES);

        candidates
            .iter()
            .filter_map(|slot| {
                let distance = (slot.start_time - target.utc).abs();
                (distance < tolerance).then_some((distance, *slot))
            })
            .min_by_key(|(distance, slot)| (*distance, slot.start_time))
            .map_or(MatchResult::NoMatch, |(_, slot)| MatchResult::Matched(slot))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;

    use super::*;

    fn target(hour: u32, minute: u32) -> ResolvedInstant {
        let utc = Utc.with_ymd_and_hms(2999, 7, 1, hour, minute, 0).unwrap();
        ResolvedInstant {
            utc,
            timezone: Tz::UTC,
            local: utc.format("%Y-%m-%d %H:%M").to_string(),
        }
    }

    fn slot(hour: u32, minute: u32) -> Slot {
        Slot { start_time: Utc.with_ymd_and_hms(2999, 7, 1, hour, minute, 0).unwrap() }
    }

    fn slot_at_seconds(hour: u32, minute: u32, second: u32) -> Slot {
        Slot { start_time: Utc.with_ymd_and_hms(2999, 7, 1, hour, minute, second).unwrap() }
    }

    #[test]
    fn empty_candidates_is_no_match() {
        assert_eq!(SlotMatcher::find_match(&target(14, 0), &[]), MatchResult::NoMatch);
    }

    #[test]
    fn exact_slot_matches() {
        let slots = [slot(14, 0)];
        assert_eq!(
            SlotMatcher::find_match(&target(14, 0), &slots),
            MatchResult::Matched(slots[0])
        );
    }

    #[test]
    fn exactly_thirty_minutes_away_is_no_match() {
        let slots = [slot(14, 30)];
        assert_eq!(SlotMatcher::find_match(&target(14, 0), &slots), MatchResult::NoMatch);
    }

    #[test]
    fn just_inside_tolerance_matches() {
        // 29 minutes 59 seconds away
        let slots = [slot_at_seconds(14, 29, 59)];
        assert_eq!(
            SlotMatcher::find_match(&target(14, 0), &slots),
            MatchResult::Matched(slots[0])
        );
    }

    #[test]
    fn closest_slot_wins_over_first_in_order() {
        let farther = slot(14, 25);
        let closer = slot(14, 5);
        let slots = [farther, closer];

        assert_eq!(SlotMatcher::find_match(&target(14, 0), &slots), MatchResult::Matched(closer));
    }

    #[test]
    fn equidistant_tie_breaks_to_earliest_slot() {
        let before = slot(13, 50);
        let after = slot(14, 10);

        assert_eq!(
            SlotMatcher::find_match(&target(14, 0), &[after, before]),
            MatchResult::Matched(before)
        );
    }

    #[test]
    fn selection_is_invariant_under_permutation() {
        let slots = [slot(13, 45), slot(14, 10), slot(14, 20), slot(15, 30)];
        let expected = SlotMatcher::find_match(&target(14, 0), &slots);
        assert_eq!(expected, MatchResult::Matched(slot(14, 10)));

        let permutations: [[Slot; 4]; 3] = [
            [slots[3], slots[2], slots[1], slots[0]],
            [slots[1], slots[3], slots[0], slots[2]],
            [slots[2], slots[0], slots[3], slots[1]],
        ];
        for permuted in &permutations {
            assert_eq!(SlotMatcher::find_match(&target(14, 0), permuted), expected);
        }
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let slots = [slot(13, 50), slot(14, 10)];
        let first = SlotMatcher::find_match(&target(14, 0), &slots);
        for _ in 0..10 {
            assert_eq!(SlotMatcher::find_match(&target(14, 0), &slots), first);
        }
    }
}
