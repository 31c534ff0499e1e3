//! Local wall-clock ↔ UTC conversion (RFC 5545 §3.3.5 semantics).
//!
//! Zoned iCalendar date-times are wall-clock fields plus a TZID, and the
//! mapping to the UTC timeline is not total: daylight-saving transitions
//! leave gaps (a wall time that never happens) and folds (a wall time that
//! happens twice). The conversions here pin both cases down so the engine
//! is deterministic across transitions.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::zone::ZoneId;

/// Converts local wall-clock fields in `zone` to a UTC instant.
///
/// Disambiguation:
/// - **DST gap** (the wall time does not exist): the same wall time read
///   with the pre-transition offset, i.e. the instant lands just after
///   the gap. A 02:30 that falls into a spring-forward hour comes back as
///   03:30 local.
/// - **DST fold** (the wall time exists twice): the second, post-transition
///   occurrence.
///
/// Fixed offsets subtract the offset; unresolved zones read the fields as
/// UTC. Returns `None` only when the zone database cannot map the shifted
/// wall time either, which does not happen for real zones.
#[must_use]
pub fn to_instant(local: NaiveDateTime, zone: &ZoneId) -> Option<DateTime<Utc>> {
    match zone {
        ZoneId::Iana(tz) => from_local(local, *tz),
        ZoneId::Fixed { minutes } => Some(DateTime::from_naive_utc_and_offset(
            local - TimeDelta::minutes(i64::from(*minutes)),
            Utc,
        )),
        ZoneId::Unresolved(_) => Some(DateTime::from_naive_utc_and_offset(local, Utc)),
    }
}

fn from_local(local: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        // Fold: the clock repeats this hour; take the post-transition read.
        LocalResult::Ambiguous(_, second) => Some(second.with_timezone(&Utc)),
        // Gap: shift forward an hour and map that instead. Standard DST
        // gaps are exactly one hour, so this reads the original wall time
        // with the pre-transition offset.
        LocalResult::None => match tz.from_local_datetime(&(local + TimeDelta::hours(1))) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                Some(dt.with_timezone(&Utc))
            }
            LocalResult::None => None,
        },
    }
}

/// Parses a DATE-TIME in compact (`20260226T000000`, seconds optional) or
/// extended (`2026-02-26T00:00:00`) form. A trailing `Z` is accepted and
/// ignored; the caller decides the zone.
///
/// Returns `None` when the text matches neither shape.
#[must_use]
pub fn parse_wall(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix(['Z', 'z']).unwrap_or(trimmed);

    const FORMATS: [&str; 4] = [
        "%Y%m%dT%H%M%S",
        "%Y%m%dT%H%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}

/// Formats an instant as its wall clock in `zone`, `YYYYMMDDTHHmmss`.
///
/// Used to anchor recurrence rules in the event's own zone.
#[must_use]
pub fn format_rrule_anchor(instant: DateTime<Utc>, zone: &ZoneId) -> String {
    const COMPACT: &str = "%Y%m%dT%H%M%S";
    match zone {
        ZoneId::Iana(tz) => instant.with_timezone(tz).format(COMPACT).to_string(),
        ZoneId::Fixed { minutes } => (instant.naive_utc()
            + TimeDelta::minutes(i64::from(*minutes)))
        .format(COMPACT)
        .to_string(),
        ZoneId::Unresolved(_) => instant.naive_utc().format(COMPACT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn wall(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn zoned_conversion_standard_time() {
        // January in Berlin is UTC+1.
        let utc = to_instant(wall(2026, 1, 15, 10, 0, 0), &ZoneId::Iana(Tz::Europe__Berlin));
        assert_eq!(utc, Some(Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap()));
    }

    #[test]
    fn zoned_conversion_daylight_time() {
        // July in Berlin is UTC+2.
        let utc = to_instant(wall(2026, 7, 15, 10, 0, 0), &ZoneId::Iana(Tz::Europe__Berlin));
        assert_eq!(utc, Some(Utc.with_ymd_and_hms(2026, 7, 15, 8, 0, 0).unwrap()));
    }

    #[test]
    fn gap_maps_to_after_transition() {
        // US spring forward 2026-03-08: 02:30 America/New_York does not
        // exist. The later reading is 03:30 EDT = 07:30Z.
        let utc = to_instant(
            wall(2026, 3, 8, 2, 30, 0),
            &ZoneId::Iana(Tz::America__New_York),
        );
        assert_eq!(utc, Some(Utc.with_ymd_and_hms(2026, 3, 8, 7, 30, 0).unwrap()));
    }

    #[test]
    fn fold_takes_second_occurrence() {
        // US fall back 2026-11-01: 01:30 America/New_York happens at
        // 05:30Z (EDT) and again at 06:30Z (EST). We take the second.
        let utc = to_instant(
            wall(2026, 11, 1, 1, 30, 0),
            &ZoneId::Iana(Tz::America__New_York),
        );
        assert_eq!(utc, Some(Utc.with_ymd_and_hms(2026, 11, 1, 6, 30, 0).unwrap()));
    }

    #[test]
    fn fixed_offset_subtracts() {
        let utc = to_instant(wall(2026, 1, 15, 12, 0, 0), &ZoneId::fixed(330));
        assert_eq!(utc, Some(Utc.with_ymd_and_hms(2026, 1, 15, 6, 30, 0).unwrap()));
    }

    #[test]
    fn unresolved_reads_as_utc() {
        let utc = to_instant(
            wall(2026, 1, 15, 12, 0, 0),
            &ZoneId::Unresolved("Middle Earth".into()),
        );
        assert_eq!(utc, Some(Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()));
    }

    #[test]
    fn parse_both_textual_forms() {
        let expected = wall(2026, 2, 26, 0, 0, 0);
        assert_eq!(parse_wall("20260226T000000"), Some(expected));
        assert_eq!(parse_wall("20260226T0000"), Some(expected));
        assert_eq!(parse_wall("2026-02-26T00:00:00"), Some(expected));
        assert_eq!(parse_wall("2026-02-26T00:00"), Some(expected));
        assert_eq!(parse_wall("20260226T000000Z"), Some(expected));
        assert_eq!(parse_wall("not a date"), None);
        assert_eq!(parse_wall("20260226"), None);
    }

    #[test]
    fn rrule_anchor_is_local_wall_clock() {
        let instant = Utc.with_ymd_and_hms(2023, 10, 25, 23, 0, 0).unwrap();
        assert_eq!(
            format_rrule_anchor(instant, &ZoneId::Iana(Tz::America__Los_Angeles)),
            "20231025T160000"
        );
        assert_eq!(
            format_rrule_anchor(instant, &ZoneId::fixed(120)),
            "20231026T010000"
        );
    }
}
