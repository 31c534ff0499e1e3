//! Canonical date keys for correlating occurrences.
//!
//! EXDATE entries and RECURRENCE-ID overrides are matched to generated
//! occurrences by calendar date, encoded as `YYYY-MM-DD`. Which calendar
//! that date is read from is the whole game: an Exchange server emitting
//! `TZID=W. Europe Standard Time:20260226T000000` means February 26, even
//! though the instant is February 25 in UTC. Getting this wrong silently
//! drops or duplicates occurrences near midnight.

use std::collections::HashMap;

use crate::core::Timed;

/// Derives the canonical `YYYY-MM-DD` key for a value.
///
/// Priority: date-only values read their stored calendar fields; zoned
/// values read the zone's local calendar; everything else reads UTC.
#[must_use]
pub fn date_key(value: &Timed) -> String {
    value.local_date().format("%Y-%m-%d").to_string()
}

/// Looks up `value` in a map keyed the way parsers key EXDATE and
/// override tables.
///
/// A probe matches under the canonical date key or under the instant's
/// full ISO-8601 UTC timestamp. The second form covers producers that key
/// by timestamp, and occurrences whose UTC calendar day drifted off their
/// local day across a DST change: a weekly 4 PM Los Angeles event lands
/// on the next UTC day once PDT ends.
#[must_use]
pub fn probe<'m, V>(map: &'m HashMap<String, V>, value: &Timed) -> Option<&'m V> {
    map.get(&date_key(value))
        .or_else(|| map.get(&value.iso_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::ZoneId;
    use chrono::{NaiveDate, TimeZone, Utc};
    use chrono_tz::Tz;

    fn berlin_midnight(y: i32, m: u32, d: u32) -> Timed {
        Timed::zoned(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            ZoneId::Iana(Tz::Europe__Berlin),
        )
        .unwrap()
    }

    #[test]
    fn date_only_key_ignores_zones() {
        let t = Timed::date(NaiveDate::from_ymd_opt(2026, 2, 18).unwrap());
        assert_eq!(date_key(&t), "2026-02-18");
    }

    #[test]
    fn zoned_key_reads_the_zone_calendar() {
        // Midnight Feb 26 in Berlin is 23:00 Feb 25 UTC; the key must say
        // Feb 26.
        let t = berlin_midnight(2026, 2, 26);
        assert_eq!(date_key(&t), "2026-02-26");
    }

    #[test]
    fn bare_instant_reads_utc() {
        let t = Timed::utc(Utc.with_ymd_and_hms(2026, 2, 25, 23, 0, 0).unwrap());
        assert_eq!(date_key(&t), "2026-02-25");
    }

    #[test]
    fn unresolved_zone_reads_utc() {
        let mut t = Timed::utc(Utc.with_ymd_and_hms(2026, 2, 25, 23, 0, 0).unwrap());
        t.zone = Some(ZoneId::Unresolved("Middle Earth".into()));
        assert_eq!(date_key(&t), "2026-02-25");
    }

    #[test]
    fn key_is_idempotent_through_zone_midnight() {
        // Build a value back from its own key at zone midnight; the key
        // must not move.
        let original = berlin_midnight(2026, 2, 26);
        let key = date_key(&original);
        let rebuilt = Timed::zoned(
            key.parse::<NaiveDate>().unwrap().and_hms_opt(0, 0, 0).unwrap(),
            ZoneId::Iana(Tz::Europe__Berlin),
        )
        .unwrap();
        assert_eq!(date_key(&rebuilt), key);
    }

    #[test]
    fn probe_matches_by_key_or_iso_timestamp() {
        let mut map = HashMap::new();
        map.insert("2023-11-08".to_string(), ());
        map.insert("2023-11-16T00:00:00.000Z".to_string(), ());

        // A 4 PM Los Angeles occurrence after the PDT→PST switch: UTC day
        // is Nov 9, local day is Nov 8.
        let by_key = Timed::zoned(
            NaiveDate::from_ymd_opt(2023, 11, 8)
                .unwrap()
                .and_hms_opt(16, 0, 0)
                .unwrap(),
            ZoneId::Iana(Tz::America__Los_Angeles),
        )
        .unwrap();
        assert!(probe(&map, &by_key).is_some());

        let by_iso = Timed::utc(Utc.with_ymd_and_hms(2023, 11, 16, 0, 0, 0).unwrap());
        assert!(probe(&map, &by_iso).is_some());

        let miss = Timed::utc(Utc.with_ymd_and_hms(2023, 11, 2, 0, 0, 0).unwrap());
        assert!(probe(&map, &miss).is_none());
    }
}
