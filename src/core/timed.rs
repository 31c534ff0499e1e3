//! Instants carrying their calendar metadata.
//!
//! iCalendar date values are not bare instants: a DTSTART knows whether it
//! was a whole-day DATE or a zoned DATE-TIME, and expansion must preserve
//! that through every derived occurrence. [`Timed`] pairs a UTC instant
//! with the originating zone and the date-only flag so the metadata
//! survives cloning and arithmetic.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use crate::zone::ZoneId;

/// A UTC instant plus the calendar metadata it was parsed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timed {
    /// The point on the UTC timeline.
    pub instant: DateTime<Utc>,
    /// The zone the value was expressed in, normalized. `None` for plain
    /// UTC or floating values.
    pub zone: Option<ZoneId>,
    /// Whether this value denotes a calendar date rather than an instant.
    ///
    /// Date-only values store midnight of the calendar date directly in
    /// the UTC fields, so the date reads back identically on any machine.
    pub date_only: bool,
}

impl Timed {
    /// Wraps a plain UTC instant.
    #[must_use]
    pub const fn utc(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            zone: None,
            date_only: false,
        }
    }

    /// Builds a whole-day value for a calendar date.
    ///
    /// The date's own fields become the stored fields; no machine-zone
    /// offset is involved, which is what keeps whole-day events on the
    /// same calendar day everywhere.
    #[must_use]
    pub fn date(date: NaiveDate) -> Self {
        Self {
            instant: DateTime::from_naive_utc_and_offset(
                date.and_hms_opt(0, 0, 0).expect("midnight is always valid"),
                Utc,
            ),
            zone: None,
            date_only: true,
        }
    }

    /// Builds a value from local wall-clock fields in a zone.
    ///
    /// Returns `None` when the wall time cannot be mapped (which only
    /// happens for degenerate zones; DST gaps and folds are disambiguated,
    /// see [`crate::expand::walltime::to_instant`]).
    #[must_use]
    pub fn zoned(local: NaiveDateTime, zone: ZoneId) -> Option<Self> {
        let instant = crate::expand::walltime::to_instant(local, &zone)?;
        Some(Self {
            instant,
            zone: Some(zone),
            date_only: false,
        })
    }

    /// Returns a copy pointing at `instant` with this value's metadata.
    #[must_use]
    pub fn with_instant(&self, instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            zone: self.zone.clone(),
            date_only: self.date_only,
        }
    }

    /// Returns a copy shifted by `delta`, metadata preserved.
    #[must_use]
    pub fn shift(&self, delta: TimeDelta) -> Self {
        self.with_instant(self.instant + delta)
    }

    /// The instant in ISO-8601 UTC form with milliseconds, e.g.
    /// `2023-11-09T00:00:00.000Z`.
    #[must_use]
    pub fn iso_utc(&self) -> String {
        self.instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }

    /// The calendar date this value denotes.
    ///
    /// Date-only values read their stored fields; zoned values read the
    /// zone's local calendar; everything else reads UTC.
    #[must_use]
    pub fn local_date(&self) -> NaiveDate {
        if self.date_only {
            return self.instant.date_naive();
        }
        match &self.zone {
            Some(zone) => zone.local_date(self.instant),
            None => self.instant.date_naive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Tz;

    #[test]
    fn date_only_keeps_calendar_fields() {
        let t = Timed::date(NaiveDate::from_ymd_opt(2026, 2, 16).unwrap());
        assert!(t.date_only);
        assert_eq!(t.local_date(), NaiveDate::from_ymd_opt(2026, 2, 16).unwrap());
        assert_eq!(t.iso_utc(), "2026-02-16T00:00:00.000Z");
    }

    #[test]
    fn zoned_value_converts_and_keeps_zone() {
        let local = NaiveDate::from_ymd_opt(2026, 2, 26)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let t = Timed::zoned(local, ZoneId::Iana(Tz::Europe__Berlin)).unwrap();
        assert_eq!(
            t.instant,
            Utc.with_ymd_and_hms(2026, 2, 25, 23, 0, 0).unwrap()
        );
        // The key question: which calendar day does this value mean?
        assert_eq!(t.local_date(), NaiveDate::from_ymd_opt(2026, 2, 26).unwrap());
    }

    #[test]
    fn with_instant_preserves_metadata() {
        let base = Timed::zoned(
            NaiveDate::from_ymd_opt(2023, 10, 25)
                .unwrap()
                .and_hms_opt(16, 0, 0)
                .unwrap(),
            ZoneId::Iana(Tz::America__Los_Angeles),
        )
        .unwrap();
        let moved = base.shift(TimeDelta::weeks(1));
        assert_eq!(moved.zone, base.zone);
        assert_eq!(moved.date_only, base.date_only);
        assert_eq!(moved.instant - base.instant, TimeDelta::weeks(1));
    }

    #[test]
    fn iso_utc_has_milliseconds() {
        let t = Timed::utc(Utc.with_ymd_and_hms(2023, 11, 9, 0, 0, 0).unwrap());
        assert_eq!(t.iso_utc(), "2023-11-09T00:00:00.000Z");
    }
}
