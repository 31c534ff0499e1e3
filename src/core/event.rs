//! The event record handed to the expansion engine.
//!
//! This is the post-parse shape of a VEVENT: instants already carry their
//! zone and date-only metadata, EXDATE and RECURRENCE-ID entries are keyed
//! by their canonical calendar date, and the recurrence rule sits behind
//! the [`Recurrence`] trait.

use std::collections::HashMap;

use crate::core::{Duration, Timed};
use crate::expand::datekey::date_key;
use crate::expand::Recurrence;

/// Whether an event's start and end denote calendar dates or instants
/// (the DTSTART `VALUE` parameter, RFC 5545 §3.3.4 / §3.3.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateType {
    /// Whole-day semantics (`VALUE=DATE`).
    Date,
    /// Timed semantics (`VALUE=DATE-TIME`).
    DateTime,
}

/// A parsed calendar event.
///
/// Override events (RECURRENCE-ID replacements) use the same shape and
/// live in [`Event::recurrences`], keyed by the replaced occurrence's
/// canonical date.
#[derive(Debug)]
pub struct Event {
    /// iCalendar UID.
    pub uid: String,
    /// Display summary.
    pub summary: String,
    /// Start of the base occurrence.
    pub start: Timed,
    /// End of the base occurrence, when the source carried DTEND.
    pub end: Option<Timed>,
    /// Explicit DURATION, when the source carried one instead of DTEND.
    pub duration: Option<Duration>,
    /// Whole-day vs. timed semantics.
    pub datetype: DateType,
    /// The recurrence rule, if the event repeats.
    pub rrule: Option<Box<dyn Recurrence>>,
    /// Additional occurrence starts (RDATE).
    pub rdate: Vec<Timed>,
    /// Excluded occurrences, keyed by canonical date. The value keeps the
    /// original EXDATE entry for diagnostics.
    pub exdate: HashMap<String, Timed>,
    /// Per-occurrence override events, keyed by the canonical date of the
    /// occurrence they replace.
    pub recurrences: HashMap<String, Event>,
}

impl Event {
    /// Creates an event with the minimum the engine needs.
    ///
    /// `datetype` follows the start value's date-only flag; adjust with
    /// [`Event::with_datetype`] if the source says otherwise.
    #[must_use]
    pub fn new(uid: impl Into<String>, summary: impl Into<String>, start: Timed) -> Self {
        let datetype = if start.date_only {
            DateType::Date
        } else {
            DateType::DateTime
        };
        Self {
            uid: uid.into(),
            summary: summary.into(),
            start,
            end: None,
            duration: None,
            datetype,
            rrule: None,
            rdate: Vec::new(),
            exdate: HashMap::new(),
            recurrences: HashMap::new(),
        }
    }

    /// Sets the end of the base occurrence.
    #[must_use]
    pub fn with_end(mut self, end: Timed) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets an explicit duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Overrides the date/date-time declaration.
    #[must_use]
    pub fn with_datetype(mut self, datetype: DateType) -> Self {
        self.datetype = datetype;
        self
    }

    /// Attaches a recurrence rule.
    #[must_use]
    pub fn with_rrule(mut self, rule: impl Recurrence + 'static) -> Self {
        self.rrule = Some(Box::new(rule));
        self
    }

    /// Adds an RDATE occurrence.
    #[must_use]
    pub fn with_rdate(mut self, at: Timed) -> Self {
        self.rdate.push(at);
        self
    }

    /// Excludes the occurrence on `at`'s calendar date.
    ///
    /// The canonical key is derived here, so entries built through this
    /// method always match the keys the engine derives for candidates.
    #[must_use]
    pub fn with_exdate(mut self, at: Timed) -> Self {
        self.exdate.insert(date_key(&at), at);
        self
    }

    /// Excludes an occurrence under a caller-supplied key.
    ///
    /// For producers that keyed the exclusion by a full UTC timestamp
    /// rather than a calendar date; the engine probes both forms.
    #[must_use]
    pub fn with_exdate_key(mut self, key: impl Into<String>, at: Timed) -> Self {
        self.exdate.insert(key.into(), at);
        self
    }

    /// Registers an override for the occurrence on `recurrence_id`'s
    /// calendar date.
    #[must_use]
    pub fn with_override(mut self, recurrence_id: Timed, event: Event) -> Self {
        self.recurrences.insert(date_key(&recurrence_id), event);
        self
    }

    /// Registers an override under a caller-supplied key.
    #[must_use]
    pub fn with_override_key(mut self, key: impl Into<String>, event: Event) -> Self {
        self.recurrences.insert(key.into(), event);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::ZoneId;
    use chrono::{NaiveDate, TimeZone, Utc};
    use chrono_tz::Tz;

    #[test]
    fn datetype_follows_start() {
        let all_day = Event::new("u", "s", Timed::date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
        assert_eq!(all_day.datetype, DateType::Date);

        let timed = Event::new(
            "u",
            "s",
            Timed::utc(Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap()),
        );
        assert_eq!(timed.datetype, DateType::DateTime);
    }

    #[test]
    fn exdate_is_keyed_by_local_calendar_date() {
        // 4 PM Los Angeles on Nov 8 is Nov 9 in UTC; the key must still
        // say Nov 8.
        let exdate = Timed::zoned(
            NaiveDate::from_ymd_opt(2023, 11, 8)
                .unwrap()
                .and_hms_opt(16, 0, 0)
                .unwrap(),
            ZoneId::Iana(Tz::America__Los_Angeles),
        )
        .unwrap();
        let event = Event::new(
            "u",
            "s",
            Timed::utc(Utc.with_ymd_and_hms(2023, 10, 25, 23, 0, 0).unwrap()),
        )
        .with_exdate(exdate);
        assert!(event.exdate.contains_key("2023-11-08"));
    }
}
