//! Recurrence rule evaluation behind a narrow trait.
//!
//! The engine only ever asks a rule one question: which base instants fall
//! inside a window. Everything else about RRULE evaluation (BYDAY,
//! BYSETPOS, COUNT bookkeeping) stays behind [`Recurrence`], with the
//! provided implementation delegating to the `rrule` crate.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use crate::core::Timed;
use crate::expand::walltime::format_rrule_anchor;
use crate::zone::ZoneId;

/// Hard cap on generated instances, against runaway or malformed rules.
pub(crate) const MAX_RULE_INSTANCES: u16 = 10_000;

/// A source of base occurrence instants.
///
/// `between` returns every instant the rule generates inside
/// `[from, to]`, both bounds inclusive, ascending, honoring the rule's
/// own COUNT/UNTIL limits.
pub trait Recurrence: fmt::Debug + Send + Sync {
    /// Base instants with starts inside the inclusive window.
    fn between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<DateTime<Utc>>;
}

/// Error constructing a [`RuleSetIter`].
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// The RRULE text (or its derived DTSTART anchor) did not parse.
    #[error("failed to parse RRULE {rule:?}: {reason}")]
    Parse {
        /// The offending rule text.
        rule: String,
        /// The underlying parser message.
        reason: String,
    },
}

/// [`Recurrence`] implementation backed by an [`rrule::RRuleSet`].
///
/// The rule is anchored at construction: zoned anchors become
/// `DTSTART;TZID=…` lines so BYDAY/UNTIL evaluate on the event's local
/// clock, date-only and unzoned anchors become plain UTC `DTSTART`s.
#[derive(Debug, Clone)]
pub struct RuleSetIter {
    set: rrule::RRuleSet,
}

impl RuleSetIter {
    /// Builds an iterator from RRULE text and the event's start.
    ///
    /// The text may carry a leading `RRULE:` tag or not; both forms occur
    /// in the wild.
    ///
    /// ## Errors
    /// Returns [`RuleError::Parse`] when the rule text is malformed or
    /// names a zone the evaluator does not know.
    pub fn new(rule: &str, anchor: &Timed) -> Result<Self, RuleError> {
        let rule_text = rule.trim().trim_start_matches("RRULE:");

        let dtstart = match (&anchor.zone, anchor.date_only) {
            (Some(ZoneId::Iana(tz)), false) => format!(
                "DTSTART;TZID={}:{}",
                tz.name(),
                format_rrule_anchor(anchor.instant, &ZoneId::Iana(*tz)),
            ),
            // Fixed offsets and unresolved zones have no TZID the
            // evaluator would accept; anchor on the UTC instant instead.
            _ => format!(
                "DTSTART:{}Z",
                anchor.instant.naive_utc().format("%Y%m%dT%H%M%S"),
            ),
        };

        let document = format!("{dtstart}\nRRULE:{rule_text}");
        let set = document
            .parse::<rrule::RRuleSet>()
            .map_err(|e| RuleError::Parse {
                rule: rule_text.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { set })
    }
}

impl Recurrence for RuleSetIter {
    fn between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        if from > to {
            return Vec::new();
        }

        let tz = rrule::Tz::Tz(chrono_tz::UTC);
        // The evaluator's bounds are not inclusive on both sides; widen by
        // a second and filter exactly.
        let result = self
            .set
            .clone()
            .after((from - TimeDelta::seconds(1)).with_timezone(&tz))
            .before((to + TimeDelta::seconds(1)).with_timezone(&tz))
            .all(MAX_RULE_INSTANCES);

        let mut dates: Vec<DateTime<Utc>> = result
            .dates
            .into_iter()
            .map(|dt| dt.with_timezone(&Utc))
            .filter(|dt| *dt >= from && *dt <= to)
            .collect();
        dates.sort_unstable();
        dates
    }
}
