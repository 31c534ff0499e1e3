//! Occurrence expansion.
//!
//! Turns one event record plus a time window into the concrete occurrences
//! inside that window: generates candidates from the recurrence rule (or
//! the lone start), subtracts EXDATEs, substitutes RECURRENCE-ID
//! overrides, derives per-occurrence ends, and filters to the window.

use chrono::{DateTime, TimeDelta, Utc};

use crate::core::{DateType, Event, Instance, Timed};
use crate::error::{ExpandError, ExpandResult};
use crate::expand::datekey;
use crate::expand::rrule::MAX_RULE_INSTANCES;

/// Behavior toggles for one expansion call.
#[derive(Debug, Clone, Copy)]
pub struct ExpandOptions {
    /// Drop occurrences whose date is in the event's EXDATE table.
    pub exclude_exdates: bool,
    /// Substitute RECURRENCE-ID override events.
    pub include_overrides: bool,
    /// Also emit occurrences that started before the window but are still
    /// running when it opens.
    pub expand_ongoing: bool,
    /// Upper bound on emitted instances.
    pub max_instances: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            exclude_exdates: true,
            include_overrides: true,
            expand_ongoing: false,
            max_instances: usize::from(MAX_RULE_INSTANCES),
        }
    }
}

/// A time window plus options.
#[derive(Debug, Clone)]
pub struct ExpandRequest {
    /// Window start, inclusive.
    pub from: DateTime<Utc>,
    /// Window end, inclusive.
    pub to: DateTime<Utc>,
    /// Behavior toggles.
    pub options: ExpandOptions,
}

impl ExpandRequest {
    /// Creates a request with default options.
    #[must_use]
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from,
            to,
            options: ExpandOptions::default(),
        }
    }

    /// Toggles EXDATE subtraction.
    #[must_use]
    pub fn exclude_exdates(mut self, on: bool) -> Self {
        self.options.exclude_exdates = on;
        self
    }

    /// Toggles override substitution.
    #[must_use]
    pub fn include_overrides(mut self, on: bool) -> Self {
        self.options.include_overrides = on;
        self
    }

    /// Toggles inclusion of still-running occurrences.
    #[must_use]
    pub fn expand_ongoing(mut self, on: bool) -> Self {
        self.options.expand_ongoing = on;
        self
    }
}

/// Expands `event` into the occurrences intersecting the request window.
///
/// Instances come back sorted by start, ascending, ties in generation
/// order. The event is borrowed and never modified.
///
/// ## Errors
/// - [`ExpandError::WindowOutOfOrder`] when `from > to`.
/// - [`ExpandError::InvalidEvent`] when the event's end precedes its
///   start.
pub fn expand<'e>(event: &'e Event, request: &ExpandRequest) -> ExpandResult<Vec<Instance<'e>>> {
    if request.from > request.to {
        return Err(ExpandError::WindowOutOfOrder {
            from: request.from,
            to: request.to,
        });
    }
    let base_span = base_span(event)?;
    let options = request.options;

    let mut candidates: Vec<Timed> = match &event.rrule {
        Some(rule) => {
            // Widen the query backwards so an occurrence that starts
            // before the window but is still running when it opens is
            // seen at all. Whole-day events widen at least a day.
            let widen = if event.start.date_only {
                base_span.max(TimeDelta::days(1))
            } else {
                base_span.max(TimeDelta::zero())
            };
            rule.between(request.from - widen, request.to)
                .into_iter()
                .map(|instant| event.start.with_instant(instant))
                .collect()
        }
        None => vec![event.start.clone()],
    };
    for extra in &event.rdate {
        candidates.push(event.start.with_instant(extra.instant));
    }
    candidates.sort_by_key(|c| c.instant);
    candidates.dedup_by_key(|c| c.instant);

    let mut instances = Vec::new();
    for candidate in candidates {
        if options.exclude_exdates && datekey::probe(&event.exdate, &candidate).is_some() {
            continue;
        }

        let overridden = if options.include_overrides {
            datekey::probe(&event.recurrences, &candidate)
        } else {
            None
        };
        let (effective, start, is_override) = match overridden {
            Some(replacement) => (replacement, replacement.start.clone(), true),
            None => (event, candidate, false),
        };

        let end = occurrence_end(event, effective, &start, is_override, base_span);

        let included = if options.expand_ongoing {
            start.instant <= request.to && end.instant >= request.from
        } else {
            request.from <= start.instant && start.instant <= request.to
        };
        if !included {
            continue;
        }

        instances.push(Instance {
            is_full_day: effective.datetype == DateType::Date || start.date_only,
            is_recurring: event.rrule.is_some(),
            is_override,
            summary: &effective.summary,
            event: effective,
            start,
            end,
        });
    }

    instances.sort_by_key(|instance| instance.start.instant);
    instances.truncate(options.max_instances);
    Ok(instances)
}

/// The base occurrence's span, used for query widening and end derivation.
fn base_span(event: &Event) -> ExpandResult<TimeDelta> {
    if let Some(duration) = &event.duration {
        return Ok(duration.to_delta());
    }
    if let Some(end) = &event.end {
        let span = end.instant - event.start.instant;
        if span < TimeDelta::zero() {
            return Err(ExpandError::InvalidEvent {
                uid: event.uid.clone(),
                detail: format!(
                    "end {} precedes start {}",
                    end.instant, event.start.instant
                ),
            });
        }
        return Ok(span);
    }
    if event.start.date_only {
        return Ok(TimeDelta::days(1));
    }
    Ok(TimeDelta::zero())
}

/// Derives an occurrence's end.
///
/// An override's own end wins. Otherwise the base event's duration chain
/// applies to whichever start is in effect: explicit DURATION, then the
/// DTEND−DTSTART span, then a canonical 24 h for whole-day values, then
/// zero.
fn occurrence_end(
    base: &Event,
    effective: &Event,
    start: &Timed,
    is_override: bool,
    base_span: TimeDelta,
) -> Timed {
    if is_override {
        if let Some(end) = &effective.end {
            return end.clone();
        }
    }
    if base.duration.is_some() {
        return start.shift(base_span);
    }
    if let Some(base_end) = &base.end {
        // End metadata follows the event's end value, not its start.
        return base_end.with_instant(start.instant + base_span);
    }
    if start.date_only {
        return start.shift(TimeDelta::hours(24));
    }
    start.clone()
}
