//! The occurrence record produced by expansion.

use crate::core::{Event, Timed};

/// One concrete occurrence of an event inside a requested window.
///
/// Instances borrow the event they were expanded from; the engine never
/// clones event records.
#[derive(Debug)]
pub struct Instance<'e> {
    /// Start of this occurrence, metadata inherited from the effective
    /// event's start.
    pub start: Timed,
    /// End of this occurrence. Always at or after `start`.
    pub end: Timed,
    /// Summary of the effective event (the override's, when one applied).
    pub summary: &'e str,
    /// Whether this occurrence denotes a whole calendar day.
    pub is_full_day: bool,
    /// Whether the source event carried a recurrence rule.
    pub is_recurring: bool,
    /// Whether a RECURRENCE-ID override replaced the base occurrence.
    pub is_override: bool,
    /// The effective event: the base event, or the override that replaced
    /// this occurrence.
    pub event: &'e Event,
}
