//! Time-window expansion of iCalendar events (RFC 5545).
//!
//! Given one parsed VEVENT (start/end, an optional RRULE, EXDATE
//! exclusions, RECURRENCE-ID overrides), [`expand`] produces the concrete
//! occurrences inside a requested window, handling the parts calendars
//! get wrong: Windows and fixed-offset TZIDs, DST gaps and folds, moved
//! instances, and whole-day events whose local midnight straddles the UTC
//! day boundary.
//!
//! - `zone`: TZID normalization (IANA / Windows labels / offsets)
//! - `core`: the event, instance, and metadata-carrying instant types
//! - `expand`: wall-time conversion, date keys, rule iteration, the engine
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use ical_expand::{expand, Event, ExpandRequest, RuleSetIter, Timed};
//!
//! let start = Timed::utc(Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap());
//! let rule = RuleSetIter::new("FREQ=DAILY", &start).unwrap();
//! let event = Event::new("uid-1", "Standup", start).with_rrule(rule);
//!
//! let request = ExpandRequest::new(
//!     Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2025, 1, 7, 23, 0, 0).unwrap(),
//! );
//! let instances = expand(&event, &request).unwrap();
//! assert_eq!(instances.len(), 7);
//! assert!(instances.iter().all(|i| i.is_recurring));
//! ```

pub mod core;
pub mod error;
pub mod expand;
pub mod zone;

pub use crate::core::{DateType, Duration, Event, Instance, Timed};
pub use crate::error::{ExpandError, ExpandResult};
pub use crate::expand::{date_key, expand, ExpandOptions, ExpandRequest, Recurrence, RuleSetIter};
pub use crate::zone::{resolve, ZoneId, ZoneResolver};
