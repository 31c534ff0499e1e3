//! Recurrence expansion: candidate generation, date-key correlation, and
//! the occurrence engine.

pub mod datekey;
mod engine;
mod rrule;
pub mod walltime;

pub use datekey::date_key;
pub use engine::{expand, ExpandOptions, ExpandRequest};
pub use rrule::{Recurrence, RuleError, RuleSetIter};
