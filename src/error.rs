//! Engine-level errors.
//!
//! Only caller mistakes surface as errors. Unresolvable zones degrade to
//! UTC with a warning ([`crate::zone::ZoneId::Unresolved`]), and malformed
//! wall-time text is simply "no instant" at the parsing layer.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for expansion operations.
pub type ExpandResult<T> = std::result::Result<T, ExpandError>;

/// Error from [`crate::expand::expand`].
#[derive(Debug, Error)]
pub enum ExpandError {
    /// The request window is inverted.
    #[error("expansion window is inverted: {from} is after {to}")]
    WindowOutOfOrder {
        /// Requested window start.
        from: DateTime<Utc>,
        /// Requested window end.
        to: DateTime<Utc>,
    },

    /// The event record is internally inconsistent.
    #[error("event {uid} is malformed: {detail}")]
    InvalidEvent {
        /// UID of the offending event.
        uid: String,
        /// What was wrong with it.
        detail: String,
    },
}
