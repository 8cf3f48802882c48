//! Error types for the SLA engine.
//!
//! There are only three failure classes, all synchronous and all
//! reported to the caller — nothing is retried or logged-and-swallowed:
//!
//! * [`Error::Config`] — a mutation would violate a calendar invariant;
//!   the previously valid configuration stays in effect.
//! * [`Error::Range`] — a computation was handed an inverted interval
//!   or a negative duration.  These are programming errors upstream and
//!   fail fast instead of being clamped.
//! * [`Error::Date`] — date/instant arithmetic left the supported range.

use thiserror::Error;

/// The top-level error type used throughout the SLA engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A configuration mutation or construction violated an invariant
    /// (empty work-day set, inverted work window, oversized offset).
    #[error("invalid calendar configuration: {0}")]
    Config(String),

    /// An interval was inverted or a duration negative.
    #[error("invalid range: {0}")]
    Range(String),

    /// Date or instant arithmetic out of the supported range.
    #[error("date error: {0}")]
    Date(String),
}

/// Shorthand `Result` type used throughout the SLA engine.
pub type Result<T, E = Error> = std::result::Result<T, E>;
