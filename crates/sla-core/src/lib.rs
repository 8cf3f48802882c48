//! # sla-core
//!
//! Foundational pieces shared across the SLA engine workspace: the
//! error taxonomy, the `Result` alias, and the copy-on-write cell that
//! holds the process-wide calendar configuration.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error types and the `Result` alias.
pub mod errors;

/// Read-mostly shared value with atomic snapshot swap.
pub mod shared;

pub use errors::{Error, Result};
pub use shared::Shared;
