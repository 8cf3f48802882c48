//! # sla-engine
//!
//! A business-calendar-aware SLA engine: given a support commitment of
//! N business hours, determine when it is due, how much of it has
//! elapsed, and whether it has been breached — measured against a
//! configurable calendar of work days, a daily work window, and
//! holiday exclusions rather than wall-clock time.
//!
//! ```
//! use sla_engine::{Instant, SlaEngine};
//!
//! let engine = SlaEngine::default(); // Mon–Fri, 09:00–18:00, UTC
//! let start = Instant::from_ymd_hm(2024, 1, 5, 17, 0)?; // Friday 17:00
//! let due = engine.due_instant(start, 3, true)?;
//! // 1h Friday + 2h Monday:
//! assert_eq!(due, Instant::from_ymd_hm(2024, 1, 8, 11, 0)?);
//! # Ok::<(), sla_engine::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// The SLA facade over a shared business calendar.
pub mod engine;

pub use engine::{is_breached, SlaEngine};

pub use sla_calendar::{
    BusinessCalendar, CalendarStats, Date, Instant, Weekday, WeekdaySet, WorkWindow,
    MINUTES_PER_DAY,
};
pub use sla_core::{Error, Result};
