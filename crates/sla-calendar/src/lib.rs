//! # sla-calendar
//!
//! Date, instant, and business-calendar arithmetic: which moments count
//! as business time, and day-granular walking across work windows,
//! weekends, and holidays.
//!
//! With the `serde` feature enabled, the configuration types derive
//! `Serialize`/`Deserialize`; deserialization runs the same validation
//! as the constructors.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `BusinessCalendar` — predicates, day-granular walking, statistics.
pub mod calendar;

/// `Date` — calendar date as a serial day count.
pub mod date;

/// `Instant` — minute-resolution point in time.
pub mod instant;

/// `Weekday` and `WeekdaySet`.
pub mod weekday;

/// `WorkWindow` — the daily business-hours range.
pub mod window;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calendar::{BusinessCalendar, CalendarStats, MAX_UTC_OFFSET_MINUTES};
pub use date::Date;
pub use instant::{Instant, MINUTES_PER_DAY};
pub use weekday::{Weekday, WeekdaySet};
pub use window::WorkWindow;
