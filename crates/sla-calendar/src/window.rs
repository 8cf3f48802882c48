//! `WorkWindow` — the daily range of minutes during which business
//! time accrues.
//!
//! The window is half-open: an instant exactly at the end minute is
//! already outside business hours.  Overnight windows (end before
//! start) are not supported.

use sla_core::errors::{Error, Result};

/// A `[start, end)` minute-of-day range, both ends in `[0, 1440)`.
///
/// Deserialization goes through the same validation as
/// [`WorkWindow::new`], so a persisted window is valid by construction
/// too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawWorkWindow")
)]
pub struct WorkWindow {
    start: u16,
    end: u16,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawWorkWindow {
    start: u16,
    end: u16,
}

#[cfg(feature = "serde")]
impl TryFrom<RawWorkWindow> for WorkWindow {
    type Error = Error;

    fn try_from(raw: RawWorkWindow) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl WorkWindow {
    /// Create a window from start/end minutes of day.
    ///
    /// Fails unless `start < end` and both are below 1440.
    pub fn new(start_minute: u16, end_minute: u16) -> Result<Self> {
        if start_minute >= 1440 || end_minute >= 1440 {
            return Err(Error::Config(format!(
                "work window bounds {start_minute}..{end_minute} must lie in [0, 1440)"
            )));
        }
        if start_minute >= end_minute {
            return Err(Error::Config(format!(
                "work window start {start_minute} must precede end {end_minute}"
            )));
        }
        Ok(Self {
            start: start_minute,
            end: end_minute,
        })
    }

    /// Create a window from whole hours, e.g. `from_hours(9, 18)`.
    pub fn from_hours(start_hour: u8, end_hour: u8) -> Result<Self> {
        Self::new(start_hour as u16 * 60, end_hour as u16 * 60)
    }

    /// First minute of day inside the window.
    pub const fn start(self) -> u16 {
        self.start
    }

    /// First minute of day past the window.
    pub const fn end(self) -> u16 {
        self.end
    }

    /// Length of the window in minutes.
    pub const fn minutes_per_day(self) -> u16 {
        self.end - self.start
    }

    /// Return `true` if `minute_of_day` falls inside the window.
    pub const fn contains(self, minute_of_day: u16) -> bool {
        minute_of_day >= self.start && minute_of_day < self.end
    }
}

impl Default for WorkWindow {
    /// 09:00–18:00.
    fn default() -> Self {
        Self {
            start: 9 * 60,
            end: 18 * 60,
        }
    }
}

impl std::fmt::Display for WorkWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}
