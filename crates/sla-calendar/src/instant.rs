//! `Instant` — a point in time with minute resolution.
//!
//! The engine never needs sub-minute precision: SLA targets are whole
//! hours and work windows are minute-of-day ranges.  An instant is the
//! number of minutes since **2000-01-01 00:00** (the [`Date`] epoch),
//! so `instant.minutes() / 1440` is exactly the date's serial number.
//!
//! Instants carry no timezone of their own; the calendar applies its
//! configured offset before decomposing one into a local date and
//! minute of day.

use crate::date::Date;
use sla_core::errors::{Error, Result};

/// Number of minutes in a calendar day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// A point in time, stored as minutes since 2000-01-01 00:00.
///
/// Serializes as the bare minute count; deserialization goes through
/// the same range check as [`Instant::from_minutes`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "i64", into = "i64")
)]
pub struct Instant(i64);

impl Instant {
    /// The first supported instant: 2000-01-01 00:00.
    pub const MIN: Instant = Instant(0);

    /// The last supported instant: 2199-12-31 23:59.
    pub const MAX: Instant = Instant((Date::MAX.serial() as i64 + 1) * MINUTES_PER_DAY - 1);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create an instant from a minute count since the epoch.
    pub fn from_minutes(minutes: i64) -> Result<Self> {
        if minutes < Self::MIN.0 || minutes > Self::MAX.0 {
            return Err(Error::Date(format!(
                "instant {minutes} outside supported range [{}, {}]",
                Self::MIN.0,
                Self::MAX.0
            )));
        }
        Ok(Instant(minutes))
    }

    /// Create an instant from a date and a minute of day (0–1439).
    pub fn new(date: Date, minute_of_day: u16) -> Result<Self> {
        if minute_of_day as i64 >= MINUTES_PER_DAY {
            return Err(Error::Date(format!(
                "minute of day {minute_of_day} out of range [0, 1440)"
            )));
        }
        Ok(Instant(
            date.serial() as i64 * MINUTES_PER_DAY + minute_of_day as i64,
        ))
    }

    /// Create an instant from calendar components and an hour/minute
    /// time of day.
    pub fn from_ymd_hm(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Result<Self> {
        let date = Date::from_ymd(year, month, day)?;
        if hour >= 24 {
            return Err(Error::Date(format!("hour {hour} out of range [0, 24)")));
        }
        if minute >= 60 {
            return Err(Error::Date(format!("minute {minute} out of range [0, 60)")));
        }
        Self::new(date, hour as u16 * 60 + minute as u16)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the minute count since the epoch.
    pub const fn minutes(self) -> i64 {
        self.0
    }

    /// Return the calendar date this instant falls on.
    pub fn date(self) -> Date {
        Date::from_serial_unchecked((self.0 / MINUTES_PER_DAY) as i32)
    }

    /// Return the minute of day (0–1439).
    pub fn minute_of_day(self) -> u16 {
        (self.0 % MINUTES_PER_DAY) as u16
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Shift by `delta` minutes (negative shifts move backward).
    /// Returns an error if the result leaves the supported range.
    pub fn offset_by(self, delta: i64) -> Result<Self> {
        Self::from_minutes(self.0 + delta)
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Add<i64> for Instant {
    type Output = Self;
    fn add(self, rhs: i64) -> Self {
        self.offset_by(rhs).expect("instant addition out of range")
    }
}

impl std::ops::Sub<i64> for Instant {
    type Output = Self;
    fn sub(self, rhs: i64) -> Self {
        self.offset_by(-rhs).expect("instant subtraction out of range")
    }
}

impl std::ops::Sub<Instant> for Instant {
    type Output = i64;
    fn sub(self, rhs: Instant) -> i64 {
        self.0 - rhs.0
    }
}

// ── Minute conversions ────────────────────────────────────────────────────────

impl TryFrom<i64> for Instant {
    type Error = Error;

    fn try_from(minutes: i64) -> Result<Self> {
        Self::from_minutes(minutes)
    }
}

impl From<Instant> for i64 {
    fn from(instant: Instant) -> i64 {
        instant.0
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = self.minute_of_day();
        write!(f, "{} {:02}:{:02}", self.date(), m / 60, m % 60)
    }
}

impl std::fmt::Debug for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instant({self})")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
