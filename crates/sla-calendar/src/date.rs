//! `Date` — a calendar date stored as a serial day count.
//!
//! Holidays are identified by calendar date alone, so the engine needs
//! a date type with no time-of-day component.  Dates are stored as the
//! number of days since the epoch **January 1, 2000** (serial 0); the
//! supported range is 2000-01-01 through 2199-12-31.  Day-level
//! arithmetic is integer arithmetic on the serial number.

use crate::weekday::Weekday;
use sla_core::errors::{Error, Result};

/// A calendar date (year, month, day), stored as a serial day count.
///
/// Serializes as the bare serial number; deserialization goes through
/// the same range check as [`Date::from_serial`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "i32", into = "i32")
)]
pub struct Date(i32);

impl Date {
    /// Minimum supported date: January 1, 2000 (serial 0).
    pub const MIN: Date = Date(0);

    /// Maximum supported date: December 31, 2199.
    pub const MAX: Date = Date(73_048);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from a serial day count.
    ///
    /// Returns an error if the serial falls outside the supported range.
    pub fn from_serial(serial: i32) -> Result<Self> {
        if serial < Self::MIN.0 || serial > Self::MAX.0 {
            return Err(Error::Date(format!(
                "serial {serial} outside supported range [{}, {}]",
                Self::MIN.0,
                Self::MAX.0
            )));
        }
        Ok(Date(serial))
    }

    /// Create a date from year (2000–2199), month (1–12), and day of month.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(2000..=2199).contains(&year) {
            return Err(Error::Date(format!(
                "year {year} out of range [2000, 2199]"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::Date(format!("month {month} out of range [1, 12]")));
        }
        let last = days_in_month(year, month);
        if day == 0 || day > last {
            return Err(Error::Date(format!(
                "day {day} out of range [1, {last}] for {year}-{month:02}"
            )));
        }
        Ok(Date(serial_from_ymd(year, month, day)))
    }

    pub(crate) fn from_serial_unchecked(serial: i32) -> Self {
        debug_assert!(
            (Self::MIN.0..=Self::MAX.0).contains(&serial),
            "invalid date serial {serial}"
        );
        Date(serial)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial day count (days since 2000-01-01).
    pub const fn serial(self) -> i32 {
        self.0
    }

    /// Return the year (2000–2199).
    pub fn year(self) -> u16 {
        ymd_from_serial(self.0).0
    }

    /// Return the month (1–12).
    pub fn month(self) -> u8 {
        ymd_from_serial(self.0).1
    }

    /// Return the day of the month (1–31).
    pub fn day(self) -> u8 {
        ymd_from_serial(self.0).2
    }

    /// Return the weekday.
    pub fn weekday(self) -> Weekday {
        // 2000-01-01 (serial 0) was a Saturday (ordinal 6).
        let w = ((self.0 + 5).rem_euclid(7) + 1) as u8;
        Weekday::from_ordinal(w).expect("rem_euclid always in 1..=7")
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days.  Returns an error if the result leaves the
    /// supported range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        Self::from_serial(self.0 + n)
    }

    /// Return the number of calendar days from `self` to `other`
    /// (positive when `other` is later).
    pub fn days_until(self, other: Date) -> i32 {
        other.0 - self.0
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Add<i32> for Date {
    type Output = Self;
    fn add(self, rhs: i32) -> Self {
        self.add_days(rhs).expect("date addition out of range")
    }
}

impl std::ops::Sub<i32> for Date {
    type Output = Self;
    fn sub(self, rhs: i32) -> Self {
        self.add_days(-rhs).expect("date subtraction out of range")
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

// ── Serial conversions ────────────────────────────────────────────────────────

impl TryFrom<i32> for Date {
    type Error = Error;

    fn try_from(serial: i32) -> Result<Self> {
        Self::from_serial(serial)
    }
}

impl From<Date> for i32 {
    fn from(date: Date) -> i32 {
        date.0
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = ymd_from_serial(self.0);
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = ymd_from_serial(self.0);
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Whether a given year is a leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!(),
    }
}

/// Cumulative day-of-year offset at the start of each month (non-leap).
const MONTH_OFFSET: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Count of leap days in the years [2000, year).
fn leap_days_before(year: u16) -> i32 {
    let n = year as i32 - 1;
    let f = |n: i32| n / 4 - n / 100 + n / 400;
    f(n) - f(1999)
}

/// Convert (year, month, day) to a serial day count (2000-01-01 = 0).
fn serial_from_ymd(year: u16, month: u8, day: u8) -> i32 {
    let mut serial = (year as i32 - 2000) * 365 + leap_days_before(year);
    serial += MONTH_OFFSET[month as usize - 1] as i32;
    if month > 2 && is_leap_year(year) {
        serial += 1;
    }
    serial + day as i32 - 1
}

/// Decompose a serial day count into (year, month, day).
fn ymd_from_serial(serial: i32) -> (u16, u8, u8) {
    let mut year = (serial / 365 + 2000) as u16;
    loop {
        if serial < serial_from_ymd(year, 1, 1) {
            year -= 1;
        } else if year < 2199 && serial >= serial_from_ymd(year + 1, 1, 1) {
            year += 1;
        } else {
            break;
        }
    }
    let mut remaining = serial - serial_from_ymd(year, 1, 1) + 1; // 1-based day of year
    let mut month = 1u8;
    loop {
        let days = days_in_month(year, month) as i32;
        if remaining <= days {
            break;
        }
        remaining -= days;
        month += 1;
    }
    (year, month, remaining as u8)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
