//! `BusinessCalendar` — which instants count as business time, and the
//! day-granular arithmetic built on top of that predicate.
//!
//! The calendar answers three kinds of questions:
//!
//! * **Predicates** — is this date a holiday?  a business day?  is this
//!   instant inside the work window?  All O(1) lookups.
//! * **Walking** — the next business instant at or after a given one,
//!   the business minutes contained in an interval, and the instant
//!   reached after consuming a business-minute budget.  All of these
//!   step one *calendar day* at a time; a year-long span costs a few
//!   hundred iterations, not half a million.
//! * **Statistics** — day classification counts over a date range.
//!
//! All computations are pure with respect to `&self`; a calendar value
//! shared behind an `Arc` can serve any number of threads concurrently.

use std::collections::HashSet;

use crate::date::Date;
use crate::instant::{Instant, MINUTES_PER_DAY};
use crate::weekday::WeekdaySet;
use crate::window::WorkWindow;
use sla_core::errors::{Error, Result};

/// Largest supported UTC offset, in minutes (±14 hours).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// A business calendar: work days, a daily work window, discrete
/// holiday dates, and a fixed UTC offset.
///
/// The offset is applied before extracting the weekday and minute of
/// day, so a calendar configured for UTC+2 opens two hours earlier in
/// caller (UTC) terms.  Daylight-saving transitions are not modeled.
///
/// Holidays are identified by calendar date alone: a holiday excludes
/// the whole day from business time regardless of its weekday.
///
/// Deserialization goes through the same validation as
/// [`BusinessCalendar::new`]; a persisted configuration cannot smuggle
/// in an empty work-day set or an oversized offset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawBusinessCalendar")
)]
pub struct BusinessCalendar {
    utc_offset_minutes: i32,
    work_days: WeekdaySet,
    window: WorkWindow,
    /// Holiday dates, keyed by serial day count.
    holidays: HashSet<i32>,
}

impl Default for BusinessCalendar {
    /// Monday–Friday, 09:00–18:00, UTC, no holidays.
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            work_days: WeekdaySet::MON_FRI,
            window: WorkWindow::default(),
            holidays: HashSet::new(),
        }
    }
}

impl BusinessCalendar {
    // ── Construction & mutation ───────────────────────────────────────────────

    /// Create a calendar with no holidays.
    ///
    /// Fails if `work_days` is empty or the offset exceeds ±14 hours.
    pub fn new(utc_offset_minutes: i32, work_days: WeekdaySet, window: WorkWindow) -> Result<Self> {
        let mut calendar = Self {
            utc_offset_minutes: 0,
            work_days: WeekdaySet::MON_FRI,
            window,
            holidays: HashSet::new(),
        };
        calendar.set_utc_offset_minutes(utc_offset_minutes)?;
        calendar.set_work_days(work_days)?;
        Ok(calendar)
    }

    /// Replace the daily work window.
    pub fn set_work_window(&mut self, window: WorkWindow) {
        self.window = window;
    }

    /// Replace the set of work days.  Fails if the set is empty: a
    /// calendar with no working days cannot produce a finite due date.
    pub fn set_work_days(&mut self, work_days: WeekdaySet) -> Result<()> {
        if work_days.is_empty() {
            return Err(Error::Config("work days must not be empty".into()));
        }
        self.work_days = work_days;
        Ok(())
    }

    /// Replace the UTC offset.  Fails if the offset exceeds ±14 hours.
    pub fn set_utc_offset_minutes(&mut self, offset: i32) -> Result<()> {
        if offset.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(Error::Config(format!(
                "UTC offset {offset} minutes exceeds ±{MAX_UTC_OFFSET_MINUTES}"
            )));
        }
        self.utc_offset_minutes = offset;
        Ok(())
    }

    /// Mark `date` as a holiday.  Adding the same date twice is a no-op.
    pub fn add_holiday(&mut self, date: Date) {
        self.holidays.insert(date.serial());
    }

    /// Remove a previously added holiday.
    pub fn remove_holiday(&mut self, date: Date) {
        self.holidays.remove(&date.serial());
    }

    /// Return the holidays falling in `year`, in date order.
    pub fn holidays_in_year(&self, year: u16) -> Vec<Date> {
        let mut dates: Vec<Date> = self
            .holidays
            .iter()
            .map(|&serial| Date::from_serial_unchecked(serial))
            .filter(|d| d.year() == year)
            .collect();
        dates.sort();
        dates
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// The configured UTC offset in minutes.
    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    /// The configured work days.
    pub fn work_days(&self) -> WeekdaySet {
        self.work_days
    }

    /// The configured daily work window.
    pub fn window(&self) -> WorkWindow {
        self.window
    }

    /// Number of registered holidays.
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }

    // ── Predicates ────────────────────────────────────────────────────────────

    /// Return `true` if `date` is a registered holiday.
    pub fn is_holiday(&self, date: Date) -> bool {
        self.holidays.contains(&date.serial())
    }

    /// Return `true` if `date` carries business hours: not a holiday
    /// (checked first — a holiday wins over its weekday) and a weekday
    /// in the configured work-day set.
    pub fn is_business_day(&self, date: Date) -> bool {
        !self.is_holiday(date) && self.work_days.contains(date.weekday())
    }

    /// Return `true` if `instant` falls on a business day inside the
    /// work window.  The window is half-open: an instant exactly at
    /// closing time is already outside business hours.
    pub fn is_business_instant(&self, instant: Instant) -> bool {
        let local = self.to_local(instant);
        let day = local.div_euclid(MINUTES_PER_DAY);
        match local_date(day) {
            Ok(date) => {
                self.is_business_day(date)
                    && self.window.contains((local - day * MINUTES_PER_DAY) as u16)
            }
            Err(_) => false,
        }
    }

    // ── Day-granular walking ──────────────────────────────────────────────────

    /// Return the first business instant at or after `from`.
    ///
    /// A business instant is returned unchanged.  On a business day
    /// before opening, the result snaps forward to the window start;
    /// otherwise the walk advances one calendar day at a time to the
    /// next qualifying day's window start.
    pub fn next_business_instant(&self, from: Instant) -> Result<Instant> {
        let local = self.next_business_local(self.to_local(from))?;
        self.from_local(local)
    }

    /// Count the business minutes contained in `[a, b)`.
    ///
    /// Fails with a range error if `a > b`.  Runs in O(calendar days
    /// between `a` and `b`): each day contributes the length of the
    /// intersection between its work window and `[a, b)`.
    pub fn business_minutes_between(&self, a: Instant, b: Instant) -> Result<i64> {
        if a > b {
            return Err(Error::Range(format!(
                "interval end {b} precedes start {a}"
            )));
        }
        let la = self.to_local(a);
        let lb = self.to_local(b);
        let mut total = 0i64;
        for day in la.div_euclid(MINUTES_PER_DAY)..=lb.div_euclid(MINUTES_PER_DAY) {
            let date = local_date(day)?;
            if !self.is_business_day(date) {
                continue;
            }
            let open = day * MINUTES_PER_DAY + self.window.start() as i64;
            let close = day * MINUTES_PER_DAY + self.window.end() as i64;
            let lo = open.max(la);
            let hi = close.min(lb);
            if hi > lo {
                total += hi - lo;
            }
        }
        Ok(total)
    }

    /// Return the instant reached after `minutes` business minutes have
    /// elapsed, starting from the first business instant at or after
    /// `from`.
    ///
    /// Fails with a range error if `minutes` is negative.  Consumes
    /// whole window remainders one day at a time, so the cost is
    /// O(calendar days spanned by the result), never O(minutes).  A
    /// budget that exactly exhausts a day's window lands on the next
    /// qualifying day's window start (the closing minute itself is not
    /// business time).
    pub fn add_business_minutes(&self, from: Instant, minutes: i64) -> Result<Instant> {
        if minutes < 0 {
            return Err(Error::Range(format!(
                "cannot add {minutes} business minutes"
            )));
        }
        let mut cursor = self.next_business_local(self.to_local(from))?;
        let mut remaining = minutes;
        loop {
            let minute_of_day = cursor.rem_euclid(MINUTES_PER_DAY);
            let window_left = self.window.end() as i64 - minute_of_day;
            if remaining < window_left {
                return self.from_local(cursor + remaining);
            }
            remaining -= window_left;
            let next_midnight = (cursor.div_euclid(MINUTES_PER_DAY) + 1) * MINUTES_PER_DAY;
            cursor = self.next_business_local(next_midnight)?;
        }
    }

    // ── Statistics ────────────────────────────────────────────────────────────

    /// Classify every day in `start..=end`.
    ///
    /// A holiday counts as a holiday even when its weekday is a work
    /// day; only the remaining work-weekday dates count as business
    /// days.  Fails with a range error if `start > end`.
    pub fn stats(&self, start: Date, end: Date) -> Result<CalendarStats> {
        if start > end {
            return Err(Error::Range(format!("end date {end} precedes {start}")));
        }
        let mut stats = CalendarStats {
            total_days: (end - start + 1) as u32,
            ..CalendarStats::default()
        };
        for serial in start.serial()..=end.serial() {
            let date = Date::from_serial_unchecked(serial);
            if self.is_holiday(date) {
                stats.holidays += 1;
            } else if self.work_days.contains(date.weekday()) {
                stats.business_days += 1;
            } else {
                stats.weekend_days += 1;
            }
        }
        stats.total_business_hours =
            stats.business_days as f64 * self.window.minutes_per_day() as f64 / 60.0;
        Ok(stats)
    }

    // ── Local-frame helpers ───────────────────────────────────────────────────

    /// Walk in local minutes: first business minute at or after `local`.
    fn next_business_local(&self, mut local: i64) -> Result<i64> {
        loop {
            let day = local.div_euclid(MINUTES_PER_DAY);
            let date = local_date(day)?;
            if self.is_business_day(date) {
                let minute_of_day = local - day * MINUTES_PER_DAY;
                if minute_of_day < self.window.start() as i64 {
                    return Ok(day * MINUTES_PER_DAY + self.window.start() as i64);
                }
                if minute_of_day < self.window.end() as i64 {
                    return Ok(local);
                }
            }
            local = (day + 1) * MINUTES_PER_DAY;
        }
    }

    fn to_local(&self, instant: Instant) -> i64 {
        instant.minutes() + self.utc_offset_minutes as i64
    }

    fn from_local(&self, local: i64) -> Result<Instant> {
        Instant::from_minutes(local - self.utc_offset_minutes as i64)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBusinessCalendar {
    #[serde(default)]
    utc_offset_minutes: i32,
    work_days: WeekdaySet,
    window: WorkWindow,
    #[serde(default)]
    holidays: HashSet<i32>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBusinessCalendar> for BusinessCalendar {
    type Error = Error;

    fn try_from(raw: RawBusinessCalendar) -> Result<Self> {
        let mut calendar = Self::new(raw.utc_offset_minutes, raw.work_days, raw.window)?;
        for serial in raw.holidays {
            calendar.add_holiday(Date::from_serial(serial)?);
        }
        Ok(calendar)
    }
}

/// Date of a local-frame day index, failing outside the supported range.
fn local_date(day: i64) -> Result<Date> {
    let serial = i32::try_from(day)
        .map_err(|_| Error::Date(format!("day index {day} outside supported range")))?;
    Date::from_serial(serial)
}

/// Day classification counts over an inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarStats {
    /// Days in the range.
    pub total_days: u32,
    /// Days carrying business hours.
    pub business_days: u32,
    /// Days whose weekday is not a configured work day (and that are
    /// not holidays).
    pub weekend_days: u32,
    /// Holiday dates, counted with precedence over weekday membership.
    pub holidays: u32,
    /// `business_days` × window length, in hours.
    pub total_business_hours: f64,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
