//! `SlaEngine` — the facade tying calendar arithmetic to service-level
//! commitments.
//!
//! The engine owns the process-wide [`BusinessCalendar`] behind a
//! copy-on-write cell: every computation reads one consistent snapshot,
//! and mutations install a fully validated replacement atomically.  The
//! engine knows nothing about tickets or persistence — callers hand it
//! instants and get back due instants, minute counts, booleans, and
//! percentages.

use std::sync::Arc;

use sla_calendar::{BusinessCalendar, CalendarStats, Date, Instant, WeekdaySet, WorkWindow};
use sla_core::errors::Result;
use sla_core::shared::Shared;

/// Return `true` if `now` has passed the due instant.
///
/// Exactly at `due` the commitment is not yet breached.
pub fn is_breached(due: Instant, now: Instant) -> bool {
    now > due
}

/// SLA calculator over a shared, mutable business calendar.
#[derive(Debug, Default)]
pub struct SlaEngine {
    config: Shared<BusinessCalendar>,
}

impl SlaEngine {
    /// Create an engine over `calendar`.
    pub fn new(calendar: BusinessCalendar) -> Self {
        Self {
            config: Shared::new(calendar),
        }
    }

    /// Return the current calendar snapshot.
    ///
    /// The snapshot is immutable; later mutations produce new snapshots
    /// without disturbing computations already under way on this one.
    pub fn calendar(&self) -> Arc<BusinessCalendar> {
        self.config.snapshot()
    }

    // ── Computation ───────────────────────────────────────────────────────────

    /// Compute the due instant for a commitment of `sla_hours` starting
    /// at `start`.
    ///
    /// With `use_business_calendar` the hours are business hours walked
    /// across the calendar; without it they are literal wall-clock
    /// hours and weekends/holidays are irrelevant.
    pub fn due_instant(
        &self,
        start: Instant,
        sla_hours: u32,
        use_business_calendar: bool,
    ) -> Result<Instant> {
        let minutes = sla_hours as i64 * 60;
        if use_business_calendar {
            self.config.snapshot().add_business_minutes(start, minutes)
        } else {
            start.offset_by(minutes)
        }
    }

    /// See [`is_breached`].
    pub fn is_breached(&self, due: Instant, now: Instant) -> bool {
        is_breached(due, now)
    }

    /// Business minutes still available before `due`; zero once `now`
    /// has reached it.
    pub fn remaining_business_minutes(&self, due: Instant, now: Instant) -> Result<i64> {
        if now >= due {
            return Ok(0);
        }
        self.config.snapshot().business_minutes_between(now, due)
    }

    /// Fraction of the commitment's business time elapsed at `now`, as
    /// a percentage clamped to `[0, 100]`.
    ///
    /// A commitment with no business time between `start` and `due`
    /// reads as fully elapsed (100): an instant deadline is complete,
    /// and the division by zero never happens.
    pub fn progress_percent(&self, start: Instant, due: Instant, now: Instant) -> Result<f64> {
        let calendar = self.config.snapshot();
        let total = calendar.business_minutes_between(start, due)?;
        if total == 0 {
            return Ok(100.0);
        }
        let upper = now.min(due);
        let elapsed = if upper <= start {
            0
        } else {
            calendar.business_minutes_between(start, upper)?
        };
        Ok((elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0))
    }

    /// Day classification counts between two dates, inclusive.
    pub fn calendar_stats(&self, start: Date, end: Date) -> Result<CalendarStats> {
        self.config.snapshot().stats(start, end)
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    /// Replace the entire calendar configuration.
    ///
    /// Useful when a whole configuration arrives at once, e.g. loaded
    /// from persistent storage.  `BusinessCalendar` values are valid by
    /// construction, so the swap cannot fail.
    pub fn set_calendar(&self, calendar: BusinessCalendar) {
        self.config.store(calendar);
    }

    /// Replace the daily work window.
    ///
    /// `WorkWindow` values are valid by construction, so the swap
    /// cannot fail.
    pub fn set_work_window(&self, window: WorkWindow) {
        self.config.update(|calendar| {
            let mut next = calendar.clone();
            next.set_work_window(window);
            next
        });
    }

    /// Replace the set of work days.  An empty set is rejected and the
    /// prior configuration stays in effect.
    pub fn set_work_days(&self, work_days: WeekdaySet) -> Result<()> {
        self.config.try_update(|calendar| {
            let mut next = calendar.clone();
            next.set_work_days(work_days)?;
            Ok(next)
        })
    }

    /// Replace the UTC offset.  Offsets beyond ±14 hours are rejected
    /// and the prior configuration stays in effect.
    pub fn set_utc_offset_minutes(&self, offset: i32) -> Result<()> {
        self.config.try_update(|calendar| {
            let mut next = calendar.clone();
            next.set_utc_offset_minutes(offset)?;
            Ok(next)
        })
    }

    /// Mark `date` as a holiday.  Idempotent.
    pub fn add_holiday(&self, date: Date) {
        self.config.update(|calendar| {
            let mut next = calendar.clone();
            next.add_holiday(date);
            next
        });
    }

    /// Remove a holiday by calendar date.
    pub fn remove_holiday(&self, date: Date) {
        self.config.update(|calendar| {
            let mut next = calendar.clone();
            next.remove_holiday(date);
            next
        });
    }

    /// Return the holidays falling in `year`, in date order.
    pub fn holidays_in_year(&self, year: u16) -> Vec<Date> {
        self.config.snapshot().holidays_in_year(year)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn at(y: u16, m: u8, d: u8, hour: u8, minute: u8) -> Instant {
        Instant::from_ymd_hm(y, m, d, hour, minute).unwrap()
    }

    #[test]
    fn snapshot_isolation() {
        let engine = SlaEngine::default();
        let before = engine.calendar();

        engine.add_holiday(date(2024, 1, 2));
        assert!(!before.is_holiday(date(2024, 1, 2)));
        assert!(engine.calendar().is_holiday(date(2024, 1, 2)));
    }

    #[test]
    fn rejected_mutation_is_atomic() {
        let engine = SlaEngine::default();
        assert!(engine.set_work_days(WeekdaySet::EMPTY).is_err());
        assert_eq!(engine.calendar().work_days(), WeekdaySet::MON_FRI);

        assert!(engine.set_utc_offset_minutes(15 * 60).is_err());
        assert_eq!(engine.calendar().utc_offset_minutes(), 0);
    }

    #[test]
    fn holiday_mutation_roundtrip() {
        let engine = SlaEngine::default();
        engine.add_holiday(date(2024, 12, 25));
        engine.add_holiday(date(2024, 12, 25)); // no duplicate
        engine.add_holiday(date(2024, 1, 1));

        assert_eq!(
            engine.holidays_in_year(2024),
            vec![date(2024, 1, 1), date(2024, 12, 25)]
        );
        engine.remove_holiday(date(2024, 1, 1));
        assert_eq!(engine.holidays_in_year(2024), vec![date(2024, 12, 25)]);
    }

    #[test]
    fn full_calendar_replacement() {
        use sla_calendar::Weekday;

        let engine = SlaEngine::default();
        let before = engine.calendar();

        let weekend_desk = BusinessCalendar::new(
            60,
            WeekdaySet::from_days(&[Weekday::Saturday, Weekday::Sunday]),
            WorkWindow::from_hours(10, 14).unwrap(),
        )
        .unwrap();
        engine.set_calendar(weekend_desk.clone());

        assert_eq!(*engine.calendar(), weekend_desk);
        // The pre-replacement snapshot is untouched.
        assert_eq!(before.work_days(), WeekdaySet::MON_FRI);
        // Saturday is now a business day, Monday no longer is.
        assert!(engine.calendar().is_business_day(date(2024, 1, 6)));
        assert!(!engine.calendar().is_business_day(date(2024, 1, 8)));
    }

    #[test]
    fn work_window_mutation_applies() {
        let engine = SlaEngine::default();
        engine.set_work_window(WorkWindow::from_hours(8, 16).unwrap());
        // Monday 08:30 is now inside the window.
        assert!(engine.calendar().is_business_instant(at(2024, 1, 1, 8, 30)));
        assert!(!engine.calendar().is_business_instant(at(2024, 1, 1, 17, 0)));
    }

    #[test]
    fn remaining_minutes_floor_at_zero() {
        let engine = SlaEngine::default();
        let due = at(2024, 1, 1, 14, 0);
        assert_eq!(engine.remaining_business_minutes(due, due).unwrap(), 0);
        assert_eq!(
            engine
                .remaining_business_minutes(due, at(2024, 1, 1, 15, 0))
                .unwrap(),
            0
        );
        assert_eq!(
            engine
                .remaining_business_minutes(due, at(2024, 1, 1, 12, 0))
                .unwrap(),
            120
        );
    }
}
