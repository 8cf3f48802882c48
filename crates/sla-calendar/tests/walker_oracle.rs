//! Cross-checks of the day-granular walker against a minute-stepping
//! reference implementation.
//!
//! The reference walks one minute at a time and is only viable over
//! short spans; the production walker must agree with it exactly,
//! including at window boundaries, where day-granular arithmetic is
//! easiest to get wrong by one minute.

use proptest::prelude::*;
use sla_calendar::{BusinessCalendar, Date, Instant, Weekday, WeekdaySet, WorkWindow};

// ── Minute-stepping reference ─────────────────────────────────────────────────

fn oracle_next_business_instant(cal: &BusinessCalendar, from: Instant) -> Instant {
    let mut cursor = from;
    while !cal.is_business_instant(cursor) {
        cursor = cursor + 1;
    }
    cursor
}

fn oracle_add_business_minutes(cal: &BusinessCalendar, from: Instant, minutes: i64) -> Instant {
    let mut cursor = oracle_next_business_instant(cal, from);
    let mut remaining = minutes;
    while remaining > 0 {
        cursor = cursor + 1;
        if cal.is_business_instant(cursor) {
            remaining -= 1;
        }
    }
    cursor
}

fn oracle_business_minutes_between(cal: &BusinessCalendar, a: Instant, b: Instant) -> i64 {
    let mut total = 0;
    let mut cursor = a;
    while cursor < b {
        if cal.is_business_instant(cursor) {
            total += 1;
        }
        cursor = cursor + 1;
    }
    total
}

// ── Strategies ────────────────────────────────────────────────────────────────

fn base_minutes() -> i64 {
    Date::from_ymd(2024, 1, 1).unwrap().serial() as i64 * 1440
}

fn arb_calendar() -> impl Strategy<Value = BusinessCalendar> {
    (
        1u8..128,                                  // non-empty work-day mask
        (0u16..960, 120u16..480),                  // window start and length
        -840i32..=840,                             // UTC offset
        proptest::collection::vec(0i32..70, 0..6), // holiday offsets from the base date
    )
        .prop_map(|(mask, (start, len), offset, holidays)| {
            let days: Vec<Weekday> = (1u8..=7)
                .filter(|n| mask & (1 << (n - 1)) != 0)
                .filter_map(Weekday::from_ordinal)
                .collect();
            let window = WorkWindow::new(start, start + len).unwrap();
            let mut cal =
                BusinessCalendar::new(offset, WeekdaySet::from_days(&days), window).unwrap();
            let base = Date::from_ymd(2024, 1, 1).unwrap();
            for off in holidays {
                cal.add_holiday(base + off);
            }
            cal
        })
}

fn arb_instant() -> impl Strategy<Value = Instant> {
    (0i64..60, 0i64..1440)
        .prop_map(|(day, minute)| Instant::from_minutes(base_minutes() + day * 1440 + minute).unwrap())
}

// ── Properties ────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn next_business_instant_matches_oracle(cal in arb_calendar(), from in arb_instant()) {
        prop_assert_eq!(
            cal.next_business_instant(from).unwrap(),
            oracle_next_business_instant(&cal, from)
        );
    }

    #[test]
    fn add_business_minutes_matches_oracle(
        cal in arb_calendar(),
        from in arb_instant(),
        minutes in 0i64..1200,
    ) {
        prop_assert_eq!(
            cal.add_business_minutes(from, minutes).unwrap(),
            oracle_add_business_minutes(&cal, from, minutes)
        );
    }

    #[test]
    fn business_minutes_between_matches_oracle(
        cal in arb_calendar(),
        a in arb_instant(),
        span in 0i64..10 * 1440,
    ) {
        let b = a + span;
        prop_assert_eq!(
            cal.business_minutes_between(a, b).unwrap(),
            oracle_business_minutes_between(&cal, a, b)
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // The walker is O(days), so large budgets stay cheap here: measuring
    // the span that `add_business_minutes` produced recovers the budget
    // exactly, starting from the effective (snapped) start.
    #[test]
    fn round_trip(cal in arb_calendar(), start in arb_instant(), minutes in 0i64..100_000) {
        let due = cal.add_business_minutes(start, minutes).unwrap();
        let effective_start = cal.next_business_instant(start).unwrap();
        prop_assert_eq!(
            cal.business_minutes_between(effective_start, due).unwrap(),
            minutes
        );
    }

    #[test]
    fn between_is_additive(cal in arb_calendar(), a in arb_instant(), s1 in 0i64..5000, s2 in 0i64..5000) {
        let m = a + s1;
        let b = m + s2;
        let whole = cal.business_minutes_between(a, b).unwrap();
        let left = cal.business_minutes_between(a, m).unwrap();
        let right = cal.business_minutes_between(m, b).unwrap();
        prop_assert_eq!(whole, left + right);
    }

    #[test]
    fn next_is_idempotent_and_business(cal in arb_calendar(), from in arb_instant()) {
        let next = cal.next_business_instant(from).unwrap();
        prop_assert!(next >= from);
        prop_assert!(cal.is_business_instant(next));
        prop_assert_eq!(cal.next_business_instant(next).unwrap(), next);
    }
}

// ── Fixed boundary cases ──────────────────────────────────────────────────────

#[test]
fn boundary_minutes_around_the_window() {
    let cal = BusinessCalendar::default(); // Mon–Fri 09:00–18:00
    let monday = Date::from_ymd(2024, 1, 1).unwrap();

    for minute in [538, 539, 540, 541, 1078, 1079, 1080, 1081] {
        let from = Instant::new(monday, minute).unwrap();
        assert_eq!(
            cal.next_business_instant(from).unwrap(),
            oracle_next_business_instant(&cal, from),
            "next mismatch at minute {minute}"
        );
        for budget in [0, 1, 539, 540, 541] {
            assert_eq!(
                cal.add_business_minutes(from, budget).unwrap(),
                oracle_add_business_minutes(&cal, from, budget),
                "add mismatch at minute {minute} budget {budget}"
            );
        }
    }
}

#[test]
fn holiday_week_against_oracle() {
    let mut cal = BusinessCalendar::default();
    // Tuesday and Wednesday holidays in the first week of 2024.
    cal.add_holiday(Date::from_ymd(2024, 1, 2).unwrap());
    cal.add_holiday(Date::from_ymd(2024, 1, 3).unwrap());

    let start = Instant::from_ymd_hm(2024, 1, 1, 12, 0).unwrap();
    for budget in [60, 360, 540, 1080, 2700] {
        assert_eq!(
            cal.add_business_minutes(start, budget).unwrap(),
            oracle_add_business_minutes(&cal, start, budget),
            "budget {budget}"
        );
    }
    let end = Instant::from_ymd_hm(2024, 1, 8, 12, 0).unwrap();
    assert_eq!(
        cal.business_minutes_between(start, end).unwrap(),
        oracle_business_minutes_between(&cal, start, end)
    );
}
