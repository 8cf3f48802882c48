//! JSON round-trips of the configuration types (the `serde` feature).
//!
//! Deserialization must run the same validation as the constructors:
//! a persisted configuration can never smuggle in an inverted window,
//! an empty work-day set, or an out-of-range date.

#![cfg(feature = "serde")]

use sla_calendar::{BusinessCalendar, Date, Instant, Weekday, WeekdaySet, WorkWindow};

#[test]
fn calendar_round_trip() {
    let mut cal = BusinessCalendar::new(
        120,
        WeekdaySet::MON_FRI.with(Weekday::Saturday),
        WorkWindow::from_hours(8, 16).unwrap(),
    )
    .unwrap();
    cal.add_holiday(Date::from_ymd(2024, 1, 1).unwrap());
    cal.add_holiday(Date::from_ymd(2024, 12, 25).unwrap());

    let json = serde_json::to_string(&cal).unwrap();
    let back: BusinessCalendar = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cal);
}

#[test]
fn scalar_encodings() {
    let date = Date::from_ymd(2024, 1, 1).unwrap();
    assert_eq!(
        serde_json::to_value(date).unwrap(),
        serde_json::json!(date.serial())
    );

    let instant = Instant::from_ymd_hm(2024, 1, 1, 9, 0).unwrap();
    assert_eq!(
        serde_json::to_value(instant).unwrap(),
        serde_json::json!(instant.minutes())
    );

    assert_eq!(
        serde_json::to_value(Weekday::Monday).unwrap(),
        serde_json::json!("Monday")
    );

    assert_eq!(
        serde_json::to_value(WorkWindow::default()).unwrap(),
        serde_json::json!({"start": 540, "end": 1080})
    );
}

#[test]
fn deserialization_validates() {
    // Inverted window.
    assert!(serde_json::from_str::<WorkWindow>(r#"{"start": 1080, "end": 540}"#).is_err());
    // Date serial before the epoch.
    assert!(serde_json::from_str::<Date>("-1").is_err());
    // Weekday mask with bits beyond the seven days.
    assert!(serde_json::from_str::<WeekdaySet>("255").is_err());

    // Empty work-day set.
    let json = r#"{"work_days": 0, "window": {"start": 540, "end": 1080}}"#;
    assert!(serde_json::from_str::<BusinessCalendar>(json).is_err());

    // Oversized UTC offset.
    let json =
        r#"{"utc_offset_minutes": 900, "work_days": 31, "window": {"start": 540, "end": 1080}}"#;
    assert!(serde_json::from_str::<BusinessCalendar>(json).is_err());

    // Out-of-range holiday serial.
    let json =
        r#"{"work_days": 31, "window": {"start": 540, "end": 1080}, "holidays": [-5]}"#;
    assert!(serde_json::from_str::<BusinessCalendar>(json).is_err());
}

#[test]
fn omitted_calendar_fields_default() {
    let json = r#"{"work_days": 31, "window": {"start": 540, "end": 1080}}"#;
    let cal: BusinessCalendar = serde_json::from_str(json).unwrap();
    assert_eq!(cal.utc_offset_minutes(), 0);
    assert_eq!(cal.holiday_count(), 0);
    assert_eq!(cal.work_days(), WeekdaySet::MON_FRI);
}
