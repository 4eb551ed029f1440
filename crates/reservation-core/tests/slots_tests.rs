//! Tests for start/end time derivation from a day's slot list.

use chrono::NaiveTime;
use reservation_core::slots::{format_time, parse_time};
use reservation_core::{
    available_ends, available_ends_with_min, available_starts, available_windows, extension_ends,
    is_contiguous_window, window_length, TimeSlot,
};

/// Helper to build a time from hour and minute.
fn t(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

/// Helper to build an hour-long slot starting at `hour`.
fn hour_slot(hour: u32, available: bool) -> TimeSlot {
    TimeSlot::new(t(hour, 0), t(hour + 1, 0), available)
}

/// 09-10 free, 10-11 free, 11-12 booked, 12-13 free.
fn morning() -> Vec<TimeSlot> {
    vec![
        hour_slot(9, true),
        hour_slot(10, true),
        hour_slot(11, false),
        hour_slot(12, true),
    ]
}

// ── available_starts ────────────────────────────────────────────────────────

#[test]
fn starts_are_available_slots_in_order() {
    assert_eq!(available_starts(&morning()), vec![t(9, 0), t(10, 0), t(12, 0)]);
}

#[test]
fn starts_empty_input() {
    assert!(available_starts(&[]).is_empty());
}

#[test]
fn starts_all_unavailable() {
    let slots = vec![hour_slot(9, false), hour_slot(10, false)];
    assert!(available_starts(&slots).is_empty());
}

// ── available_ends ──────────────────────────────────────────────────────────

#[test]
fn ends_stop_before_unavailable_slot() {
    // 12:00-13:00 is free but not contiguous with 09:00 through 11:00.
    assert_eq!(available_ends(&morning(), t(9, 0)), vec![t(10, 0), t(11, 0)]);
}

#[test]
fn ends_from_middle_of_run() {
    assert_eq!(available_ends(&morning(), t(10, 0)), vec![t(11, 0)]);
}

#[test]
fn ends_for_unknown_start_are_empty() {
    assert!(available_ends(&morning(), t(9, 30)).is_empty());
    assert!(available_ends(&morning(), t(18, 0)).is_empty());
}

#[test]
fn ends_for_unavailable_start_are_empty() {
    assert!(available_ends(&morning(), t(11, 0)).is_empty());
}

#[test]
fn ends_empty_input() {
    assert!(available_ends(&[], t(9, 0)).is_empty());
}

#[test]
fn ends_all_unavailable() {
    let slots = vec![hour_slot(9, false), hour_slot(10, false)];
    assert!(available_ends(&slots, t(9, 0)).is_empty());
}

#[test]
fn ends_for_last_slot_is_its_own_end() {
    assert_eq!(available_ends(&morning(), t(12, 0)), vec![t(13, 0)]);
}

#[test]
fn ends_stop_at_gap_between_slots() {
    // 10:00-11:00 is missing, so 11:00-12:00 is not adjacent to 09:00-10:00.
    let slots = vec![hour_slot(9, true), hour_slot(11, true)];
    assert_eq!(available_ends(&slots, t(9, 0)), vec![t(10, 0)]);
}

#[test]
fn half_hour_grid_spans_many_slots() {
    let slots: Vec<TimeSlot> = (0..6)
        .map(|i| {
            let start = t(8, 0) + chrono::Duration::minutes(30 * i);
            let end = start + chrono::Duration::minutes(30);
            TimeSlot::new(start, end, i != 4)
        })
        .collect();

    assert_eq!(
        available_ends(&slots, t(8, 0)),
        vec![t(8, 30), t(9, 0), t(9, 30), t(10, 0)]
    );
}

// ── available_ends_with_min ─────────────────────────────────────────────────

#[test]
fn two_slot_minimum_skips_chosen_slot_end() {
    assert_eq!(available_ends_with_min(&morning(), t(9, 0), 2), vec![t(11, 0)]);
}

#[test]
fn two_slot_minimum_last_slot_has_no_end() {
    assert!(available_ends_with_min(&morning(), t(12, 0), 2).is_empty());
}

#[test]
fn zero_minimum_behaves_like_one() {
    assert_eq!(
        available_ends_with_min(&morning(), t(9, 0), 0),
        available_ends(&morning(), t(9, 0))
    );
}

#[test]
fn minimum_longer_than_run_is_empty() {
    assert!(available_ends_with_min(&morning(), t(9, 0), 3).is_empty());
}

// ── extension_ends ──────────────────────────────────────────────────────────

#[test]
fn extension_continues_from_current_end() {
    let slots = vec![
        hour_slot(9, false), // the existing reservation
        hour_slot(10, true),
        hour_slot(11, true),
        hour_slot(12, false),
    ];
    assert_eq!(extension_ends(&slots, t(10, 0)), vec![t(11, 0), t(12, 0)]);
}

#[test]
fn extension_blocked_by_next_booking() {
    assert!(extension_ends(&morning(), t(11, 0)).is_empty());
}

#[test]
fn extension_past_end_of_day_is_empty() {
    assert!(extension_ends(&morning(), t(13, 0)).is_empty());
}

// ── is_contiguous_window / available_windows ────────────────────────────────

#[test]
fn contiguous_window_checks() {
    let slots = morning();
    assert!(is_contiguous_window(&slots, t(9, 0), t(11, 0)));
    assert!(is_contiguous_window(&slots, t(12, 0), t(13, 0)));
    assert!(!is_contiguous_window(&slots, t(9, 0), t(13, 0)));
    assert!(!is_contiguous_window(&slots, t(10, 0), t(10, 0)));
    assert!(!is_contiguous_window(&slots, t(11, 0), t(9, 0)));
}

#[test]
fn windows_are_maximal_runs() {
    assert_eq!(
        available_windows(&morning()),
        vec![(t(9, 0), t(11, 0)), (t(12, 0), t(13, 0))]
    );
}

#[test]
fn windows_empty_when_nothing_free() {
    assert!(available_windows(&[hour_slot(9, false)]).is_empty());
    assert!(available_windows(&[]).is_empty());
}

// ── Time parsing and JSON shape ─────────────────────────────────────────────

#[test]
fn parse_time_accepts_both_forms() {
    assert_eq!(parse_time("09:30").unwrap(), t(9, 30));
    assert_eq!(parse_time("09:30:00").unwrap(), t(9, 30));
    assert_eq!(parse_time(" 14:00 ").unwrap(), t(14, 0));
    assert!(parse_time("9h30").is_err());
    assert!(parse_time("25:00").is_err());
}

#[test]
fn format_time_is_hh_mm() {
    assert_eq!(format_time(t(8, 5)), "08:05");
}

#[test]
fn slots_deserialize_from_availability_response() {
    let json = r#"[
        {"startTime":"08:00:00","endTime":"08:30:00","available":true},
        {"startTime":"08:30","endTime":"09:00","available":false}
    ]"#;
    let slots: Vec<TimeSlot> = serde_json::from_str(json).unwrap();

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].start_time, t(8, 0));
    assert!(!slots[1].available);
}

#[test]
fn slots_serialize_as_hh_mm() {
    let json = serde_json::to_string(&hour_slot(9, true)).unwrap();
    assert_eq!(json, r#"{"startTime":"09:00","endTime":"10:00","available":true}"#);
}

#[test]
fn bad_slot_time_is_rejected() {
    let json = r#"[{"startTime":"nine","endTime":"10:00","available":true}]"#;
    assert!(serde_json::from_str::<Vec<TimeSlot>>(json).is_err());
}

// ── windows closing at midnight ─────────────────────────────────────────────

/// 23:00-23:30 free, 23:30-00:00 free.
fn late_evening() -> Vec<TimeSlot> {
    vec![
        TimeSlot::new(t(23, 0), t(23, 30), true),
        TimeSlot::new(t(23, 30), t(0, 0), true),
    ]
}

#[test]
fn midnight_counts_as_end_of_day() {
    assert_eq!(window_length(t(23, 0), t(0, 0)), Some(chrono::Duration::minutes(60)));
    assert_eq!(window_length(t(9, 0), t(10, 30)), Some(chrono::Duration::minutes(90)));
    assert_eq!(window_length(t(10, 0), t(9, 0)), None);
    assert_eq!(window_length(t(0, 0), t(0, 0)), None);
}

#[test]
fn ends_reach_midnight() {
    assert_eq!(available_ends(&late_evening(), t(23, 0)), vec![t(23, 30), t(0, 0)]);
    assert!(is_contiguous_window(&late_evening(), t(23, 0), t(0, 0)));
    assert!(is_contiguous_window(&late_evening(), t(23, 30), t(0, 0)));
    assert_eq!(available_windows(&late_evening()), vec![(t(23, 0), t(0, 0))]);
}

#[test]
fn run_stops_at_midnight() {
    let mut slots = late_evening();
    slots.push(TimeSlot::new(t(0, 0), t(0, 30), true));

    assert_eq!(available_ends(&slots, t(23, 30)), vec![t(0, 0)]);
    assert!(!is_contiguous_window(&slots, t(23, 30), t(0, 30)));
}
