//! Slot availability reduction -- turns a day's slot list into selectable times.
//!
//! A day is an ordered, non-overlapping list of [`TimeSlot`]s, each flagged
//! available or not. A reservation may span several adjacent available slots
//! but never crosses an unavailable one (or a gap between slots).

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ReservationError, Result};

/// A fixed time interval with an availability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub available: bool,
}

impl TimeSlot {
    pub fn new(start_time: NaiveTime, end_time: NaiveTime, available: bool) -> Self {
        Self {
            start_time,
            end_time,
            available,
        }
    }
}

/// Parse a wall-clock time in `HH:MM` or `HH:MM:SS` form.
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| ReservationError::InvalidTime(s.to_string()))
}

/// Length of the same-day window `start..end`.
///
/// An `end` of 00:00 after a later `start` closes the day, so `23:30..00:00`
/// lasts thirty minutes. Returns `None` when `end` does not come after `start`.
pub fn window_length(start: NaiveTime, end: NaiveTime) -> Option<Duration> {
    let length = if end == NaiveTime::MIN && start > NaiveTime::MIN {
        Duration::days(1) - (start - NaiveTime::MIN)
    } else {
        end - start
    };
    (length > Duration::zero()).then_some(length)
}

/// Format a wall-clock time as `HH:MM`.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Serde adapter for `HH:MM` times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}

/// Start times of every available slot, in input order.
pub fn available_starts(slots: &[TimeSlot]) -> Vec<NaiveTime> {
    slots
        .iter()
        .filter(|slot| slot.available)
        .map(|slot| slot.start_time)
        .collect()
}

/// End times reachable from `chosen_start` without crossing an unavailable slot.
///
/// Equivalent to [`available_ends_with_min`] with a one-slot minimum: the
/// chosen slot's own end is the first option, so a single-slot reservation is
/// allowed. Callers that need the scan to begin at the slot after the chosen
/// one (the last slot of a run then offers nothing) use
/// `available_ends_with_min(slots, start, 2)`.
///
/// Returns an empty list when `chosen_start` does not begin any slot, or when
/// that slot is itself unavailable.
pub fn available_ends(slots: &[TimeSlot], chosen_start: NaiveTime) -> Vec<NaiveTime> {
    available_ends_with_min(slots, chosen_start, 1)
}

/// End times reachable from `chosen_start`, requiring at least `min_slots`
/// adjacent slots per reservation.
///
/// The run starts at the slot beginning at `chosen_start` and extends forward
/// while slots stay available and adjacent (each slot starts where the
/// previous one ended). Only end times at least `min_slots` slots into the run
/// are offered. A `min_slots` of 0 is treated as 1. A slot ending at 00:00
/// closes the day, so the run never continues past midnight.
pub fn available_ends_with_min(
    slots: &[TimeSlot],
    chosen_start: NaiveTime,
    min_slots: usize,
) -> Vec<NaiveTime> {
    let Some(index) = slots.iter().position(|s| s.start_time == chosen_start) else {
        debug!(start = %format_time(chosen_start), "chosen start not in slot list");
        return Vec::new();
    };

    let run = contiguous_run(&slots[index..]);
    let ends: Vec<NaiveTime> = run
        .iter()
        .skip(min_slots.max(1) - 1)
        .map(|slot| slot.end_time)
        .collect();

    debug!(
        start = %format_time(chosen_start),
        run_len = run.len(),
        ends = ends.len(),
        "derived available end times"
    );
    ends
}

/// End times a reservation that currently ends at `current_end` may be
/// extended to.
///
/// The extension must begin with the slot starting exactly at `current_end`
/// and may not cross an unavailable slot.
pub fn extension_ends(slots: &[TimeSlot], current_end: NaiveTime) -> Vec<NaiveTime> {
    available_ends_with_min(slots, current_end, 1)
}

/// Whether `start..end` is covered by adjacent available slots.
pub fn is_contiguous_window(slots: &[TimeSlot], start: NaiveTime, end: NaiveTime) -> bool {
    window_length(start, end).is_some() && available_ends(slots, start).contains(&end)
}

/// Every maximal run of adjacent available slots, as `(start, end)` pairs.
pub fn available_windows(slots: &[TimeSlot]) -> Vec<(NaiveTime, NaiveTime)> {
    let mut windows = Vec::new();
    let mut rest = slots;

    while let Some(pos) = rest.iter().position(|s| s.available) {
        let run = contiguous_run(&rest[pos..]);
        // `run` is non-empty because `rest[pos]` is available.
        if let (Some(first), Some(last)) = (run.first(), run.last()) {
            windows.push((first.start_time, last.end_time));
        }
        rest = &rest[pos + run.len()..];
    }

    windows
}

/// Longest prefix of `slots` that is available and gap-free.
fn contiguous_run(slots: &[TimeSlot]) -> &[TimeSlot] {
    let mut len = 0;
    for (i, slot) in slots.iter().enumerate() {
        if !slot.available {
            break;
        }
        if i > 0 {
            let prev = &slots[i - 1];
            // A slot ending at midnight is the last of its day.
            if prev.end_time != slot.start_time || slot.start_time <= prev.start_time {
                break;
            }
        }
        len = i + 1;
    }
    &slots[..len]
}
