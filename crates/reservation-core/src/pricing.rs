//! Elapsed billing units and stay totals.
//!
//! Lodging bills per night between two calendar dates; study spaces bill per
//! hour within one day. Both go through the same rule: the end must be
//! strictly after the start, partial units round up, and the total is
//! `rate x units x quantity` rounded to cents.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{EngineConfig, DEFAULT_MAX_QUANTITY};
use crate::error::{ReservationError, Result};
use crate::money::{Money, Rate};
use crate::slots::window_length;

/// Billing granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateUnit {
    #[default]
    Night,
    Hour,
}

impl RateUnit {
    fn millis(self) -> i64 {
        match self {
            RateUnit::Night => 24 * 60 * 60 * 1000,
            RateUnit::Hour => 60 * 60 * 1000,
        }
    }
}

impl fmt::Display for RateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateUnit::Night => f.write_str("night"),
            RateUnit::Hour => f.write_str("hour"),
        }
    }
}

impl FromStr for RateUnit {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "night" | "nights" | "day" | "days" => Ok(RateUnit::Night),
            "hour" | "hours" => Ok(RateUnit::Hour),
            other => Err(ReservationError::InvalidConfig(format!(
                "unknown rate unit '{}'",
                other
            ))),
        }
    }
}

/// A check-in / check-out pair with `end` strictly after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = ReservationError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end <= start {
            return Err(ReservationError::invalid_range(start, end));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Nights covered by the range.
    pub fn units(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// A derived price quote. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayQuote {
    pub units_elapsed: i64,
    pub rate_unit: RateUnit,
    pub rate_per_unit: Rate,
    pub quantity: u32,
    pub total: Money,
}

/// Whole days between two calendar dates.
///
/// # Errors
/// Returns `ReservationError::InvalidRange` when `end <= start`.
pub fn units_between(start: NaiveDate, end: NaiveDate) -> Result<i64> {
    DateRange::new(start, end).map(|range| range.units())
}

/// Elapsed units between two instants, rounding any partial unit up.
///
/// # Errors
/// Returns `ReservationError::InvalidRange` when `end <= start`.
pub fn units_between_times(start: NaiveDateTime, end: NaiveDateTime, unit: RateUnit) -> Result<i64> {
    if end <= start {
        return Err(ReservationError::invalid_range(start, end));
    }
    let elapsed = (end - start).num_milliseconds();
    let per_unit = unit.millis();
    Ok((elapsed + per_unit - 1) / per_unit)
}

/// `rate x units x quantity`, rounded half away from zero to cents.
///
/// Quantity must be between 1 and [`DEFAULT_MAX_QUANTITY`].
pub fn compute_total(rate: Rate, units: i64, quantity: u32) -> Result<Money> {
    compute_total_with_limit(rate, units, quantity, DEFAULT_MAX_QUANTITY)
}

/// Like [`compute_total`] with an explicit quantity ceiling.
///
/// # Errors
/// - `NegativeUnits` when `units < 0`
/// - `InvalidQuantity` when `quantity` is 0 or above `max_quantity`
/// - `Overflow` when the total does not fit in an `i64` of cents
pub fn compute_total_with_limit(
    rate: Rate,
    units: i64,
    quantity: u32,
    max_quantity: u32,
) -> Result<Money> {
    if units < 0 {
        return Err(ReservationError::NegativeUnits(units));
    }
    if quantity == 0 || quantity > max_quantity {
        return Err(ReservationError::InvalidQuantity {
            quantity,
            max: max_quantity,
        });
    }

    let micros = i128::from(rate.micros())
        .checked_mul(i128::from(units))
        .and_then(|v| v.checked_mul(i128::from(quantity)))
        .ok_or(ReservationError::Overflow)?;

    Money::from_micros_rounded(micros)
}

/// Quote a lodging stay: nights in `range`, per-night `rate`, `quantity` guests.
pub fn quote(range: &DateRange, rate: Rate, quantity: u32, config: &EngineConfig) -> Result<StayQuote> {
    quote_span(
        range.start().and_time(NaiveTime::MIN),
        range.end().and_time(NaiveTime::MIN),
        RateUnit::Night,
        rate,
        quantity,
        config.max_quantity,
    )
}

/// Quote an hourly window on a single date. An `end_time` of 00:00 bills up
/// to midnight at the end of `date`.
pub fn quote_window(
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    rate: Rate,
    quantity: u32,
    config: &EngineConfig,
) -> Result<StayQuote> {
    let (start, end) = window_instants(date, start_time, end_time)?;
    quote_span(
        start,
        end,
        RateUnit::Hour,
        rate,
        quantity,
        config.max_quantity,
    )
}

/// Instants bounding a same-day window, with an end of 00:00 placed at the
/// following midnight. A window that does not move forward keeps its raw end so
/// the unit check reports it.
pub(crate) fn window_instants(
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let start = date.and_time(start_time);
    let end = match window_length(start_time, end_time) {
        Some(length) => start
            .checked_add_signed(length)
            .ok_or(ReservationError::Overflow)?,
        None => date.and_time(end_time),
    };
    Ok((start, end))
}

pub(crate) fn quote_span(
    start: NaiveDateTime,
    end: NaiveDateTime,
    rate_unit: RateUnit,
    rate: Rate,
    quantity: u32,
    max_quantity: u32,
) -> Result<StayQuote> {
    let units_elapsed = units_between_times(start, end, rate_unit)?;
    let total = compute_total_with_limit(rate, units_elapsed, quantity, max_quantity)?;

    debug!(
        %start,
        %end,
        unit = %rate_unit,
        units = units_elapsed,
        quantity,
        %total,
        "computed quote"
    );

    Ok(StayQuote {
        units_elapsed,
        rate_unit,
        rate_per_unit: rate,
        quantity,
        total,
    })
}
