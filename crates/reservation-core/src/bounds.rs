//! Calendar bounds applied before a reservation is drafted.

use chrono::NaiveDate;

use crate::error::{ReservationError, Result};
use crate::pricing::DateRange;

/// Reject dates before `today`. Today itself is bookable.
pub fn ensure_not_past(date: NaiveDate, today: NaiveDate) -> Result<()> {
    if date < today {
        return Err(ReservationError::PastDate { date, today });
    }
    Ok(())
}

/// A stay is bookable when it starts today or later. `DateRange` already
/// guarantees the end is after the start.
pub fn ensure_bookable(range: &DateRange, today: NaiveDate) -> Result<()> {
    ensure_not_past(range.start(), today)
}
