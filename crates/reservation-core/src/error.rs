//! Error types for reservation-core operations.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReservationError {
    /// The end of a range is not strictly after its start.
    #[error("Invalid range: end {end} is not after start {start}")]
    InvalidRange { start: String, end: String },

    /// The requested window is not a contiguous run of available slots.
    #[error("Selection unavailable: {start}-{end}")]
    SelectionUnavailable { start: String, end: String },

    #[error("Invalid quantity {quantity}: must be between 1 and {max}")]
    InvalidQuantity { quantity: u32, max: u32 },

    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Negative unit count: {0}")]
    NegativeUnits(i64),

    #[error("Date {date} is in the past (today is {today})")]
    PastDate { date: NaiveDate, today: NaiveDate },

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Amount overflow")]
    Overflow,
}

impl ReservationError {
    pub(crate) fn invalid_range(start: impl ToString, end: impl ToString) -> Self {
        ReservationError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    pub(crate) fn unavailable(start: impl ToString, end: impl ToString) -> Self {
        ReservationError::SelectionUnavailable {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReservationError>;
