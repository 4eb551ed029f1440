//! Client-assembled reservation requests, validated before submission.
//!
//! A draft is only ever built from a window the current slot snapshot allows.
//! Slot state can change between fetch and submit, so callers re-check a draft
//! against a fresh snapshot with [`ReservationDraft::revalidate`] right before
//! the write. The backend stays authoritative either way.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bounds;
use crate::config::EngineConfig;
use crate::error::{ReservationError, Result};
use crate::pricing::{DateRange, StayQuote};
use crate::resource::Resource;
use crate::slots::{self, format_time, hhmm, TimeSlot};

/// A slot-window reservation for one resource on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    pub resource_id: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl ReservationDraft {
    /// Build a draft for `start..end`, accepted only if `end` is one of the
    /// end times the slots offer for `start`.
    ///
    /// # Errors
    /// - `InvalidRange` when `end` is not after `start` (00:00 counts as the
    ///   end of the day)
    /// - `SelectionUnavailable` when the window is not a contiguous available run
    pub fn new(
        resource_id: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        slots: &[TimeSlot],
        config: &EngineConfig,
    ) -> Result<Self> {
        let draft = Self {
            resource_id: resource_id.into(),
            date,
            start_time,
            end_time,
        };
        draft.check(slots, config)?;
        Ok(draft)
    }

    /// Re-check the window against a fresh slot snapshot.
    pub fn revalidate(&self, slots: &[TimeSlot], config: &EngineConfig) -> Result<()> {
        self.check(slots, config).inspect_err(|err| {
            warn!(
                resource = %self.resource_id,
                date = %self.date,
                error = %err,
                "draft no longer valid against current slots"
            );
        })
    }

    /// Price this window using the resource's rate.
    pub fn quote(&self, resource: &Resource, quantity: u32, config: &EngineConfig) -> Result<StayQuote> {
        resource.quote_window(self.date, self.start_time, self.end_time, quantity, config)
    }

    fn check(&self, slots: &[TimeSlot], config: &EngineConfig) -> Result<()> {
        if slots::window_length(self.start_time, self.end_time).is_none() {
            return Err(ReservationError::invalid_range(
                format_time(self.start_time),
                format_time(self.end_time),
            ));
        }
        let ends = slots::available_ends_with_min(slots, self.start_time, config.min_slots);
        if !ends.contains(&self.end_time) {
            return Err(ReservationError::unavailable(
                format_time(self.start_time),
                format_time(self.end_time),
            ));
        }
        Ok(())
    }
}

/// A date-range stay with its computed quote attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayDraft {
    pub resource_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub quantity: u32,
    pub quote: StayQuote,
}

impl StayDraft {
    /// Validate the stay against `today` and price it.
    ///
    /// # Errors
    /// - `PastDate` when check-in is before `today`
    /// - `InvalidQuantity` when `quantity` exceeds the resource's limit
    pub fn new(
        resource: &Resource,
        range: DateRange,
        quantity: u32,
        today: NaiveDate,
        config: &EngineConfig,
    ) -> Result<Self> {
        bounds::ensure_bookable(&range, today)?;
        let quote = resource.quote_stay(&range, quantity, config)?;
        Ok(Self {
            resource_id: resource.id.clone(),
            check_in: range.start(),
            check_out: range.end(),
            quantity,
            quote,
        })
    }
}
