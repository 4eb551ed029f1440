//! Engine configuration: quantity limits, slot minimums, and the local timezone.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ReservationError, Result};

/// Guests (or seats) allowed on a single reservation unless configured otherwise.
pub const DEFAULT_MAX_QUANTITY: u32 = 10;

/// Tunables shared by every reservation front end.
///
/// All fields are optional in JSON; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on the quantity (guests) for a single reservation.
    pub max_quantity: u32,
    /// Minimum number of adjacent slots a slot-based reservation must cover.
    pub min_slots: usize,
    /// IANA timezone used to decide what "today" is for past-date checks.
    pub timezone: String,
    /// Pages shown on each side of the current page in listing pagination.
    pub page_neighbors: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_quantity: DEFAULT_MAX_QUANTITY,
            min_slots: 1,
            timezone: "UTC".to_string(),
            page_neighbors: 1,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| ReservationError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ReservationError::InvalidConfig(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_quantity == 0 {
            return Err(ReservationError::InvalidConfig(
                "max_quantity must be at least 1".to_string(),
            ));
        }
        if self.min_slots == 0 {
            return Err(ReservationError::InvalidConfig(
                "min_slots must be at least 1".to_string(),
            ));
        }
        self.tz()?;
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| ReservationError::InvalidTimezone(self.timezone.clone()))
    }

    /// The calendar date at `now` in the configured timezone.
    pub fn today(&self, now: DateTime<Utc>) -> Result<NaiveDate> {
        Ok(now.with_timezone(&self.tz()?).date_naive())
    }
}
