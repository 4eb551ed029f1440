//! Reservable resources -- lodging and study spaces under one model.
//!
//! The kind decides only the billing unit and how a request is shaped (a
//! date range for lodging, a slot window for spaces). Everything kind-specific
//! beyond that lives in the open `attributes` map (amenities, noise level,
//! equipment, star rating).

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::money::Rate;
use crate::pricing::{self, DateRange, RateUnit, StayQuote};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Lodging,
    StudySpace,
}

impl ResourceKind {
    pub fn default_rate_unit(self) -> RateUnit {
        match self {
            ResourceKind::Lodging => RateUnit::Night,
            ResourceKind::StudySpace => RateUnit::Hour,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub kind: ResourceKind,
    pub rate: Rate,
    pub rate_unit: RateUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Resource {
    /// A resource billed in its kind's default unit, with no capacity limit.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ResourceKind, rate: Rate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            rate,
            rate_unit: kind.default_rate_unit(),
            capacity: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The configured quantity ceiling, further capped by capacity.
    pub fn max_quantity(&self, config: &EngineConfig) -> u32 {
        match self.capacity {
            Some(capacity) => config.max_quantity.min(capacity),
            None => config.max_quantity,
        }
    }

    /// Quote a multi-day stay in this resource's billing unit.
    pub fn quote_stay(&self, range: &DateRange, quantity: u32, config: &EngineConfig) -> Result<StayQuote> {
        pricing::quote_span(
            range.start().and_time(NaiveTime::MIN),
            range.end().and_time(NaiveTime::MIN),
            self.rate_unit,
            self.rate,
            quantity,
            self.max_quantity(config),
        )
    }

    /// Quote a same-day window in this resource's billing unit.
    pub fn quote_window(
        &self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        quantity: u32,
        config: &EngineConfig,
    ) -> Result<StayQuote> {
        let (start, end) = pricing::window_instants(date, start_time, end_time)?;
        pricing::quote_span(
            start,
            end,
            self.rate_unit,
            self.rate,
            quantity,
            self.max_quantity(config),
        )
    }
}
