//! # reservation-core
//!
//! Availability windows and pricing for a resource-reservation front end.
//!
//! Everything here is a pure function over immutable snapshots: slot lists
//! fetched from the availability endpoint, rates from the resource catalog.
//! Network calls, sessions and persistence belong to the caller.
//!
//! ## Modules
//!
//! - [`slots`] — selectable start/end times from a day's slot list
//! - [`pricing`] — elapsed units, totals and quotes
//! - [`money`] — fixed-point `Money` and `Rate`
//! - [`draft`] — validated reservation and stay drafts
//! - [`resource`] — lodging and study spaces under one model
//! - [`bounds`] — past-date checks
//! - [`pagination`] — listing page bar
//! - [`config`] — engine configuration
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveTime;
//! use reservation_core::{available_ends, TimeSlot};
//!
//! let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
//! let slots = vec![
//!     TimeSlot::new(t(9), t(10), true),
//!     TimeSlot::new(t(10), t(11), true),
//!     TimeSlot::new(t(11), t(12), false),
//!     TimeSlot::new(t(12), t(13), true),
//! ];
//! assert_eq!(available_ends(&slots, t(9)), vec![t(10), t(11)]);
//! ```

pub mod bounds;
pub mod config;
pub mod draft;
pub mod error;
pub mod money;
pub mod pagination;
pub mod pricing;
pub mod resource;
pub mod slots;

pub use config::{EngineConfig, DEFAULT_MAX_QUANTITY};
pub use draft::{ReservationDraft, StayDraft};
pub use error::ReservationError;
pub use money::{Money, Rate};
pub use pagination::{page_items, PageItem};
pub use pricing::{
    compute_total, compute_total_with_limit, quote, quote_window, units_between,
    units_between_times, DateRange, RateUnit, StayQuote,
};
pub use resource::{Resource, ResourceKind};
pub use slots::{
    available_ends, available_ends_with_min, available_starts, available_windows,
    extension_ends, is_contiguous_window, window_length, TimeSlot,
};
