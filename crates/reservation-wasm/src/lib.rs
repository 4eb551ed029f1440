//! WASM bindings for reservation-core.
//!
//! Exposes slot-window derivation, quotes and pagination to the browser front
//! end via `wasm-bindgen`. Slot lists, configs and results cross the boundary
//! as JSON strings; times are `"HH:MM"`, dates `"YYYY-MM-DD"`, amounts
//! two-decimal strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p reservation-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/reservation-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/reservation_wasm.wasm
//! ```

use chrono::NaiveDate;
use reservation_core::slots::{format_time, parse_time};
use reservation_core::{DateRange, EngineConfig, Rate, ReservationDraft, TimeSlot};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: parse JSON inputs and map errors to JS
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_slots_json(json: &str) -> Result<Vec<TimeSlot>, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid slots JSON: {}", e)))
}

/// Parse an optional config document; `None` or an empty string means defaults.
fn parse_config(json: Option<String>) -> Result<EngineConfig, JsValue> {
    match json.as_deref().map(str::trim) {
        None | Some("") => Ok(EngineConfig::default()),
        Some(raw) => EngineConfig::from_json(raw).map_err(js_err),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn times_json(times: &[chrono::NaiveTime]) -> Result<String, JsValue> {
    let rendered: Vec<String> = times.iter().map(|t| format_time(*t)).collect();
    to_json(&rendered)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Start times of every available slot.
///
/// `slots_json` is the availability response: an array of
/// `{startTime, endTime, available}`. Returns a JSON array of `"HH:MM"`.
#[wasm_bindgen(js_name = "availableStarts")]
pub fn available_starts(slots_json: &str) -> Result<String, JsValue> {
    let slots = parse_slots_json(slots_json)?;
    times_json(&reservation_core::available_starts(&slots))
}

/// End times reachable from `start` without crossing an unavailable slot.
///
/// `min_slots` overrides the config's minimum; without either the chosen
/// slot's own end is offered. Pass the same config as `draftReservation` so
/// every offered end produces a valid draft.
#[wasm_bindgen(js_name = "availableEnds")]
pub fn available_ends(
    slots_json: &str,
    start: &str,
    min_slots: Option<u32>,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let config = parse_config(config_json)?;
    let slots = parse_slots_json(slots_json)?;
    let start = parse_time(start).map_err(js_err)?;
    let min_slots = min_slots.map_or(config.min_slots, |n| n as usize);
    times_json(&reservation_core::available_ends_with_min(&slots, start, min_slots))
}

/// End times a reservation ending at `current_end` can be extended to.
#[wasm_bindgen(js_name = "extensionEnds")]
pub fn extension_ends(slots_json: &str, current_end: &str) -> Result<String, JsValue> {
    let slots = parse_slots_json(slots_json)?;
    let current_end = parse_time(current_end).map_err(js_err)?;
    times_json(&reservation_core::extension_ends(&slots, current_end))
}

/// Whether `start..end` is a contiguous run of available slots.
#[wasm_bindgen(js_name = "isContiguousWindow")]
pub fn is_contiguous_window(slots_json: &str, start: &str, end: &str) -> Result<bool, JsValue> {
    let slots = parse_slots_json(slots_json)?;
    let start = parse_time(start).map_err(js_err)?;
    let end = parse_time(end).map_err(js_err)?;
    Ok(reservation_core::is_contiguous_window(&slots, start, end))
}

/// Nights between two `YYYY-MM-DD` dates. Throws when `end` is not after `start`.
#[wasm_bindgen(js_name = "unitsBetween")]
pub fn units_between(start: &str, end: &str) -> Result<u32, JsValue> {
    let units = reservation_core::units_between(parse_date(start)?, parse_date(end)?).map_err(js_err)?;
    u32::try_from(units).map_err(js_err)
}

/// `rate x units x quantity` as a two-decimal string.
#[wasm_bindgen(js_name = "computeTotal")]
pub fn compute_total(
    rate: &str,
    units: u32,
    quantity: u32,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let config = parse_config(config_json)?;
    let rate: Rate = rate.parse().map_err(js_err)?;
    let total = reservation_core::compute_total_with_limit(
        rate,
        i64::from(units),
        quantity,
        config.max_quantity,
    )
    .map_err(js_err)?;
    Ok(total.to_string())
}

/// Quote a stay between two dates. Returns the quote as JSON:
/// `{unitsElapsed, rateUnit, ratePerUnit, quantity, total}`.
#[wasm_bindgen(js_name = "quoteStay")]
pub fn quote_stay(
    check_in: &str,
    check_out: &str,
    rate: &str,
    quantity: u32,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let config = parse_config(config_json)?;
    let range = DateRange::new(parse_date(check_in)?, parse_date(check_out)?).map_err(js_err)?;
    let rate: Rate = rate.parse().map_err(js_err)?;
    let quote = reservation_core::quote(&range, rate, quantity, &config).map_err(js_err)?;
    to_json(&quote)
}

/// Build a submission payload for a slot window, validating it against the
/// slots first. Returns `{resourceId, date, startTime, endTime}` as JSON.
#[wasm_bindgen(js_name = "draftReservation")]
pub fn draft_reservation(
    resource_id: &str,
    date: &str,
    start: &str,
    end: &str,
    slots_json: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let config = parse_config(config_json)?;
    let slots = parse_slots_json(slots_json)?;
    let draft = ReservationDraft::new(
        resource_id,
        parse_date(date)?,
        parse_time(start).map_err(js_err)?,
        parse_time(end).map_err(js_err)?,
        &slots,
        &config,
    )
    .map_err(js_err)?;
    to_json(&draft)
}

/// Pagination bar entries as JSON: `{"type":"page","index":n,"active":b}` or
/// `{"type":"ellipsis"}`.
#[wasm_bindgen(js_name = "pageItems")]
pub fn page_items(current: u32, total: u32, neighbors: u32) -> Result<String, JsValue> {
    let items = reservation_core::page_items(current as usize, total as usize, neighbors as usize);
    to_json(&items)
}
