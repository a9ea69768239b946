//! WASM bindings for slot-engine.
//!
//! Exposes availability marking, range validation, and booking-window
//! materialization to JavaScript via `wasm-bindgen`, so the drawer UI can
//! run the same conflict and selection logic the test suite exercises. All
//! complex types cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir static/js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use slot_engine::availability::{mark_conflicts, AvailabilityPayload};
use slot_engine::grid::TimeGrid;
use slot_engine::selection::{can_select_range, slots_for_duration, SelectionRange};
use slot_engine::window::materialize;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    index: usize,
    start_minutes: u32,
    blocked: bool,
}

#[derive(Serialize)]
struct GridDto {
    slots: Vec<SlotDto>,
    requires_approval: bool,
}

#[derive(Serialize)]
struct WindowDto {
    date: String,
    start: String,
    end: String,
    start_time: String,
    end_time: String,
    duration_minutes: u32,
    requested_minutes: u32,
    date_label: String,
    time_label: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    s.parse()
        .map_err(|_| JsValue::from_str(&format!("Invalid date '{}'", s)))
}

fn parse_tz(s: &str) -> Result<Tz, JsValue> {
    s.parse()
        .map_err(|_| JsValue::from_str(&format!("Invalid timezone '{}'", s)))
}

/// Build the marked day grid for a payload, blocking everything when the
/// payload cannot be parsed (fail safe: nothing may appear bookable when
/// availability is unconfirmed).
fn marked_grid(payload_json: &str, date: NaiveDate, tz: Tz) -> (TimeGrid, bool) {
    let mut grid = TimeGrid::standard();
    match AvailabilityPayload::from_json(payload_json) {
        Ok(payload) => {
            mark_conflicts(&mut grid, date, tz, &payload.bookings);
            (grid, payload.requires_approval)
        }
        Err(_) => {
            grid.block_all();
            (grid, false)
        }
    }
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Mark the standard day grid against an availability payload.
///
/// Returns a JSON string `{slots: [{index, start_minutes, blocked}, ...],
/// requires_approval}`. An unparseable payload yields a fully blocked grid
/// rather than an error, matching the engine's fail-safe policy.
///
/// # Arguments
/// - `payload_json` -- the availability endpoint's JSON payload
/// - `date` -- ISO date string (e.g., "2026-03-16")
/// - `timezone` -- IANA timezone of the resource (e.g., "America/New_York")
#[wasm_bindgen(js_name = "markAvailability")]
pub fn mark_availability(payload_json: &str, date: &str, timezone: &str) -> Result<String, JsValue> {
    let date = parse_date(date)?;
    let tz = parse_tz(timezone)?;

    let (grid, requires_approval) = marked_grid(payload_json, date, tz);
    let dto = GridDto {
        slots: grid
            .slots()
            .iter()
            .map(|slot| SlotDto {
                index: slot.index,
                start_minutes: slot.start_minutes,
                blocked: slot.blocked,
            })
            .collect(),
        requires_approval,
    };

    serde_json::to_string(&dto)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// True iff a contiguous window sized by `duration_minutes` and starting at
/// `start_index` fits inside the grid and covers no booked slot.
#[wasm_bindgen(js_name = "canSelectRange")]
pub fn can_select_range_js(
    payload_json: &str,
    date: &str,
    timezone: &str,
    start_index: usize,
    duration_minutes: u32,
) -> Result<bool, JsValue> {
    let date = parse_date(date)?;
    let tz = parse_tz(timezone)?;

    let (grid, _) = marked_grid(payload_json, date, tz);
    let slot_count = slots_for_duration(duration_minutes, grid.config().increment_minutes);
    Ok(can_select_range(&grid, start_index, slot_count))
}

/// Materialize the absolute booking window for a selection.
///
/// Returns a JSON string with RFC 3339 `start`/`end` instants, 24-hour
/// `start_time`/`end_time`, the whole-slot `duration_minutes`, the original
/// `requested_minutes`, and display labels.
#[wasm_bindgen(js_name = "selectionWindow")]
pub fn selection_window(
    date: &str,
    timezone: &str,
    start_index: usize,
    duration_minutes: u32,
) -> Result<String, JsValue> {
    let date = parse_date(date)?;
    let tz = parse_tz(timezone)?;

    let grid = TimeGrid::standard();
    let config = *grid.config();
    let slot_count = slots_for_duration(duration_minutes, config.increment_minutes);
    let fits = start_index
        .checked_add(slot_count)
        .is_some_and(|end| end <= grid.len());
    if !fits {
        return Err(JsValue::from_str("Selection runs past the end of the day"));
    }

    let window = materialize(
        &config,
        date,
        tz,
        SelectionRange {
            start_index,
            slot_count,
        },
        duration_minutes,
    );
    let dto = WindowDto {
        date: window.date.format("%Y-%m-%d").to_string(),
        start: window.start.to_rfc3339(),
        end: window.end.to_rfc3339(),
        start_time: window.start_time,
        end_time: window.end_time,
        duration_minutes: window.duration_minutes,
        requested_minutes: window.requested_minutes,
        date_label: window.date_label,
        time_label: window.time_label,
    };

    serde_json::to_string(&dto)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
