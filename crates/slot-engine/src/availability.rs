//! Availability payload parsing and slot conflict marking.
//!
//! The availability collaborator returns, for one resource and one date, the
//! set of existing reservations plus a resource-level approval flag. The
//! interval set is replaced wholesale on every fetch; conflict marking is
//! recomputed from scratch against the full set.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::grid::TimeGrid;
use crate::localtime;

/// An existing reservation's time window, used only for conflict checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Payload returned by the availability endpoint for one resource + date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityPayload {
    /// Existing reservations on the resource for the selected date.
    pub bookings: Vec<BookedInterval>,
    /// Whether bookings need manual approval before confirmation. Affects
    /// messaging only, never slot legality.
    #[serde(default)]
    pub requires_approval: bool,
}

impl AvailabilityPayload {
    /// Parse the collaborator's JSON payload.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidPayload` when the JSON is malformed or a
    /// timestamp is not ISO 8601. Callers must treat that the same as a
    /// failed fetch: total unavailability.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::InvalidPayload(e.to_string()))
    }
}

/// Mark each slot blocked iff its window overlaps a booked interval.
///
/// Overlap is half-open: `slot_start < booking_end && slot_end > booking_start`.
/// A reservation that ends exactly when a slot starts does not block it, and
/// vice versa. Slot windows are wall-clock times on `date` in `tz`, resolved
/// to absolute instants before comparison.
pub fn mark_conflicts(grid: &mut TimeGrid, date: NaiveDate, tz: Tz, bookings: &[BookedInterval]) {
    let increment = grid.config().increment_minutes;
    for slot in grid.slots_mut() {
        let slot_start = localtime::wall_clock_instant(date, slot.start_minutes, tz);
        let slot_end = localtime::wall_clock_instant(date, slot.start_minutes + increment, tz);
        slot.blocked = bookings
            .iter()
            .any(|booking| slot_start < booking.end && slot_end > booking.start);
    }
}
