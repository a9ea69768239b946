//! Duration mapping and contiguous range validation.

use serde::{Deserialize, Serialize};

use crate::grid::TimeGrid;

/// The user's current contiguous, duration-sized slot selection.
///
/// At most one selection exists at a time; selecting a new start slot
/// replaces any prior one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start_index: usize,
    pub slot_count: usize,
}

/// Map a requested duration to the number of grid slots it occupies.
///
/// Durations that are not a multiple of the increment round up: the booked
/// block is always whole slots even when the request is finer-grained, so a
/// 45-minute request occupies two 30-minute slots.
pub fn slots_for_duration(duration_minutes: u32, increment_minutes: u32) -> usize {
    let increment = increment_minutes.max(1);
    duration_minutes.div_ceil(increment).max(1) as usize
}

/// True iff the window `[start_index, start_index + slot_count)` fits inside
/// the grid and every covered slot is free.
pub fn can_select_range(grid: &TimeGrid, start_index: usize, slot_count: usize) -> bool {
    if slot_count == 0 {
        return false;
    }
    let Some(end_index) = start_index.checked_add(slot_count) else {
        return false;
    };
    if end_index > grid.len() {
        return false;
    }
    grid.slots()[start_index..end_index]
        .iter()
        .all(|slot| !slot.blocked)
}
