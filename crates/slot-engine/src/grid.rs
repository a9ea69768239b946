//! Day grid generation -- ordered, fixed-width time slots covering one
//! business day.
//!
//! Slots are contiguous, equal-width, and cover `[day_start, day_end)` with
//! no gaps or overlaps. Slot `i` starts at `day_start + i * increment`.

use serde::{Deserialize, Serialize};

/// Bookable day starts at 7:00 AM.
pub const DAY_START_MINUTES: u32 = 7 * 60;
/// Bookable day ends at 10:00 PM.
pub const DAY_END_MINUTES: u32 = 22 * 60;
/// Width of a single slot.
pub const SLOT_INCREMENT_MINUTES: u32 = 30;

/// Grid shape: day bounds and slot width, all in minutes past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub day_start_minutes: u32,
    pub day_end_minutes: u32,
    pub increment_minutes: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            day_start_minutes: DAY_START_MINUTES,
            day_end_minutes: DAY_END_MINUTES,
            increment_minutes: SLOT_INCREMENT_MINUTES,
        }
    }
}

/// One fixed-width atomic unit of bookable time within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Zero-based position in the grid.
    pub index: usize,
    /// Offset from midnight, in minutes.
    pub start_minutes: u32,
    /// Whether the slot window overlaps an existing reservation.
    pub blocked: bool,
}

/// The ordered slot sequence for a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    config: GridConfig,
    slots: Vec<Slot>,
}

impl TimeGrid {
    /// Grid with the standard shape: 7:00 AM to 10:00 PM in 30-minute slots.
    pub fn standard() -> Self {
        Self::new(GridConfig::default())
    }

    /// Generate the ordered slot sequence for `config`.
    ///
    /// All slots start unblocked. The standard constants divide evenly; a
    /// config whose span is not a multiple of the increment is truncated to
    /// the last slot that fits entirely inside the day.
    pub fn new(config: GridConfig) -> Self {
        let mut slots = Vec::new();
        let mut minutes = config.day_start_minutes;
        let mut index = 0;
        while minutes + config.increment_minutes <= config.day_end_minutes {
            slots.push(Slot {
                index,
                start_minutes: minutes,
                blocked: false,
            });
            minutes += config.increment_minutes;
            index += 1;
        }
        Self { config, slots }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// The `[start, end)` window of a slot, in minutes past midnight.
    pub fn slot_window_minutes(&self, index: usize) -> Option<(u32, u32)> {
        self.slots.get(index).map(|slot| {
            (
                slot.start_minutes,
                slot.start_minutes + self.config.increment_minutes,
            )
        })
    }

    /// Mark every slot blocked. Used when availability cannot be confirmed:
    /// nothing may appear bookable on a failed or unparseable fetch.
    pub fn block_all(&mut self) {
        for slot in &mut self.slots {
            slot.blocked = true;
        }
    }

    /// Mark every slot unblocked.
    pub fn unblock_all(&mut self) {
        for slot in &mut self.slots {
            slot.blocked = false;
        }
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }
}
