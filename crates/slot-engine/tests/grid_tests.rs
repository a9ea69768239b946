//! Tests for day grid generation.

use slot_engine::grid::{
    GridConfig, TimeGrid, DAY_END_MINUTES, DAY_START_MINUTES, SLOT_INCREMENT_MINUTES,
};

#[test]
fn standard_grid_has_thirty_slots() {
    // 7:00-22:00 at 30-minute steps: (1320 - 420) / 30 = 30 slots.
    let grid = TimeGrid::standard();
    assert_eq!(grid.len(), 30);
    assert_eq!(
        grid.len() as u32,
        (DAY_END_MINUTES - DAY_START_MINUTES) / SLOT_INCREMENT_MINUTES
    );
}

#[test]
fn slot_starts_follow_arithmetic_progression() {
    let grid = TimeGrid::standard();
    for (i, slot) in grid.slots().iter().enumerate() {
        assert_eq!(slot.index, i);
        assert_eq!(
            slot.start_minutes,
            DAY_START_MINUTES + i as u32 * SLOT_INCREMENT_MINUTES,
            "slot {} should start at day_start + i * increment",
            i
        );
    }
}

#[test]
fn slots_are_contiguous_and_cover_the_day() {
    let grid = TimeGrid::standard();
    let slots = grid.slots();

    assert_eq!(slots[0].start_minutes, DAY_START_MINUTES);
    for pair in slots.windows(2) {
        assert_eq!(
            pair[0].start_minutes + SLOT_INCREMENT_MINUTES,
            pair[1].start_minutes,
            "slots must be contiguous with no gaps or overlaps"
        );
    }
    let last = slots[slots.len() - 1];
    assert_eq!(last.start_minutes + SLOT_INCREMENT_MINUTES, DAY_END_MINUTES);
}

#[test]
fn all_slots_start_unblocked() {
    let grid = TimeGrid::standard();
    assert!(grid.slots().iter().all(|slot| !slot.blocked));
}

#[test]
fn slot_window_is_half_open() {
    let grid = TimeGrid::standard();
    // Slot 4 is 09:00-09:30.
    assert_eq!(grid.slot_window_minutes(4), Some((540, 570)));
    assert_eq!(grid.slot_window_minutes(30), None);
}

#[test]
fn block_all_and_unblock_all_flip_every_slot() {
    let mut grid = TimeGrid::standard();
    grid.block_all();
    assert!(grid.slots().iter().all(|slot| slot.blocked));
    grid.unblock_all();
    assert!(grid.slots().iter().all(|slot| !slot.blocked));
}

#[test]
fn uneven_span_truncates_to_whole_slots() {
    // 100-minute span with 30-minute slots: only 3 fit entirely inside.
    let grid = TimeGrid::new(GridConfig {
        day_start_minutes: 600,
        day_end_minutes: 700,
        increment_minutes: 30,
    });
    assert_eq!(grid.len(), 3);
    let last = grid.slots()[2];
    assert!(last.start_minutes + 30 <= 700, "no slot may cross day end");
}

#[test]
fn degenerate_config_produces_empty_grid() {
    let grid = TimeGrid::new(GridConfig {
        day_start_minutes: 600,
        day_end_minutes: 600,
        increment_minutes: 30,
    });
    assert!(grid.is_empty());
    assert_eq!(grid.len(), 0);
}
