//! Property-based tests for grid generation, conflict marking, and range
//! validation using proptest.
//!
//! These verify invariants that should hold for *any* grid shape and booking
//! set, not just the examples in the unit-style tests.

use chrono::{Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use proptest::prelude::*;
use slot_engine::availability::{mark_conflicts, AvailabilityPayload, BookedInterval};
use slot_engine::grid::{GridConfig, TimeGrid};
use slot_engine::selection::{can_select_range, slots_for_duration};
use slot_engine::session::{DrawerSession, Resource};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Grid shapes whose span is an exact multiple of the increment.
fn arb_config() -> impl Strategy<Value = GridConfig> {
    (0u32..=720, prop_oneof![Just(15u32), Just(30), Just(60)], 1u32..=40).prop_map(
        |(start, increment, count)| GridConfig {
            day_start_minutes: start,
            day_end_minutes: start + count * increment,
            increment_minutes: increment,
        },
    )
}

/// A booking as a (start, length) minute pair on the test date.
fn arb_booking_minutes() -> impl Strategy<Value = (u32, u32)> {
    (0u32..1440, 1u32..=240)
}

fn arb_bookings() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec(arb_booking_minutes(), 0..8)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

/// Materialize a minute-pair booking as UTC instants on the test date.
fn booking_at(start_minutes: u32, length_minutes: u32) -> BookedInterval {
    let midnight = test_date().and_time(NaiveTime::MIN).and_utc();
    let start = midnight + Duration::minutes(i64::from(start_minutes));
    BookedInterval {
        start,
        end: start + Duration::minutes(i64::from(length_minutes)),
    }
}

fn resource() -> Resource {
    Resource {
        id: "res-1".to_string(),
        title: "Resource".to_string(),
        booking_url: "/bookings/new".to_string(),
    }
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Slot starts follow day_start + i * increment, count is exact
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn grid_covers_the_day_exactly(cfg in arb_config()) {
        let grid = TimeGrid::new(cfg);
        let expected_count =
            (cfg.day_end_minutes - cfg.day_start_minutes) / cfg.increment_minutes;
        prop_assert_eq!(grid.len() as u32, expected_count);

        for (i, slot) in grid.slots().iter().enumerate() {
            prop_assert_eq!(slot.index, i);
            prop_assert_eq!(
                slot.start_minutes,
                cfg.day_start_minutes + i as u32 * cfg.increment_minutes
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: A slot is blocked iff its window overlaps a booking (half-open)
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn blocked_iff_half_open_overlap(cfg in arb_config(), bookings in arb_bookings()) {
        let mut grid = TimeGrid::new(cfg);
        let intervals: Vec<BookedInterval> = bookings
            .iter()
            .map(|&(start, length)| booking_at(start, length))
            .collect();

        mark_conflicts(&mut grid, test_date(), Tz::UTC, &intervals);

        for slot in grid.slots() {
            let slot_start = slot.start_minutes;
            let slot_end = slot.start_minutes + cfg.increment_minutes;
            // Independent minute-space recomputation of the overlap rule.
            let expected = bookings.iter().any(|&(start, length)| {
                slot_start < start + length && slot_end > start
            });
            prop_assert_eq!(
                slot.blocked,
                expected,
                "slot [{}, {}) vs bookings {:?}",
                slot_start,
                slot_end,
                &bookings
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: A selectable range never touches a blocked slot or the edge
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn selectable_range_is_entirely_free(
        cfg in arb_config(),
        bookings in arb_bookings(),
        start_index in 0usize..64,
        duration in 1u32..=240,
    ) {
        let mut grid = TimeGrid::new(cfg);
        let intervals: Vec<BookedInterval> = bookings
            .iter()
            .map(|&(start, length)| booking_at(start, length))
            .collect();
        mark_conflicts(&mut grid, test_date(), Tz::UTC, &intervals);

        let slot_count = slots_for_duration(duration, cfg.increment_minutes);
        if can_select_range(&grid, start_index, slot_count) {
            prop_assert!(start_index + slot_count <= grid.len());
            for slot in &grid.slots()[start_index..start_index + slot_count] {
                prop_assert!(!slot.blocked, "selected window covers blocked slot {}", slot.index);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: After any duration change, the session selection is either
// gone or still entirely free at the new size
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn duration_change_never_leaves_an_invalid_selection(
        bookings in arb_bookings(),
        start_index in 0usize..30,
        first_duration in 1u32..=240,
        second_duration in 1u32..=240,
    ) {
        let mut session = DrawerSession::open(resource(), Tz::UTC);
        let token = session.select_date(test_date());
        let payload = AvailabilityPayload {
            bookings: bookings
                .iter()
                .map(|&(start, length)| booking_at(start, length))
                .collect(),
            requires_approval: false,
        };
        prop_assert!(session.apply_availability(token, Ok(payload)));

        session.set_duration(first_duration).ok();
        session.select_slot(start_index).ok();
        session.set_duration(second_duration).ok();

        if let Some(range) = session.selection() {
            let grid = session.grid();
            prop_assert!(range.start_index + range.slot_count <= grid.len());
            for slot in &grid.slots()[range.start_index..range.start_index + range.slot_count] {
                prop_assert!(!slot.blocked);
            }
        }
    }
}
