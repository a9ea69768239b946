//! Criterion benchmark for conflict marking over a heavily booked day.

use chrono::{Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::availability::{mark_conflicts, BookedInterval};
use slot_engine::grid::TimeGrid;
use std::hint::black_box;

fn bench_mark_conflicts(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    let midnight = date.and_time(NaiveTime::MIN).and_utc();

    // 200 overlapping 45-minute reservations scattered across the day.
    let bookings: Vec<BookedInterval> = (0..200i64)
        .map(|i| {
            let start = midnight + Duration::minutes(i * 7 % 1380);
            BookedInterval {
                start,
                end: start + Duration::minutes(45),
            }
        })
        .collect();

    c.bench_function("mark_conflicts/200_bookings", |b| {
        b.iter(|| {
            let mut grid = TimeGrid::standard();
            mark_conflicts(black_box(&mut grid), date, Tz::UTC, black_box(&bookings));
            grid
        })
    });
}

criterion_group!(benches, bench_mark_conflicts);
criterion_main!(benches);
