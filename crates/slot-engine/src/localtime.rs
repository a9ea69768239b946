//! Wall-clock time → absolute instant resolution.
//!
//! Slot offsets are minutes past local midnight in the resource's timezone.
//! Around DST transitions a wall-clock time may not exist or may exist
//! twice: ambiguous times resolve to the earlier instant, and times inside
//! a spring-forward gap shift forward to the first representable time.

use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolve `date` at `minutes` past local midnight to a UTC instant.
///
/// Offsets of 1440 or more roll into the following day, so a window that
/// ends exactly at midnight stays representable.
pub fn wall_clock_instant(date: NaiveDate, minutes: u32, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(minutes));
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        LocalResult::None => {
            // Spring-forward gap: probe forward in 15-minute steps until a
            // representable wall-clock time is found. Real gaps are at most
            // a few hours wide, so the probe is bounded to one day.
            for step in 1..=96 {
                let probe = naive + Duration::minutes(15 * step);
                if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
                    return dt.with_timezone(&Utc);
                }
            }
            naive.and_utc()
        }
    }
}
