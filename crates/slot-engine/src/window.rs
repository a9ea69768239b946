//! Booking window materialization and submission encoding.
//!
//! Converts a validated selection into the absolute time window that gets
//! handed to the booking-submission collaborator, plus the human-readable
//! labels the confirmation summary displays.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::grid::GridConfig;
use crate::localtime;
use crate::selection::SelectionRange;

/// The absolute booking window derived from a selection on a given date.
///
/// Always slot-aligned and fully contained within the day bounds, since
/// range validation already bounded the selection against the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWindow {
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Whole-slot block duration. May exceed the requested duration when the
    /// request was not a multiple of the slot increment; see
    /// [`requested_minutes`](Self::requested_minutes) for the original ask.
    pub duration_minutes: u32,
    /// Duration the user originally asked for, before rounding up to whole
    /// slots.
    pub requested_minutes: u32,
    /// e.g. "Monday, Mar 16".
    pub date_label: String,
    /// e.g. "8:30 AM – 9:30 AM".
    pub time_label: String,
    /// 24-hour start, "HH:MM".
    pub start_time: String,
    /// 24-hour end, "HH:MM".
    pub end_time: String,
}

/// Query-string handoff to the booking-submission collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub booking_url: String,
    pub query: String,
}

impl SubmissionRequest {
    /// The full redirect target: booking URL plus the query string.
    pub fn url(&self) -> String {
        format!("{}?{}", self.booking_url, self.query)
    }
}

fn local_datetime(date: NaiveDate, minutes: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(minutes))
}

/// Compute the absolute booking window for `range` on `date`.
///
/// `requested_minutes` is carried through untouched so callers can message
/// the gap between what was asked for and the whole-slot block that will
/// actually be reserved.
pub fn materialize(
    config: &GridConfig,
    date: NaiveDate,
    tz: Tz,
    range: SelectionRange,
    requested_minutes: u32,
) -> BookingWindow {
    let start_minutes =
        config.day_start_minutes + (range.start_index as u32) * config.increment_minutes;
    let duration_minutes = (range.slot_count as u32) * config.increment_minutes;
    let end_minutes = start_minutes + duration_minutes;

    let start_local = local_datetime(date, start_minutes);
    let end_local = local_datetime(date, end_minutes);

    BookingWindow {
        date,
        start: localtime::wall_clock_instant(date, start_minutes, tz),
        end: localtime::wall_clock_instant(date, end_minutes, tz),
        duration_minutes,
        requested_minutes,
        date_label: start_local.format("%A, %b %-d").to_string(),
        time_label: format!(
            "{} – {}",
            start_local.format("%-I:%M %p"),
            end_local.format("%-I:%M %p")
        ),
        start_time: start_local.format("%H:%M").to_string(),
        end_time: end_local.format("%H:%M").to_string(),
    }
}

/// Render the submission query string for a confirmed window.
///
/// Carries `resource_id`, `date` (ISO), `start`/`end` (24-hour `HH:MM`),
/// `duration` (whole-slot minutes), and the trimmed `purpose` when one was
/// given. Values are percent-encoded.
pub fn submission_request(
    booking_url: &str,
    resource_id: &str,
    window: &BookingWindow,
    purpose: &str,
) -> SubmissionRequest {
    let mut query = format!(
        "resource_id={}&date={}&start={}&end={}&duration={}",
        urlencoding::encode(resource_id),
        window.date.format("%Y-%m-%d"),
        urlencoding::encode(&window.start_time),
        urlencoding::encode(&window.end_time),
        window.duration_minutes,
    );
    let purpose = purpose.trim();
    if !purpose.is_empty() {
        query.push_str("&purpose=");
        query.push_str(&urlencoding::encode(purpose));
    }
    SubmissionRequest {
        booking_url: booking_url.to_string(),
        query,
    }
}
