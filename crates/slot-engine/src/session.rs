//! Drawer session -- the stateful façade for one open/close booking cycle.
//!
//! Owns the grid, the booked-interval set, and the current selection, and
//! enforces the stage machine: Unselected → Selected → Confirmed →
//! Completed, with Unselected reachable again on date change, duration
//! invalidation, explicit reset, or fetch failure.
//!
//! All mutation happens on the single UI callback thread. The only
//! asynchronous collaborator is the availability fetch; each fetch is
//! correlated by a [`FetchToken`] so a slow stale response can never
//! overwrite fresher data.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::availability::{self, AvailabilityPayload, BookedInterval};
use crate::error::{EngineError, Result};
use crate::grid::{GridConfig, TimeGrid};
use crate::selection::{can_select_range, slots_for_duration, SelectionRange};
use crate::window::{self, BookingWindow, SubmissionRequest};

/// Duration preselected when the drawer opens.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// The resource being booked, as supplied by the opening trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub booking_url: String,
}

/// Kind of inline message surfaced in the drawer's message area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
    Success,
}

/// An inline message for the drawer's message area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }
}

/// Booking stage for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingStage {
    /// No valid selection exists.
    #[default]
    Unselected,
    /// A validated contiguous range is selected.
    Selected,
    /// The form was submitted with a purpose; the summary view is showing.
    Confirmed,
    /// Handed off to the booking-submission collaborator. Terminal.
    Completed,
}

/// Correlates an availability fetch with the session state it may update.
///
/// Only the token from the most recent [`DrawerSession::begin_fetch`] is
/// accepted by [`DrawerSession::apply_availability`]; older tokens are
/// ignored, which is what makes a superseded in-flight fetch harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

/// One open/close cycle of the booking drawer.
#[derive(Debug, Clone)]
pub struct DrawerSession {
    resource: Resource,
    tz: Tz,
    grid: TimeGrid,
    bookings: Vec<BookedInterval>,
    requires_approval: bool,
    date: Option<NaiveDate>,
    duration_minutes: u32,
    selection: Option<SelectionRange>,
    stage: BookingStage,
    purpose: String,
    notice: Option<Notice>,
    generation: u64,
    busy: bool,
}

impl DrawerSession {
    /// Open a fresh session for `resource` with the standard day grid.
    pub fn open(resource: Resource, tz: Tz) -> Self {
        Self::open_with_grid(resource, tz, GridConfig::default())
    }

    /// Open a fresh session with a custom grid shape.
    pub fn open_with_grid(resource: Resource, tz: Tz, config: GridConfig) -> Self {
        Self {
            resource,
            tz,
            grid: TimeGrid::new(config),
            bookings: Vec::new(),
            requires_approval: false,
            date: None,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            selection: None,
            stage: BookingStage::Unselected,
            purpose: String::new(),
            notice: Some(Notice::info("Select a time to begin.")),
            generation: 0,
            busy: false,
        }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn bookings(&self) -> &[BookedInterval] {
        &self.bookings
    }

    pub fn requires_approval(&self) -> bool {
        self.requires_approval
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn selection(&self) -> Option<SelectionRange> {
        self.selection
    }

    pub fn stage(&self) -> BookingStage {
        self.stage
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// True while an availability fetch is outstanding. The slot grid must
    /// not be interactable in this state.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Messaging label for the confirmation summary.
    pub fn approval_note(&self) -> &'static str {
        if self.requires_approval {
            "Requires approval"
        } else {
            "Auto-approve"
        }
    }

    /// Switch the session to `date` and start a new availability fetch.
    ///
    /// Any existing selection is destroyed: slots that were free on the old
    /// date say nothing about the new one.
    pub fn select_date(&mut self, date: NaiveDate) -> FetchToken {
        self.date = Some(date);
        self.clear_selection();
        self.start_fetch()
    }

    /// Start an availability fetch for the already-selected date.
    ///
    /// # Errors
    /// Returns `EngineError::NoDateSelected` when no date has been chosen
    /// yet; the session surfaces an info notice prompting for one.
    pub fn begin_fetch(&mut self) -> Result<FetchToken> {
        if self.date.is_none() {
            self.notice = Some(Notice::info("Pick a date to view availability."));
            return Err(EngineError::NoDateSelected);
        }
        Ok(self.start_fetch())
    }

    fn start_fetch(&mut self) -> FetchToken {
        self.generation += 1;
        self.busy = true;
        FetchToken(self.generation)
    }

    /// Apply the outcome of an availability fetch.
    ///
    /// Returns `false` (and changes nothing) when `token` is not from the
    /// most recent fetch: the response is stale and a newer one is already
    /// pending or applied.
    ///
    /// On success the booked-interval set is replaced wholesale, conflicts
    /// are remarked, and any selection is conservatively cleared -- a
    /// previously valid range may now intersect a newly blocked slot. On
    /// failure every slot is blocked: nothing may appear bookable when
    /// availability cannot be confirmed.
    pub fn apply_availability(
        &mut self,
        token: FetchToken,
        outcome: Result<AvailabilityPayload>,
    ) -> bool {
        if token.0 != self.generation {
            return false;
        }
        self.busy = false;
        match outcome {
            Ok(payload) => {
                self.bookings = payload.bookings;
                self.requires_approval = payload.requires_approval;
                if let Some(date) = self.date {
                    availability::mark_conflicts(&mut self.grid, date, self.tz, &self.bookings);
                }
                self.clear_selection();
                self.update_notice();
            }
            Err(err) => {
                self.bookings.clear();
                self.grid.block_all();
                self.clear_selection();
                self.notice = Some(Notice::error(err.to_string()));
            }
        }
        true
    }

    /// Change the requested duration.
    ///
    /// An existing selection is kept and resized in place when its start
    /// still fits the new slot count; otherwise it is cleared and an error
    /// notice is surfaced.
    pub fn set_duration(&mut self, minutes: u32) -> Result<()> {
        self.duration_minutes = minutes;
        let Some(current) = self.selection else {
            return Ok(());
        };
        let required = slots_for_duration(minutes, self.grid.config().increment_minutes);
        if can_select_range(&self.grid, current.start_index, required) {
            self.selection = Some(SelectionRange {
                start_index: current.start_index,
                slot_count: required,
            });
            self.update_notice();
            Ok(())
        } else {
            self.clear_selection();
            self.notice = Some(Notice::error(EngineError::DurationDoesNotFit.to_string()));
            Err(EngineError::DurationDoesNotFit)
        }
    }

    /// Select the contiguous range starting at `index`, sized by the current
    /// duration. Replaces any prior selection.
    pub fn select_slot(&mut self, index: usize) -> Result<()> {
        if self.date.is_none() {
            self.notice = Some(Notice::error(EngineError::NoDateSelected.to_string()));
            return Err(EngineError::NoDateSelected);
        }
        if self.busy {
            return Err(EngineError::Busy);
        }
        let required =
            slots_for_duration(self.duration_minutes, self.grid.config().increment_minutes);
        if !can_select_range(&self.grid, index, required) {
            let err = EngineError::SlotUnavailable {
                start_index: index,
                slot_count: required,
            };
            self.notice = Some(Notice::error(err.to_string()));
            return Err(err);
        }
        self.selection = Some(SelectionRange {
            start_index: index,
            slot_count: required,
        });
        self.stage = BookingStage::Selected;
        self.update_notice();
        Ok(())
    }

    /// Drop the current selection, returning the stage to Unselected.
    pub fn clear_selection(&mut self) {
        self.selection = None;
        if matches!(self.stage, BookingStage::Selected | BookingStage::Confirmed) {
            self.stage = BookingStage::Unselected;
        }
    }

    /// The absolute booking window for the current selection.
    ///
    /// # Errors
    /// `NoDateSelected` / `NoSlotSelected` when either half is missing.
    pub fn selection_window(&self) -> Result<BookingWindow> {
        let date = self.date.ok_or(EngineError::NoDateSelected)?;
        let range = self.selection.ok_or(EngineError::NoSlotSelected)?;
        Ok(window::materialize(
            self.grid.config(),
            date,
            self.tz,
            range,
            self.duration_minutes,
        ))
    }

    /// Submit the form: promote the selection to a draft booking.
    ///
    /// # Errors
    /// `NoSlotSelected` without a selection, `EmptyPurpose` when `purpose`
    /// is blank. Both surface a notice and leave the stage untouched.
    pub fn submit(&mut self, purpose: &str) -> Result<BookingWindow> {
        if self.selection.is_none() {
            self.notice = Some(Notice::error(EngineError::NoSlotSelected.to_string()));
            return Err(EngineError::NoSlotSelected);
        }
        let purpose = purpose.trim();
        if purpose.is_empty() {
            self.notice = Some(Notice::error(EngineError::EmptyPurpose.to_string()));
            return Err(EngineError::EmptyPurpose);
        }
        let window = self.selection_window()?;
        self.purpose = purpose.to_string();
        self.stage = BookingStage::Confirmed;
        self.notice = Some(Notice::success(
            "Slot reserved! Complete booking to finalize.",
        ));
        Ok(window)
    }

    /// Return from the confirmation summary to the form view.
    pub fn edit(&mut self) {
        if self.stage == BookingStage::Confirmed {
            self.stage = BookingStage::Selected;
        }
    }

    /// Hand off the confirmed draft to the booking-submission collaborator.
    ///
    /// # Errors
    /// `NotConfirmed` unless [`submit`](Self::submit) succeeded first.
    pub fn complete(&mut self) -> Result<SubmissionRequest> {
        if self.stage != BookingStage::Confirmed {
            return Err(EngineError::NotConfirmed);
        }
        let window = self.selection_window()?;
        let request = window::submission_request(
            &self.resource.booking_url,
            &self.resource.id,
            &window,
            &self.purpose,
        );
        self.stage = BookingStage::Completed;
        Ok(request)
    }

    /// Clear all derived state, as on drawer close.
    ///
    /// The fetch generation is advanced so any response still in flight is
    /// ignored when it eventually lands; in-flight work is never cancelled
    /// explicitly.
    pub fn reset(&mut self) {
        self.bookings.clear();
        self.requires_approval = false;
        self.selection = None;
        self.stage = BookingStage::Unselected;
        self.purpose.clear();
        self.notice = None;
        self.duration_minutes = DEFAULT_DURATION_MINUTES;
        self.date = None;
        self.grid.unblock_all();
        self.generation += 1;
        self.busy = false;
    }

    /// Refresh the standing approval message after selection changes.
    fn update_notice(&mut self) {
        if self.selection.is_none() {
            if self.requires_approval {
                self.notice = Some(Notice::info(
                    "Requires approval: owner will confirm before booking.",
                ));
            } else {
                self.notice = None;
            }
            return;
        }
        if self.requires_approval {
            self.notice = Some(Notice::info(
                "Requires approval: owner will review this request.",
            ));
        } else {
            self.notice = None;
        }
    }
}
