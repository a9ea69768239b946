//! # slot-engine
//!
//! Slot availability and selection for a campus-resource booking drawer.
//!
//! The engine consumes an availability payload (existing reservations for one
//! resource on one date) plus a requested duration, and produces the
//! bookable/blocked slot grid and a validated contiguous selection that can
//! be promoted to a draft booking. Rendering, network transport, and booking
//! submission are external collaborators that call into this crate.
//!
//! ## Modules
//!
//! - [`grid`] — day grid generation (fixed-width time slots)
//! - [`availability`] — availability payload parsing and conflict marking
//! - [`selection`] — duration mapping and contiguous range validation
//! - [`session`] — stateful drawer session and booking stage machine
//! - [`window`] — absolute booking window and submission encoding
//! - [`localtime`] — wall-clock time → absolute instant resolution
//! - [`error`] — error types

pub mod availability;
pub mod error;
pub mod grid;
pub mod localtime;
pub mod selection;
pub mod session;
pub mod window;

pub use availability::{mark_conflicts, AvailabilityPayload, BookedInterval};
pub use error::EngineError;
pub use grid::{GridConfig, Slot, TimeGrid};
pub use selection::{can_select_range, slots_for_duration, SelectionRange};
pub use session::{BookingStage, DrawerSession, FetchToken, Notice, NoticeKind, Resource};
pub use window::{BookingWindow, SubmissionRequest};
