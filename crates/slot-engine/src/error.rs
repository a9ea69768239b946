//! Error types for slot-engine operations.
//!
//! Message text doubles as the inline notice shown in the drawer, so the
//! `Display` strings are user-facing sentences rather than debug phrases.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Choose a date first.")]
    NoDateSelected,

    #[error("Select a time slot first.")]
    NoSlotSelected,

    #[error("Purpose is required.")]
    EmptyPurpose,

    #[error("Already booked during part of this time.")]
    SlotUnavailable {
        start_index: usize,
        slot_count: usize,
    },

    #[error("Not enough time available for that duration.")]
    DurationDoesNotFit,

    #[error("Nothing to complete yet.")]
    NotConfirmed,

    #[error("Availability is still loading.")]
    Busy,

    #[error("Unable to load availability: {0}")]
    InvalidPayload(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
