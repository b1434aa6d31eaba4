//! Core library for daybook.
//!
//! This crate provides the calendar logic used by the daybook CLI:
//! - `recurrence` for expanding repeating events into dates
//! - `overlap` for detecting time clashes between events
//! - `store` for the save and delete flows over an in-memory event collection

pub mod config;
pub mod constants;
pub mod date_range;
pub mod dates;
pub mod error;
pub mod event;
pub mod notification;
pub mod overlap;
pub mod recurrence;
pub mod search;
pub mod series;
pub mod store;
pub mod validation;

// Re-export the common types at crate root for convenience
pub use error::{CalResult, CalendarError};
pub use event::*;
pub use overlap::{
    Scheduled, Timestamp, find_overlapping_events, find_overlapping_events_for_series,
    is_overlapping,
};
pub use recurrence::{Frequency, RecurrenceRule, generate_recurrence_dates};
