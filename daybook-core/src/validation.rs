//! Start/end time validation for the event form.

use crate::overlap::parse_time;

pub const START_TIME_ERROR: &str = "Start time must be earlier than end time";
pub const END_TIME_ERROR: &str = "End time must be later than start time";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeErrors {
    pub start_time_error: Option<String>,
    pub end_time_error: Option<String>,
}

impl TimeErrors {
    pub fn is_empty(&self) -> bool {
        self.start_time_error.is_none() && self.end_time_error.is_none()
    }
}

/// Both messages when `start >= end`. Empty or unparseable input is not flagged here;
/// required-field checks happen elsewhere.
pub fn time_error_messages(start: &str, end: &str) -> TimeErrors {
    let (Some(start), Some(end)) = (parse_time(start), parse_time(end)) else {
        return TimeErrors::default();
    };

    if start < end {
        return TimeErrors::default();
    }

    TimeErrors {
        start_time_error: Some(START_TIME_ERROR.to_string()),
        end_time_error: Some(END_TIME_ERROR.to_string()),
    }
}
