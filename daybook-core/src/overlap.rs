//! Overlap detection between events.
//!
//! A date and a wall-clock time combine into a [`Timestamp`] with no time zone attached.
//! Anything that fails to parse becomes [`Timestamp::Invalid`], and every comparison
//! involving an invalid timestamp is false, so a malformed event never overlaps anything.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::dates::{has_shape, parse_date};
use crate::event::{Event, EventForm};

/// A point in local wall-clock time, or the invalid sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Valid(NaiveDateTime),
    Invalid,
}

impl Timestamp {
    pub fn is_valid(&self) -> bool {
        matches!(self, Timestamp::Valid(_))
    }

    /// Strictly earlier. False whenever either side is invalid.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        match (self, other) {
            (Timestamp::Valid(a), Timestamp::Valid(b)) => a < b,
            _ => false,
        }
    }
}

/// Parse a strict `HH:MM` (or `HH:MM:SS`) time with two-digit fields.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    if has_shape(s, "dd:dd") {
        NaiveTime::parse_from_str(s, "%H:%M").ok()
    } else if has_shape(s, "dd:dd:dd") {
        NaiveTime::parse_from_str(s, "%H:%M:%S").ok()
    } else {
        None
    }
}

/// Combine a `YYYY-MM-DD` date and an `HH:MM` time.
pub fn parse_date_time(date: &str, time: &str) -> Timestamp {
    match (parse_date(date), parse_time(time)) {
        (Some(d), Some(t)) => Timestamp::Valid(NaiveDateTime::new(d, t)),
        _ => Timestamp::Invalid,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeRange {
    /// Half-open intersection: touching ranges do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start.is_before(&other.end) && other.start.is_before(&self.end)
    }
}

/// Anything that occupies a slot of wall-clock time on one calendar date.
pub trait Scheduled {
    fn date(&self) -> &str;
    fn start_time(&self) -> &str;
    fn end_time(&self) -> &str;

    fn calendar_date(&self) -> Option<NaiveDate> {
        parse_date(self.date())
    }

    fn time_range(&self) -> TimeRange {
        TimeRange {
            start: parse_date_time(self.date(), self.start_time()),
            end: parse_date_time(self.date(), self.end_time()),
        }
    }
}

impl Scheduled for EventForm {
    fn date(&self) -> &str {
        &self.date
    }

    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> &str {
        &self.end_time
    }
}

impl Scheduled for Event {
    fn date(&self) -> &str {
        &self.form.date
    }

    fn start_time(&self) -> &str {
        &self.form.start_time
    }

    fn end_time(&self) -> &str {
        &self.form.end_time
    }
}

pub fn event_time_range<S: Scheduled + ?Sized>(event: &S) -> TimeRange {
    event.time_range()
}

/// True when both events fall on the same date and their time ranges intersect.
pub fn is_overlapping<A, B>(a: &A, b: &B) -> bool
where
    A: Scheduled + ?Sized,
    B: Scheduled + ?Sized,
{
    // Both timestamps carry their date, so intersecting ranges imply the same day
    // for any event whose start precedes its end.
    a.time_range().overlaps(&b.time_range())
}

/// Known events that overlap `candidate`, in their original order.
///
/// No identity-based exclusion happens here: callers editing an event filter it out
/// of `known` first.
pub fn find_overlapping_events<'a, C>(candidate: &C, known: &'a [Event]) -> Vec<&'a Event>
where
    C: Scheduled + ?Sized,
{
    let range = candidate.time_range();
    if !range.start.is_valid() || !range.end.is_valid() {
        return Vec::new();
    }

    known
        .iter()
        .filter(|event| range.overlaps(&event.time_range()))
        .collect()
}

/// Overlaps for every candidate of an unsaved series, concatenated in candidate order.
/// An event clashing with several candidates is listed once per candidate.
pub fn find_overlapping_events_for_series<'a, C>(
    candidates: &[C],
    known: &'a [Event],
) -> Vec<&'a Event>
where
    C: Scheduled,
{
    candidates
        .iter()
        .flat_map(|candidate| find_overlapping_events(candidate, known))
        .collect()
}
