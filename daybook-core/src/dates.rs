//! Calendar arithmetic helpers shared by the month/week views and recurrence.

use std::fmt;

use chrono::{Datelike, Days, Month, NaiveDate};

use crate::error::{CalResult, CalendarError};
use crate::event::Event;

/// Parse a strict `YYYY-MM-DD` date. Anything else (one-digit fields, surrounding
/// whitespace, trailing input) is `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if !has_shape(s, "dddd-dd-dd") {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Byte-for-byte match against `shape`, where `d` stands for any ASCII digit.
pub(crate) fn has_shape(s: &str, shape: &str) -> bool {
    s.len() == shape.len()
        && s.bytes().zip(shape.bytes()).all(|(c, expected)| match expected {
            b'd' => c.is_ascii_digit(),
            other => c == other,
        })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> CalResult<u32> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::Validation(format!(
            "Invalid month {month}: month must be between 1 and 12"
        )));
    }

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .ok_or_else(|| CalendarError::Validation(format!("Year {year} is out of range")))
}

/// Last calendar day of the month containing `date`.
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(chrono::Months::new(1)))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// The Sunday-first week containing `date`.
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let sunday = date - Days::new(u64::from(date.weekday().num_days_from_sunday()));
    std::array::from_fn(|i| sunday + Days::new(i as u64))
}

/// Sunday-first grid of day numbers for the month containing `date`,
/// padded with `None` before the 1st and after the last day.
pub fn weeks_at_month(date: NaiveDate) -> Vec<[Option<u32>; 7]> {
    let first = date.with_day(1).unwrap_or(date);
    let days = last_day_of_month(date).day();
    let offset = first.weekday().num_days_from_sunday() as usize;

    let cells = offset + days as usize;
    let rows = cells.div_ceil(7);

    (0..rows)
        .map(|row| {
            std::array::from_fn(|col| {
                let cell = row * 7 + col;
                if cell < offset || cell >= cells {
                    None
                } else {
                    Some((cell - offset) as u32 + 1)
                }
            })
        })
        .collect()
}

/// Week-of-month position, attributed to the month holding the week's Thursday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekLabel {
    pub year: i32,
    pub month: u32,
    pub week: u32,
}

impl fmt::Display for WeekLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("?");
        write!(f, "{} {}, week {}", name, self.year, self.week)
    }
}

pub fn week_label(date: NaiveDate) -> WeekLabel {
    let thursday = week_dates(date)[4];
    WeekLabel {
        year: thursday.year(),
        month: thursday.month(),
        week: thursday.day().div_ceil(7),
    }
}

pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Events whose date falls on day-of-month `day`, in any month.
pub fn events_for_day(events: &[Event], day: u32) -> Vec<&Event> {
    events
        .iter()
        .filter(|e| parse_date(&e.date).is_some_and(|d| d.day() == day))
        .collect()
}
