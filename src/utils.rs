//! Argument parsing helpers shared by the commands.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use daybook_core::dates::parse_date;
use daybook_core::overlap::{Timestamp, parse_date_time};

pub fn parse_day(s: &str) -> Result<NaiveDate> {
    parse_date(s).ok_or_else(|| anyhow::anyhow!("Invalid date '{s}'. Expected YYYY-MM-DD"))
}

/// A missing value is fine; a present one must parse.
pub fn parse_optional_day(s: Option<&str>) -> Result<Option<NaiveDate>> {
    s.map(parse_day).transpose()
}

pub fn day_or_today(s: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match s {
        Some(s) => parse_day(s),
        None => Ok(today),
    }
}

/// Parse `YYYY-MM-DDTHH:MM` (a space works in place of the `T`).
pub fn parse_instant(s: &str) -> Result<NaiveDateTime> {
    let invalid = || anyhow::anyhow!("Invalid moment '{s}'. Expected YYYY-MM-DDTHH:MM");

    let (date, time) = s
        .trim()
        .split_once(|c: char| c == 'T' || c == ' ')
        .ok_or_else(invalid)?;

    match parse_date_time(date, time) {
        Timestamp::Valid(instant) => Ok(instant),
        Timestamp::Invalid => Err(invalid()),
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
