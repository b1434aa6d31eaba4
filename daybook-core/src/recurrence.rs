//! Recurrence expansion for repeating events.
//!
//! Every occurrence is computed from the anchor (the start date) and its step index, so
//! month-length drift never accumulates: a series on the 31st stays on the 31st and simply
//! has no occurrence in shorter months, and a series on Feb 29 only lands in leap years.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};

use crate::constants::default_horizon;
use crate::dates::{format_date, last_day_of_month, parse_date};
use crate::error::{CalResult, CalendarError};
use crate::event::{RepeatInfo, RepeatType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// `None` for events that do not repeat.
    pub fn from_repeat_type(kind: RepeatType) -> Option<Self> {
        match kind {
            RepeatType::None => None,
            RepeatType::Daily => Some(Frequency::Daily),
            RepeatType::Weekly => Some(Frequency::Weekly),
            RepeatType::Monthly => Some(Frequency::Monthly),
            RepeatType::Yearly => Some(Frequency::Yearly),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        };
        f.write_str(s)
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<RepeatType>()
            .ok()
            .and_then(Frequency::from_repeat_type)
            .ok_or_else(|| {
                format!("Unknown frequency '{s}'. Expected daily, weekly, monthly or yearly")
            })
    }
}

/// A recurrence rule anchored on `start_date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub start_date: NaiveDate,
    /// Inclusive upper bound
    pub end_date: NaiveDate,
    pub frequency: Frequency,
    pub interval: u32,
    /// `None` means bounded by `end_date` only
    pub occurrences: Option<u32>,
    /// Monthly only: land on the last day of each target month
    pub last_day_of_month: bool,
}

/// Outcome of stepping the anchor forward.
enum Step {
    Date(NaiveDate),
    /// The target month has no day matching the anchor
    Skip { month_start: NaiveDate },
    /// Past the representable calendar
    Exhausted,
}

impl RecurrenceRule {
    /// Daily, every day, until the default horizon.
    pub fn new(start_date: NaiveDate) -> Self {
        RecurrenceRule {
            start_date,
            end_date: default_horizon(),
            frequency: Frequency::Daily,
            interval: 1,
            occurrences: None,
            last_day_of_month: false,
        }
    }

    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.end_date = end_date;
        self
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn every(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    pub fn times(mut self, occurrences: u32) -> Self {
        self.occurrences = Some(occurrences);
        self
    }

    pub fn last_day_of_month(mut self, last_day_of_month: bool) -> Self {
        self.last_day_of_month = last_day_of_month;
        self
    }

    pub fn validate(&self) -> CalResult<()> {
        if self.interval == 0 {
            return Err(CalendarError::Validation(
                "Repeat interval must be at least 1".into(),
            ));
        }
        if self.occurrences == Some(0) {
            return Err(CalendarError::Validation(
                "Repeat count must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Build a rule from an event form's date and repeat settings.
    ///
    /// Returns `Ok(None)` when the start date or explicit end date does not parse: an
    /// invalid bound compares false to every date, so such a series has no occurrences.
    /// An empty end date means "no end date" and falls back to `horizon`.
    pub fn from_repeat(
        date: &str,
        repeat: &RepeatInfo,
        horizon: NaiveDate,
    ) -> CalResult<Option<Self>> {
        let Some(frequency) = Frequency::from_repeat_type(repeat.kind) else {
            return Err(CalendarError::Validation(
                "Event does not repeat; there is no rule to expand".into(),
            ));
        };

        let Some(start_date) = parse_date(date) else {
            return Ok(None);
        };

        let end_date = match repeat.end_date.as_deref() {
            None => horizon,
            Some(s) if s.trim().is_empty() => horizon,
            Some(s) => match parse_date(s) {
                Some(d) => d,
                None => return Ok(None),
            },
        };

        let mut rule = RecurrenceRule::new(start_date)
            .until(end_date)
            .frequency(frequency)
            .every(repeat.interval)
            .last_day_of_month(repeat.last_day_of_month);
        if let Some(count) = repeat.count {
            rule = rule.times(count);
        }

        rule.validate()?;
        Ok(Some(rule))
    }

    /// Expand the rule into its ordered occurrence dates.
    pub fn dates(&self) -> CalResult<Vec<NaiveDate>> {
        self.validate()?;

        let limit = self.occurrences.map(|n| n as usize);
        let mut dates = Vec::new();
        let mut step: u64 = 0;

        loop {
            if limit.is_some_and(|n| dates.len() >= n) {
                break;
            }

            match self.occurrence(step) {
                Step::Date(date) => {
                    if date > self.end_date {
                        break;
                    }
                    dates.push(date);
                }
                Step::Skip { month_start } => {
                    if month_start > self.end_date {
                        break;
                    }
                    tracing::trace!(step, month = %month_start.format("%Y-%m"), "No matching day, skipping");
                }
                Step::Exhausted => break,
            }

            step += 1;
        }

        tracing::debug!(
            start = %self.start_date,
            end = %self.end_date,
            frequency = %self.frequency,
            interval = self.interval,
            count = dates.len(),
            "Expanded recurrence"
        );

        Ok(dates)
    }

    /// The candidate for step `step`, computed fresh from the anchor.
    fn occurrence(&self, step: u64) -> Step {
        if step == 0 {
            return Step::Date(self.start_date);
        }

        let units = step * u64::from(self.interval);

        match self.frequency {
            Frequency::Daily => add_days(self.start_date, units),
            Frequency::Weekly => match units.checked_mul(7) {
                Some(days) => add_days(self.start_date, days),
                None => Step::Exhausted,
            },
            Frequency::Monthly => {
                let Some((year, month)) = shift_month(self.start_date, units) else {
                    return Step::Exhausted;
                };
                let Some(month_start) = NaiveDate::from_ymd_opt(year, month, 1) else {
                    return Step::Exhausted;
                };

                if self.last_day_of_month {
                    return Step::Date(last_day_of_month(month_start));
                }

                match month_start.with_day(self.start_date.day()) {
                    Some(date) => Step::Date(date),
                    None => Step::Skip { month_start },
                }
            }
            Frequency::Yearly => {
                let Some(year) = i32::try_from(units)
                    .ok()
                    .and_then(|n| self.start_date.year().checked_add(n))
                else {
                    return Step::Exhausted;
                };
                let month = self.start_date.month();
                let Some(month_start) = NaiveDate::from_ymd_opt(year, month, 1) else {
                    return Step::Exhausted;
                };

                match month_start.with_day(self.start_date.day()) {
                    Some(date) => Step::Date(date),
                    None => Step::Skip { month_start },
                }
            }
        }
    }
}

fn add_days(date: NaiveDate, days: u64) -> Step {
    match date.checked_add_days(Days::new(days)) {
        Some(d) => Step::Date(d),
        None => Step::Exhausted,
    }
}

/// Year and month `months` after the month of `date`.
fn shift_month(date: NaiveDate, months: u64) -> Option<(i32, u32)> {
    let base = i64::from(date.year()) * 12 + i64::from(date.month0());
    let total = base.checked_add(i64::try_from(months).ok()?)?;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    Some((year, month))
}

/// Expand `rule` into `YYYY-MM-DD` strings.
pub fn generate_recurrence_dates(rule: &RecurrenceRule) -> CalResult<Vec<String>> {
    Ok(rule.dates()?.into_iter().map(format_date).collect())
}
