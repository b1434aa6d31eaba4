//! Date range for filtering events.

use chrono::{Datelike, NaiveDate};

use crate::dates::{last_day_of_month, parse_date, week_dates};

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        DateRange { from, to }
    }

    /// The Sunday-Saturday week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        let week = week_dates(date);
        DateRange {
            from: week[0],
            to: week[6],
        }
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        DateRange {
            from: date.with_day(1).unwrap_or(date),
            to: last_day_of_month(date),
        }
    }

    /// Inclusive on both ends. An inverted range contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    pub fn contains_str(&self, date: &str) -> bool {
        parse_date(date).is_some_and(|d| self.contains(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn contains_is_inclusive() {
        let range = DateRange::new(d("2024-07-01"), d("2024-07-31"));
        assert!(range.contains(d("2024-07-10")));
        assert!(range.contains(d("2024-07-01")));
        assert!(range.contains(d("2024-07-31")));
        assert!(!range.contains(d("2024-06-30")));
        assert!(!range.contains(d("2024-08-01")));
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let range = DateRange::new(d("2024-07-01"), d("2024-06-30"));
        assert!(!range.contains(d("2024-08-01")));
        assert!(!range.contains(d("2024-07-01")));
    }

    #[test]
    fn contains_str_ignores_invalid_dates() {
        let range = DateRange::month_of(d("2024-07-15"));
        assert!(range.contains_str("2024-07-02"));
        assert!(!range.contains_str("2024-07-99"));
    }

    #[test]
    fn week_and_month_bounds() {
        assert_eq!(
            DateRange::week_of(d("2024-07-01")),
            DateRange::new(d("2024-06-30"), d("2024-07-06"))
        );
        assert_eq!(
            DateRange::month_of(d("2024-02-10")),
            DateRange::new(d("2024-02-01"), d("2024-02-29"))
        );
    }
}
