//! Search and calendar-view filtering.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::date_range::DateRange;
use crate::event::Event;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalendarView {
    Week,
    #[default]
    Month,
}

impl CalendarView {
    /// The dates visible in this view around `current`.
    pub fn range(&self, current: NaiveDate) -> DateRange {
        match self {
            CalendarView::Week => DateRange::week_of(current),
            CalendarView::Month => DateRange::month_of(current),
        }
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarView::Week => f.write_str("week"),
            CalendarView::Month => f.write_str("month"),
        }
    }
}

impl FromStr for CalendarView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "week" => Ok(CalendarView::Week),
            "month" => Ok(CalendarView::Month),
            other => Err(format!("Unknown view '{other}'. Expected week or month")),
        }
    }
}

/// Case-insensitive substring match on title, description or location.
/// An empty term matches everything.
pub fn search_events<'a>(events: &'a [Event], term: &str) -> Vec<&'a Event> {
    let term = term.trim().to_lowercase();

    events
        .iter()
        .filter(|e| term.is_empty() || matches_term(e, &term))
        .collect()
}

fn matches_term(event: &Event, term: &str) -> bool {
    [&event.title, &event.description, &event.location]
        .iter()
        .any(|field| field.to_lowercase().contains(term))
}

/// Events matching `term` that are visible in `view` around `current`.
pub fn filter_events<'a>(
    events: &'a [Event],
    term: &str,
    current: NaiveDate,
    view: CalendarView,
) -> Vec<&'a Event> {
    let range = view.range(current);

    search_events(events, term)
        .into_iter()
        .filter(|e| range.contains_str(&e.date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventForm;

    fn event(id: &str, date: &str) -> Event {
        EventForm::new(format!("event {id}"), date, "10:00", "11:00").into_event(id)
    }

    fn titled(id: &str, date: &str, title: &str) -> Event {
        let mut e = event(id, date);
        e.title = title.into();
        e
    }

    fn described(id: &str, date: &str, description: &str) -> Event {
        let mut e = event(id, date);
        e.description = description.into();
        e
    }

    fn ids<'a>(events: &[&'a Event]) -> Vec<&'a str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    fn d(s: &str) -> NaiveDate {
        crate::dates::parse_date(s).unwrap()
    }

    #[test]
    fn term_matches_title_or_description() {
        let events = vec![
            titled("1", "2024-02-02", "Event 2"),
            described("2", "2024-02-05", "Event 2"),
            event("3", "2024-02-07"),
        ];

        let found = filter_events(&events, "Event 2", d("2024-02-11"), CalendarView::Month);
        assert_eq!(ids(&found), vec!["1", "2"]);
    }

    #[test]
    fn term_matches_location() {
        let mut e = event("1", "2024-02-02");
        e.location = "Room 101".into();
        let events = vec![e, event("2", "2024-02-02")];

        assert_eq!(ids(&search_events(&events, "room")), vec!["1"]);
    }

    #[test]
    fn term_is_case_insensitive() {
        let events = vec![
            titled("1", "2024-07-02", "ABC"),
            described("2", "2024-07-03", "abc"),
        ];

        let found = filter_events(&events, "abc", d("2024-07-01"), CalendarView::Month);
        assert_eq!(ids(&found), vec!["1", "2"]);
    }

    #[test]
    fn week_view_keeps_current_week() {
        let events = vec![
            event("1", "2024-07-02"),
            event("2", "2024-07-03"),
            event("3", "2024-07-28"),
        ];

        let found = filter_events(&events, "", d("2024-07-01"), CalendarView::Week);
        assert_eq!(ids(&found), vec!["1", "2"]);
    }

    #[test]
    fn month_view_keeps_current_month() {
        let events = vec![
            event("1", "2024-07-02"),
            event("2", "2024-07-03"),
            event("3", "2024-07-28"),
            event("4", "2024-08-02"),
        ];

        let found = filter_events(&events, "", d("2024-07-01"), CalendarView::Month);
        assert_eq!(ids(&found), vec!["1", "2", "3"]);
    }

    #[test]
    fn term_and_week_combine() {
        let events = vec![
            titled("1", "2024-07-02", "Event 2"),
            described("2", "2024-07-03", "Event 2"),
            titled("3", "2024-07-04", "Event 1"),
            titled("4", "2024-07-28", "Event 2"),
            event("5", "2024-08-02"),
        ];

        let found = filter_events(&events, "Event 2", d("2024-07-01"), CalendarView::Week);
        assert_eq!(ids(&found), vec!["1", "2"]);
    }

    #[test]
    fn month_boundary() {
        let events = vec![event("1", "2024-07-01"), event("2", "2024-06-30")];

        let found = filter_events(&events, "", d("2024-06-30"), CalendarView::Month);
        assert_eq!(ids(&found), vec!["2"]);
    }

    #[test]
    fn empty_input() {
        assert!(filter_events(&[], "", d("2024-07-01"), CalendarView::Month).is_empty());
    }

    #[test]
    fn view_from_str() {
        assert_eq!("Week".parse::<CalendarView>().unwrap(), CalendarView::Week);
        assert!("year".parse::<CalendarView>().is_err());
    }
}
