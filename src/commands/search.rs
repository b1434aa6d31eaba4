use anyhow::Result;
use chrono::NaiveDate;
use daybook_core::Event;
use daybook_core::dates::{month_label, week_label};
use daybook_core::search::{CalendarView, filter_events};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(events: &[Event], query: &str, current: NaiveDate, view: CalendarView) -> Result<()> {
    let mut found = filter_events(events, query, current, view);
    found.sort_by(|a, b| (&a.date, &a.start_time).cmp(&(&b.date, &b.start_time)));

    let heading = match view {
        CalendarView::Week => week_label(current).to_string(),
        CalendarView::Month => month_label(current),
    };
    println!("{}", heading.bold());

    if found.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in found {
        println!("  {}", event.render());
    }

    Ok(())
}
