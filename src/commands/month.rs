use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use daybook_core::Event;
use daybook_core::date_range::DateRange;
use daybook_core::dates::{events_for_day, month_label, week_label, weeks_at_month};
use owo_colors::OwoColorize;

use crate::render::Render;

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub fn run(events: &[Event], current: NaiveDate) -> Result<()> {
    println!("{}", month_label(current).bold());
    println!("{}", WEEKDAYS.join(" "));

    let range = DateRange::month_of(current);
    let in_month: Vec<Event> = events
        .iter()
        .filter(|e| range.contains_str(&e.date))
        .cloned()
        .collect();

    for week in weeks_at_month(current) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(day) if !events_for_day(&in_month, *day).is_empty() => {
                    format!("{day:>2}").yellow().to_string()
                }
                Some(day) => format!("{day:>2}"),
                None => "  ".to_string(),
            })
            .collect();

        let label = week_start(&week, current).map(week_label);
        match label {
            Some(label) => println!("{}  {}", row.join(" "), label.render()),
            None => println!("{}", row.join(" ")),
        }
    }

    for day in 1..=range.to.day() {
        let mut today = events_for_day(&in_month, day);
        if today.is_empty() {
            continue;
        }
        today.sort_by(|a, b| a.start_time.cmp(&b.start_time));

        println!();
        for event in today {
            println!("  {}", event.render());
        }
    }

    Ok(())
}

/// Any in-month date of a grid row, used to label its week.
fn week_start(week: &[Option<u32>; 7], current: NaiveDate) -> Option<NaiveDate> {
    let day = week.iter().flatten().next()?;
    current.with_day(*day)
}
