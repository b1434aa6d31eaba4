use anyhow::Result;
use daybook_core::{RecurrenceRule, generate_recurrence_dates};
use owo_colors::OwoColorize;

use crate::utils::pluralize;

pub fn run(rule: &RecurrenceRule, json: bool) -> Result<()> {
    let dates = generate_recurrence_dates(rule)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dates)?);
        return Ok(());
    }

    if dates.is_empty() {
        println!("{}", "No dates in range".dimmed());
        return Ok(());
    }

    println!("{}", summary(rule, dates.len()).bold());
    for date in &dates {
        println!("  {date}");
    }

    Ok(())
}

fn summary(rule: &RecurrenceRule, count: usize) -> String {
    let every = if rule.interval == 1 {
        rule.frequency.to_string()
    } else {
        format!("{} (every {})", rule.frequency, rule.interval)
    };

    format!(
        "{} {} {}, {} to {}",
        count,
        every,
        pluralize("date", count),
        rule.start_date,
        rule.end_date
    )
}
