use anyhow::Result;
use daybook_core::overlap::parse_time;
use daybook_core::store::EventStore;
use daybook_core::validation::time_error_messages;
use daybook_core::{Event, EventForm, RepeatEditMode};
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::utils::pluralize;

/// What is being checked against the stored events.
pub enum Target {
    New(EventForm),
    Edit(Event, RepeatEditMode),
}

impl Target {
    fn form(&self) -> &EventForm {
        match self {
            Target::New(form) => form,
            Target::Edit(event, _) => &event.form,
        }
    }
}

pub fn run(store: &EventStore, target: Target, json: bool) -> Result<()> {
    let form = target.form();
    validate_times(&form.start_time, &form.end_time)?;

    let conflicts = match &target {
        Target::New(form) => store.conflicts(form)?,
        Target::Edit(event, mode) => store.conflicts_for_edit(event, *mode),
    };
    tracing::debug!(count = conflicts.len(), "Checked for conflicts");

    if json {
        println!("{}", serde_json::to_string_pretty(&conflicts)?);
        return Ok(());
    }

    let title = &target.form().title;
    if conflicts.is_empty() {
        println!("{} No conflicts for {}", "✓".green(), title.bold());
        return Ok(());
    }

    let label = format!(
        "{} conflicting {}",
        conflicts.len(),
        pluralize("event", conflicts.len())
    );
    println!("{} {}", "!".red(), label.red());
    for event in &conflicts {
        println!("   {}", event.render());
    }

    Ok(())
}

fn validate_times(start: &str, end: &str) -> Result<()> {
    for time in [start, end] {
        if parse_time(time).is_none() {
            anyhow::bail!("Invalid time '{time}'. Expected HH:MM");
        }
    }

    if let Some(message) = time_error_messages(start, end).start_time_error {
        anyhow::bail!(message);
    }

    Ok(())
}
