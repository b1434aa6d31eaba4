use anyhow::Result;
use chrono::NaiveDateTime;
use daybook_core::Event;
use daybook_core::notification::collect_notifications;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(events: &[Event], now: NaiveDateTime) -> Result<()> {
    // Each invocation is a fresh poll, so nothing has been notified yet
    let notifications = collect_notifications(events, now, &[]);

    if notifications.is_empty() {
        println!("{}", "Nothing coming up".dimmed());
        return Ok(());
    }

    for notification in &notifications {
        println!("{}", notification.render());
    }

    Ok(())
}
