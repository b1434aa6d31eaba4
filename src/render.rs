//! Colored terminal rendering for daybook-core types.

use daybook_core::Event;
use daybook_core::dates::WeekLabel;
use daybook_core::notification::Notification;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let time = format!("{}-{}", self.start_time, self.end_time);
        let mut line = format!("{} {} {}", self.date.dimmed(), time, self.title.bold());

        if !self.location.is_empty() {
            line.push_str(&format!(" @ {}", self.location));
        }
        if let Some(series_id) = self.series_id() {
            line.push_str(&format!(" {}", format!("[series {}]", short_id(series_id)).dimmed()));
        }

        line
    }
}

impl Render for Notification {
    fn render(&self) -> String {
        format!("{} {}", "⏰".yellow(), self.message)
    }
}

impl Render for WeekLabel {
    fn render(&self) -> String {
        self.to_string().dimmed().to_string()
    }
}

/// First segment of a UUID, enough to tell series apart on screen.
fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_takes_first_segment() {
        assert_eq!(short_id("3f2b8c1e-0000-4000-8000-000000000000"), "3f2b8c1e");
        assert_eq!(short_id("plain"), "plain");
    }
}
