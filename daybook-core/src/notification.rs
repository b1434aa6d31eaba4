//! Which events are due for a reminder.
//!
//! Only the predicate lives here; polling and delivery belong to whatever hosts it.

use chrono::NaiveDateTime;

use crate::event::Event;
use crate::overlap::{Scheduled, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub message: String,
}

/// Events not yet notified whose start lies in `(now, now + notification_time]`.
pub fn upcoming_events<'a>(
    events: &'a [Event],
    now: NaiveDateTime,
    notified_ids: &[String],
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| !notified_ids.contains(&event.id))
        .filter(|event| match event.time_range().start {
            Timestamp::Valid(start) => {
                let minutes_until = (start - now).num_seconds() as f64 / 60.0;
                minutes_until > 0.0 && minutes_until <= f64::from(event.notification_time)
            }
            Timestamp::Invalid => false,
        })
        .collect()
}

pub fn notification_message(event: &Event) -> String {
    let unit = if event.notification_time == 1 {
        "minute"
    } else {
        "minutes"
    };
    format!(
        "{} starts in {} {}",
        event.title, event.notification_time, unit
    )
}

/// Notifications for every upcoming event, in event order.
pub fn collect_notifications(
    events: &[Event],
    now: NaiveDateTime,
    notified_ids: &[String],
) -> Vec<Notification> {
    upcoming_events(events, now, notified_ids)
        .into_iter()
        .map(|event| Notification {
            id: event.id.clone(),
            message: notification_message(event),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventForm;
    use crate::overlap::parse_date_time;

    fn event(id: &str, start: &str, end: &str, notify: u32) -> Event {
        let mut form = EventForm::new(format!("event {id}"), "2024-07-10", start, end);
        form.notification_time = notify;
        form.into_event(id)
    }

    fn noon() -> NaiveDateTime {
        match parse_date_time("2024-07-10", "12:00") {
            Timestamp::Valid(t) => t,
            Timestamp::Invalid => unreachable!(),
        }
    }

    fn ids<'a>(events: &[&'a Event]) -> Vec<&'a str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn due_exactly_at_lead_time() {
        let events = vec![
            event("1", "12:10", "13:00", 10),
            event("2", "13:00", "14:00", 60),
            event("3", "14:00", "15:00", 120),
        ];

        assert_eq!(ids(&upcoming_events(&events, noon(), &[])), vec!["1", "2", "3"]);
    }

    #[test]
    fn already_notified_are_skipped() {
        let events = vec![
            event("1", "12:10", "13:00", 10),
            event("2", "13:00", "14:00", 60),
            event("3", "14:00", "15:00", 120),
        ];

        let notified = vec!["1".to_string()];
        assert_eq!(ids(&upcoming_events(&events, noon(), &notified)), vec!["2", "3"]);
    }

    #[test]
    fn not_yet_due() {
        let events = vec![
            event("1", "12:10", "13:00", 10),
            event("2", "13:00", "14:00", 60),
            event("3", "14:00", "15:00", 60),
        ];

        assert_eq!(ids(&upcoming_events(&events, noon(), &[])), vec!["1", "2"]);
    }

    #[test]
    fn started_events_are_not_due() {
        let events = vec![
            event("1", "12:00", "13:00", 10),
            event("2", "13:00", "14:00", 60),
            event("3", "14:00", "15:00", 60),
        ];

        assert_eq!(ids(&upcoming_events(&events, noon(), &[])), vec!["2"]);
    }

    #[test]
    fn invalid_start_is_never_due() {
        let events = vec![event("1", "12:xx", "13:00", 10)];
        assert!(upcoming_events(&events, noon(), &[]).is_empty());
    }

    #[test]
    fn message_and_collection() {
        let events = vec![event("1", "12:05", "13:00", 10)];

        let notifications = collect_notifications(&events, noon(), &[]);
        assert_eq!(
            notifications,
            vec![Notification {
                id: "1".into(),
                message: "event 1 starts in 10 minutes".into(),
            }]
        );
    }
}
