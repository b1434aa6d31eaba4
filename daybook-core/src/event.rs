//! Event records.
//!
//! These mirror the records the calendar front end stores: dates and times stay as the
//! strings the user typed and are only parsed when an algorithm needs them, so a bad value
//! degrades to "never overlaps" instead of failing the whole load.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_NOTIFICATION_MINUTES;
use crate::error::CalResult;

/// How often a series repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatType {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RepeatType {
    pub fn is_repeating(&self) -> bool {
        !matches!(self, RepeatType::None)
    }
}

impl fmt::Display for RepeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RepeatType::None => "none",
            RepeatType::Daily => "daily",
            RepeatType::Weekly => "weekly",
            RepeatType::Monthly => "monthly",
            RepeatType::Yearly => "yearly",
        };
        f.write_str(s)
    }
}

impl FromStr for RepeatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(RepeatType::None),
            "daily" => Ok(RepeatType::Daily),
            "weekly" => Ok(RepeatType::Weekly),
            "monthly" => Ok(RepeatType::Monthly),
            "yearly" => Ok(RepeatType::Yearly),
            other => Err(format!(
                "Unknown repeat type '{other}'. Expected none, daily, weekly, monthly or yearly"
            )),
        }
    }
}

/// Which members of a series an edit applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatEditMode {
    All,
    #[default]
    Single,
}

impl FromStr for RepeatEditMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(RepeatEditMode::All),
            "single" => Ok(RepeatEditMode::Single),
            other => Err(format!("Unknown edit mode '{other}'. Expected all or single")),
        }
    }
}

fn default_interval() -> u32 {
    1
}

fn default_notification_time() -> u32 {
    DEFAULT_NOTIFICATION_MINUTES
}

/// Recurrence settings attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatInfo {
    /// Series id shared by every event expanded from the same rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: RepeatType,
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Monthly series land on the last day of each month
    #[serde(
        default,
        rename = "isLastDayOfMonth",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub last_day_of_month: bool,
}

impl Default for RepeatInfo {
    fn default() -> Self {
        RepeatInfo {
            id: None,
            kind: RepeatType::None,
            interval: 1,
            end_date: None,
            count: None,
            last_day_of_month: false,
        }
    }
}

impl RepeatInfo {
    pub fn series_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// An event that has not been saved yet (no id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub repeat: RepeatInfo,
    /// Minutes before the start at which to notify
    #[serde(default = "default_notification_time")]
    pub notification_time: u32,
}

impl EventForm {
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        EventForm {
            title: title.into(),
            date: date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            description: String::new(),
            location: String::new(),
            category: String::new(),
            repeat: RepeatInfo::default(),
            notification_time: DEFAULT_NOTIFICATION_MINUTES,
        }
    }

    pub fn with_repeat(mut self, repeat: RepeatInfo) -> Self {
        self.repeat = repeat;
        self
    }

    /// Attach an id, turning the form into a stored event.
    pub fn into_event(self, id: impl Into<String>) -> Event {
        Event {
            id: id.into(),
            form: self,
        }
    }
}

/// A stored event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(flatten)]
    pub form: EventForm,
}

impl std::ops::Deref for Event {
    type Target = EventForm;

    fn deref(&self) -> &Self::Target {
        &self.form
    }
}

impl std::ops::DerefMut for Event {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.form
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}-{})",
            self.title, self.date, self.start_time, self.end_time
        )
    }
}

impl Event {
    pub fn series_id(&self) -> Option<&str> {
        self.repeat.series_id()
    }
}

/// The `{ "events": [...] }` document the event API serves.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EventsFile {
    #[serde(default)]
    pub events: Vec<Event>,
}

impl EventsFile {
    /// Read a snapshot of events. A missing file is an empty calendar.
    pub fn load(path: &Path) -> CalResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Events file not found, starting empty");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let file: EventsFile = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), count = file.events.len(), "Loaded events");
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_api_record() {
        let json = r#"{
            "id": "1",
            "title": "Standup",
            "date": "2024-07-19",
            "startTime": "09:00",
            "endTime": "09:15",
            "description": "daily sync",
            "location": "room 3",
            "category": "work",
            "repeat": { "id": "s-1", "type": "daily", "interval": 1, "endDate": "2024-07-26" },
            "notificationTime": 5
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "1");
        assert_eq!(event.start_time, "09:00");
        assert_eq!(event.repeat.kind, RepeatType::Daily);
        assert_eq!(event.series_id(), Some("s-1"));
        assert_eq!(event.repeat.end_date.as_deref(), Some("2024-07-26"));
        assert_eq!(event.repeat.count, None);
        assert_eq!(event.notification_time, 5);
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let json = r#"{
            "id": "2",
            "title": "Lunch",
            "date": "2024-07-19",
            "startTime": "12:00",
            "endTime": "13:00"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.repeat, RepeatInfo::default());
        assert_eq!(event.notification_time, DEFAULT_NOTIFICATION_MINUTES);
        assert!(event.description.is_empty());
    }

    #[test]
    fn serializes_flat_camel_case() {
        let event = EventForm::new("Lunch", "2024-07-19", "12:00", "13:00").into_event("e1");
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["id"], "e1");
        assert_eq!(value["startTime"], "12:00");
        assert_eq!(value["repeat"]["type"], "none");
        assert!(value["repeat"].get("id").is_none());
    }

    #[test]
    fn repeat_type_from_str() {
        assert_eq!("Weekly".parse::<RepeatType>().unwrap(), RepeatType::Weekly);
        assert_eq!("none".parse::<RepeatType>().unwrap(), RepeatType::None);
        assert!("fortnightly".parse::<RepeatType>().is_err());
    }

    #[test]
    fn edit_mode_from_str() {
        assert_eq!("ALL".parse::<RepeatEditMode>().unwrap(), RepeatEditMode::All);
        assert!("some".parse::<RepeatEditMode>().is_err());
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = EventsFile::load(&dir.path().join("events.json")).unwrap();
        assert!(file.events.is_empty());
    }

    #[test]
    fn load_reads_events_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"{"events":[{"id":"a","title":"A","date":"2024-07-01","startTime":"10:00","endTime":"11:00"}]}"#,
        )
        .unwrap();

        let file = EventsFile::load(&path).unwrap();
        assert_eq!(file.events.len(), 1);
        assert_eq!(file.events[0].title, "A");
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = EventsFile::load(&path).unwrap_err();
        assert!(matches!(err, crate::error::CalendarError::Serialization(_)));
    }
}
