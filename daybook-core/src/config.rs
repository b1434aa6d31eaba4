//! Global daybook configuration.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_NOTIFICATION_MINUTES, default_horizon};
use crate::dates::parse_date;
use crate::error::{CalResult, CalendarError};

static DEFAULT_EVENTS_FILE: &str = "~/.local/share/daybook/events.json";
static DEFAULT_HORIZON: &str = "2025-06-30";
static DEFAULT_LOG_LEVEL: &str = "warn";

fn default_events_file() -> PathBuf {
    PathBuf::from(DEFAULT_EVENTS_FILE)
}

fn default_horizon_string() -> String {
    DEFAULT_HORIZON.to_string()
}

fn default_notification_minutes() -> u32 {
    DEFAULT_NOTIFICATION_MINUTES
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Configuration at ~/.config/daybook/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DaybookConfig {
    #[serde(default = "default_events_file")]
    pub events_file: PathBuf,

    /// Last date generated for series without an end date (YYYY-MM-DD)
    #[serde(default = "default_horizon_string")]
    pub horizon: String,

    #[serde(default = "default_notification_minutes")]
    pub default_notification_minutes: u32,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DaybookConfig {
    fn default() -> Self {
        DaybookConfig {
            events_file: default_events_file(),
            horizon: default_horizon_string(),
            default_notification_minutes: default_notification_minutes(),
            log_level: default_log_level(),
        }
    }
}

impl DaybookConfig {
    pub fn config_path() -> CalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalendarError::Config("Could not determine config directory".into()))?
            .join("daybook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/daybook/config.toml, writing a commented default on first run.
    pub fn load() -> CalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> CalResult<Self> {
        let config: DaybookConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| CalendarError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalendarError::Config(e.to_string()))?;

        config.horizon_date()?;
        Ok(config)
    }

    /// The events file with `~` expanded.
    pub fn events_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.events_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn horizon_date(&self) -> CalResult<NaiveDate> {
        if self.horizon.trim().is_empty() {
            return Ok(default_horizon());
        }

        parse_date(&self.horizon).ok_or_else(|| {
            CalendarError::Config(format!(
                "Invalid horizon '{}'. Expected YYYY-MM-DD",
                self.horizon
            ))
        })
    }

    /// Update one key from its string form, validating the value.
    pub fn set(&mut self, key: &str, value: &str) -> CalResult<()> {
        match key {
            "events_file" => self.events_file = PathBuf::from(value),
            "horizon" => {
                parse_date(value).ok_or_else(|| {
                    CalendarError::Config(format!("Invalid horizon '{value}'. Expected YYYY-MM-DD"))
                })?;
                self.horizon = value.to_string();
            }
            "default_notification_minutes" => {
                self.default_notification_minutes = value.parse().map_err(|_| {
                    CalendarError::Config(format!(
                        "Invalid default_notification_minutes '{value}'. Expected a whole number"
                    ))
                })?;
            }
            "log_level" => self.log_level = value.to_string(),
            other => {
                return Err(CalendarError::Config(format!(
                    "Unknown config key '{other}'. Expected events_file, horizon, \
                     default_notification_minutes or log_level"
                )));
            }
        }

        tracing::debug!(key, value, "Updated config value");
        Ok(())
    }

    pub fn save(&self, path: &Path) -> CalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CalendarError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalResult<()> {
        let contents = format!(
            "\
# daybook configuration

# Events to read (JSON with an \"events\" array):
# events_file = \"{DEFAULT_EVENTS_FILE}\"

# Last date generated for repeating events without an end date:
# horizon = \"{DEFAULT_HORIZON}\"

# Reminder lead time for new events, in minutes:
# default_notification_minutes = {DEFAULT_NOTIFICATION_MINUTES}

# Log level (RUST_LOG takes precedence):
# log_level = \"{DEFAULT_LOG_LEVEL}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalendarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        tracing::debug!(path = %path.display(), "Created default config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- load ---

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DaybookConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, DaybookConfig::default());
    }

    #[test]
    fn default_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        DaybookConfig::create_default_config(&path).unwrap();
        let config = DaybookConfig::load_from(&path).unwrap();

        assert_eq!(config, DaybookConfig::default());
        assert_eq!(config.horizon_date().unwrap(), default_horizon());
    }

    #[test]
    fn values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "events_file = \"/tmp/events.json\"\nhorizon = \"2026-01-31\"\nlog_level = \"debug\"\n",
        )
        .unwrap();

        let config = DaybookConfig::load_from(&path).unwrap();
        assert_eq!(config.events_path(), PathBuf::from("/tmp/events.json"));
        assert_eq!(
            config.horizon_date().unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
        );
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.default_notification_minutes, 10);
    }

    #[test]
    fn bad_horizon_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "horizon = \"30/06/2025\"\n").unwrap();

        let err = DaybookConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, CalendarError::Config(_)));
    }

    // --- save ---

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = DaybookConfig {
            default_notification_minutes: 30,
            ..DaybookConfig::default()
        };

        config.save(&path).unwrap();
        assert_eq!(DaybookConfig::load_from(&path).unwrap(), config);
    }

    // --- set ---

    #[test]
    fn set_updates_known_keys() {
        let mut config = DaybookConfig::default();

        config.set("horizon", "2026-12-31").unwrap();
        config.set("default_notification_minutes", "15").unwrap();
        config.set("log_level", "debug").unwrap();
        config.set("events_file", "/tmp/mine.json").unwrap();

        assert_eq!(
            config.horizon_date().unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
        );
        assert_eq!(config.default_notification_minutes, 15);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.events_path(), PathBuf::from("/tmp/mine.json"));
    }

    #[test]
    fn set_rejects_bad_values_without_changes() {
        let mut config = DaybookConfig::default();

        assert!(config.set("horizon", "2026-12-1").is_err());
        assert!(config.set("default_notification_minutes", "soon").is_err());
        assert!(config.set("calendar_dir", "~/cal").is_err());
        assert_eq!(config, DaybookConfig::default());
    }

    #[test]
    fn set_then_save_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        DaybookConfig::create_default_config(&path).unwrap();

        let mut config = DaybookConfig::load_from(&path).unwrap();
        config.set("default_notification_minutes", "45").unwrap();
        config.save(&path).unwrap();

        let reloaded = DaybookConfig::load_from(&path).unwrap();
        assert_eq!(reloaded.default_notification_minutes, 45);
    }

    // --- paths ---

    #[test]
    fn events_path_expands_tilde() {
        let config = DaybookConfig::default();
        assert!(!config.events_path().to_string_lossy().starts_with('~'));
    }
}
