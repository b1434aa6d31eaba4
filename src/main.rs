mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use daybook_core::config::DaybookConfig;
use daybook_core::search::CalendarView;
use daybook_core::store::EventStore;
use daybook_core::{
    EventForm, EventsFile, Frequency, RecurrenceRule, RepeatEditMode, RepeatInfo, RepeatType,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Expand repeating events and check your daybook for clashes")]
struct Cli {
    /// Events file to read (defaults to events_file from the config)
    #[arg(long, global = true)]
    events: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dates a repeating event falls on
    Repeat {
        /// First date (YYYY-MM-DD)
        start: String,

        /// Last possible date (YYYY-MM-DD, defaults to the configured horizon)
        #[arg(long)]
        until: Option<String>,

        #[arg(short, long, default_value = "daily")]
        frequency: Frequency,

        #[arg(short, long, default_value_t = 1)]
        interval: u32,

        /// Stop after this many dates
        #[arg(short = 'n', long)]
        count: Option<u32>,

        /// Land on the last day of each month (monthly only)
        #[arg(long)]
        last_day: bool,

        /// Print the dates as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// List known events that clash with a new event or series
    Check {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Start time (HH:MM)
        start: String,

        /// End time (HH:MM)
        end: String,

        /// Title of a new event (edits keep the stored title)
        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long, default_value = "none")]
        repeat: RepeatType,

        #[arg(short, long, default_value_t = 1)]
        interval: u32,

        /// Series end date (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,

        #[arg(short = 'n', long)]
        count: Option<u32>,

        #[arg(long)]
        last_day: bool,

        /// Check an edit of this stored event instead of a new event
        #[arg(long)]
        edit: Option<String>,

        /// Which series members the edit applies to
        #[arg(long, default_value = "single")]
        mode: RepeatEditMode,

        /// Print the clashing events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show reminders due at a given moment
    Upcoming {
        /// Moment to check (YYYY-MM-DDTHH:MM, defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
    /// Search events in the week or month around a date
    Search {
        query: Option<String>,

        #[arg(long, default_value = "month")]
        view: CalendarView,

        /// Any date in the week or month to show (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Print a month grid with the events of each day
    Month {
        /// Any date in the month (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the config, or change one setting
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set a config key (events_file, horizon, default_notification_minutes, log_level)
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = DaybookConfig::load().context("Failed to load config")?;

    init_tracing(&config.log_level);

    let horizon = config.horizon_date()?;
    let events_path = cli.events.unwrap_or_else(|| config.events_path());
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Repeat {
            start,
            until,
            frequency,
            interval,
            count,
            last_day,
            json,
        } => {
            let start = utils::parse_day(&start)?;
            let until = match until {
                Some(s) => utils::parse_day(&s)?,
                None => horizon,
            };

            let mut rule = RecurrenceRule::new(start)
                .until(until)
                .frequency(frequency)
                .every(interval)
                .last_day_of_month(last_day);
            if let Some(n) = count {
                rule = rule.times(n);
            }

            commands::repeat::run(&rule, json)
        }
        Commands::Check {
            date,
            start,
            end,
            title,
            repeat,
            interval,
            until,
            count,
            last_day,
            edit,
            mode,
            json,
        } => {
            utils::parse_day(&date)?;
            utils::parse_optional_day(until.as_deref())?;

            let store = EventStore::new(load_events(&events_path)?.events, horizon);

            let target = match edit {
                Some(id) => {
                    let mut event = store
                        .get(&id)
                        .cloned()
                        .with_context(|| format!("No event with id '{id}'"))?;
                    event.date = date;
                    event.start_time = start;
                    event.end_time = end;
                    if let Some(title) = title {
                        event.title = title;
                    }
                    commands::check::Target::Edit(event, mode)
                }
                None => {
                    let title = title.unwrap_or_else(|| "New event".to_string());
                    let mut form = EventForm::new(title, date, start, end);
                    form.notification_time = config.default_notification_minutes;
                    if repeat.is_repeating() {
                        form = form.with_repeat(RepeatInfo {
                            kind: repeat,
                            interval,
                            end_date: until,
                            count,
                            last_day_of_month: last_day,
                            ..RepeatInfo::default()
                        });
                    }
                    commands::check::Target::New(form)
                }
            };

            commands::check::run(&store, target, json)
        }
        Commands::Upcoming { at } => {
            let now = match at {
                Some(s) => utils::parse_instant(&s)?,
                None => Local::now().naive_local(),
            };
            let file = load_events(&events_path)?;
            commands::upcoming::run(&file.events, now)
        }
        Commands::Search { query, view, date } => {
            let current = utils::day_or_today(date.as_deref(), today)?;
            let file = load_events(&events_path)?;
            commands::search::run(&file.events, query.as_deref().unwrap_or(""), current, view)
        }
        Commands::Month { date } => {
            let current = utils::day_or_today(date.as_deref(), today)?;
            let file = load_events(&events_path)?;
            commands::month::run(&file.events, current)
        }
        Commands::Config { action } => {
            let config_path = DaybookConfig::config_path()?;
            match action {
                None => commands::config::show(&config, &config_path),
                Some(ConfigAction::Set { key, value }) => {
                    commands::config::set(config, &config_path, &key, &value)
                }
            }
        }
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_events(path: &std::path::Path) -> Result<EventsFile> {
    EventsFile::load(path)
        .with_context(|| format!("Failed to read events from {}", path.display()))
}
