use chrono::NaiveDate;

/// Year, month and day of the horizon used when a recurrence has no end date.
pub const DEFAULT_HORIZON: (i32, u32, u32) = (2025, 6, 30);

/// Minutes before start at which an event notifies, when the form leaves it unset.
pub const DEFAULT_NOTIFICATION_MINUTES: u32 = 10;

pub fn default_horizon() -> NaiveDate {
    let (y, m, d) = DEFAULT_HORIZON;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MAX)
}
