/// Application name
pub const APP_NAME: &str = "repairtrack";

/// Orders due within this many days (inclusive) are flagged as a warning
pub const WARNING_WINDOW_DAYS: i64 = 2;

/// Milliseconds in one day, used for the ceil-of-days delta
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Minimum estimated duration in days
pub const MIN_DURATION_DAYS: i64 = 1;

/// Number of active orders plotted in the dashboard "days remaining" series
pub const DASHBOARD_SERIES_LEN: usize = 5;

/// Maximum uploaded image size in bytes (10 MiB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Calendar date format used on the wire and in storage
pub const DATE_FORMAT: &str = "%Y-%m-%d";
