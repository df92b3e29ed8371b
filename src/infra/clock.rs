// ============================================================
// Infra — Wall Clock Formatting
// ============================================================
// Local-time strings used in chart file names and stopwatch
// output.

use chrono::{DateTime, Local};

/// Format used for chart file suffixes, e.g. `20240131-154502`
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// ctime-style format, e.g. `Wed Jan 31 15:45:02 2024`
pub const DISPLAY_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Current local time as `YYYYmmdd-HHMMSS`
pub fn time_string() -> String {
    Local::now().format(FILE_STAMP_FORMAT).to_string()
}

pub fn display_time(at: &DateTime<Local>) -> String {
    at.format(DISPLAY_FORMAT).to_string()
}
