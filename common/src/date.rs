//! Date line formatting.
//!
//! The forecast is for Mount Fuji, so the date shown is always the local date
//! in Japan regardless of the device's own time zone. Output mirrors the
//! strftime pattern `"%a %b %e"` (day of month space-padded to two columns).

use core::fmt::Write;

use chrono::{DateTime, Datelike, FixedOffset};
use heapless::String;

use crate::config::DATE_UTC_OFFSET_HOURS;

/// Capacity of the date line buffer.
pub const DATE_TEXT_LEN: usize = 16;

/// Formatted date line.
pub type DateText = String<DATE_TEXT_LEN>;

const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// Format a Unix timestamp as the Japan-local date line, e.g. `"Mon Oct  5"`.
///
/// Returns an empty string for timestamps chrono cannot represent.
pub fn format_date(unix_seconds: i64) -> DateText {
    let mut text = DateText::new();

    let Some(offset) = FixedOffset::east_opt(DATE_UTC_OFFSET_HOURS * 3600) else {
        return text;
    };
    let Some(utc) = DateTime::from_timestamp(unix_seconds, 0) else {
        return text;
    };
    let local = utc.with_timezone(&offset);

    write!(
        text,
        "{} {} {:>2}",
        local.weekday(),
        MONTHS[local.month0() as usize],
        local.day()
    )
    .ok();
    text
}
