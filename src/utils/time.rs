//! Time utilities: parsing HH:MM and formatting time ranges.

use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// `15:00 - 16:00`; `-` when either end is blank.
pub fn format_range(start: &str, end: &str) -> String {
    if start.trim().is_empty() || end.trim().is_empty() {
        return "-".to_string();
    }

    let norm = |s: &str| parse_time(s.trim()).map(format_time).unwrap_or_else(|| s.trim().to_string());
    format!("{} - {}", norm(start), norm(end))
}
