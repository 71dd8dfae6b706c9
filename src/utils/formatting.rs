//! Formatting utilities used for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn italic(s: &str) -> String {
    format!("\x1b[3m{}\x1b[0m", s)
}

/// Pad `s` on the right to `width` terminal columns (accents count as one).
pub fn pad_label(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// `-` for blank values, as the preview shows them.
pub fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() { "-" } else { s }
}

/// Days/hours with singular/plural Spanish labels: `2 días 3 horas`.
pub fn days_hours_es(days: i64, hours: i64) -> String {
    let d = if days == 1 { "día" } else { "días" };
    let h = if hours == 1 { "hora" } else { "horas" };
    format!("{} {} {} {}", days, d, hours, h)
}
