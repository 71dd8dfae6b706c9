/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Returns GREY when the field is blank or `-`, RESET otherwise.
pub fn color_for_optional_field<T: AsRef<str>>(value: Option<T>) -> &'static str {
    match value {
        Some(v) if !v.as_ref().trim().is_empty() && v.as_ref().trim() != "-" => RESET,
        _ => GREY,
    }
}

/// Countdown color: red when urgent, reset otherwise.
pub fn color_for_countdown(urgent: bool) -> &'static str {
    if urgent { RED } else { RESET }
}

pub fn colorize_optional(value: &str) -> String {
    let c = color_for_optional_field(Some(value));
    if c == GREY {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
