//! Date utilities: parsing YYYY-MM-DD and the Spanish short form used on cards.

use chrono::{Datelike, NaiveDate};

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

pub const INVALID_DATE_LABEL: &str = "Fecha inválida";

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// `2025-10-11` → `11 oct 2025`.
pub fn format_date_es(d: NaiveDate) -> String {
    format!("{} {} {}", d.day(), MONTHS_ES[d.month0() as usize], d.year())
}

/// Like [`format_date_es`] on raw input; unparseable input yields
/// [`INVALID_DATE_LABEL`].
pub fn format_date_str_es(s: &str) -> String {
    match parse_date(s.trim()) {
        Some(d) => format_date_es(d),
        None => INVALID_DATE_LABEL.to_string(),
    }
}
