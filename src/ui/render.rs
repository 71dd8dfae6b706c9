//! Terminal rendering of schedule records and countdown snapshots.

use crate::models::countdown::{CountdownPhase, CountdownSnapshot, CountdownView};
use crate::models::schedule::ScheduleRecord;
use crate::utils::colors::{GREEN, RED, RESET, color_for_countdown, colorize_optional};
use crate::utils::date::format_date_str_es;
use crate::utils::formatting::{bold, days_hours_es, italic, or_dash, pad_label};
use crate::utils::time::format_range;

pub const ELAPSED_BANNER: &str = "¡AHORA!";

const LABEL_WIDTH: usize = 11;
const WRAP_WIDTH: usize = 64;

fn line(label: &str, value: &str) -> String {
    format!("{} {}", pad_label(label, LABEL_WIDTH), value)
}

/// Continuation lines of wrapped text, indented under the value column.
fn wrapped(label: &str, value: &str) -> Vec<String> {
    let parts = textwrap::wrap(value, WRAP_WIDTH);
    let mut out = Vec::with_capacity(parts.len());
    for (i, p) in parts.iter().enumerate() {
        if i == 0 {
            out.push(line(label, &italic(p)));
        } else {
            out.push(line("", &italic(p)));
        }
    }
    if out.is_empty() {
        out.push(line(label, "-"));
    }
    out
}

/// The card shown by `show`.
pub fn record_card(r: &ScheduleRecord) -> String {
    let mut lines = vec![
        line("Título:", &bold(&r.title)),
        line("Tema:", &r.topic),
    ];
    lines.extend(wrapped("Subtítulo:", &r.subtitle));
    lines.push(line("Fecha:", &format_date_str_es(&r.date)));
    lines.push(line("Horario:", &format_range(&r.start_time, &r.end_time)));
    lines.push(line("Enlace:", &r.join_link));
    lines.join("\n")
}

/// Preview of a candidate record: blank fields are shown as `-`.
pub fn record_preview(r: &ScheduleRecord) -> String {
    let date = if r.date.trim().is_empty() {
        "-".to_string()
    } else {
        format_date_str_es(&r.date)
    };

    [
        line("Título:", &colorize_optional(or_dash(&r.title))),
        line("Tema:", &colorize_optional(or_dash(&r.topic))),
        line("Subtítulo:", &colorize_optional(or_dash(&r.subtitle))),
        line("Fecha:", &colorize_optional(&date)),
        line("Horario:", &colorize_optional(&format_range(&r.start_time, &r.end_time))),
        line("Enlace:", &colorize_optional(or_dash(&r.join_link))),
    ]
    .join("\n")
}

/// Plain text of a running view: `2 días 3 horas` or `00:01:29`.
pub fn view_text(view: &CountdownView) -> String {
    match view {
        CountdownView::Coarse { days, hours } => days_hours_es(*days, *hours),
        CountdownView::Fine { .. } => view.to_string(),
    }
}

/// One countdown line, coloured for the terminal.
pub fn countdown_line(snap: &CountdownSnapshot, urgent_threshold_minutes: i64) -> String {
    match &snap.phase {
        CountdownPhase::Idle => "-".to_string(),
        CountdownPhase::Running => match snap.breakdown() {
            Some(r) => {
                let color = color_for_countdown(r.is_urgent(urgent_threshold_minutes));
                format!("⏳ {}{}{}", color, view_text(&r.view()), RESET)
            }
            None => "-".to_string(),
        },
        CountdownPhase::Elapsed => format!("🎉 {}{}{}", GREEN, ELAPSED_BANNER, RESET),
        CountdownPhase::Invalid(e) => format!("{}❌ {}{}", RED, e, RESET),
    }
}
