use crate::errors::ClockError;
use crate::utils::{date, time};
use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Programación Avanzada";
pub const DEFAULT_TOPIC: &str = "Desarrollo Web Full Stack";
pub const DEFAULT_SUBTITLE: &str =
    "Sesión intensiva de desarrollo web con JavaScript, React y Node.js";
pub const DEFAULT_DATE: &str = "2025-10-11";
pub const DEFAULT_START: &str = "15:00";
pub const DEFAULT_END: &str = "16:00";
pub const DEFAULT_LINK: &str = "https://meet.google.com";

/// One scheduled class, exactly as it is persisted.
///
/// Fields stay as text so that a rejected candidate can be echoed back
/// untouched; `validate` decides whether they parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "tema")]
    pub topic: String,
    #[serde(rename = "subtitulo")]
    pub subtitle: String,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "horaInicio")]
    pub start_time: String,
    #[serde(rename = "horaFin")]
    pub end_time: String,
    #[serde(rename = "link")]
    pub join_link: String,
}

impl Default for ScheduleRecord {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            topic: DEFAULT_TOPIC.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            date: DEFAULT_DATE.to_string(),
            start_time: DEFAULT_START.to_string(),
            end_time: DEFAULT_END.to_string(),
            join_link: DEFAULT_LINK.to_string(),
        }
    }
}

impl ScheduleRecord {
    /// Instant the class starts: `date` + `start_time` in local time.
    ///
    /// An ambiguous wall time (DST fall-back) resolves to the earliest
    /// instant; a skipped one is an error.
    pub fn target_instant(&self) -> Result<DateTime<Local>, ClockError> {
        let d = date::parse_date(self.date.trim())
            .ok_or_else(|| ClockError::InvalidDate(self.date.clone()))?;
        let t = time::parse_time(self.start_time.trim())
            .ok_or_else(|| ClockError::InvalidTime(self.start_time.clone()))?;

        let naive = NaiveDateTime::new(d, t);

        match Local.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Ok(dt),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest),
            LocalResult::None => Err(ClockError::NonexistentLocalTime(naive.to_string())),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
