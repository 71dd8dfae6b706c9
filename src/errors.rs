//! Unified application error type.
//! All modules (db, storage, core, cli, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use std::fmt;
use std::io;
use thiserror::Error;

// ---------------------------
// Validation
// ---------------------------

/// Fields of a schedule record, named as they appear to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleField {
    Title,
    Topic,
    Subtitle,
    Date,
    StartTime,
    EndTime,
    JoinLink,
}

impl ScheduleField {
    pub const ALL: [ScheduleField; 7] = [
        ScheduleField::Title,
        ScheduleField::Topic,
        ScheduleField::Subtitle,
        ScheduleField::Date,
        ScheduleField::StartTime,
        ScheduleField::EndTime,
        ScheduleField::JoinLink,
    ];

    /// Key used in the persisted JSON object.
    pub fn storage_key(&self) -> &'static str {
        match self {
            ScheduleField::Title => "titulo",
            ScheduleField::Topic => "tema",
            ScheduleField::Subtitle => "subtitulo",
            ScheduleField::Date => "fecha",
            ScheduleField::StartTime => "horaInicio",
            ScheduleField::EndTime => "horaFin",
            ScheduleField::JoinLink => "link",
        }
    }

    /// Name of the matching `set` flag.
    pub fn cli_flag(&self) -> &'static str {
        match self {
            ScheduleField::Title => "--title",
            ScheduleField::Topic => "--topic",
            ScheduleField::Subtitle => "--subtitle",
            ScheduleField::Date => "--date",
            ScheduleField::StartTime => "--start",
            ScheduleField::EndTime => "--end",
            ScheduleField::JoinLink => "--link",
        }
    }
}

impl fmt::Display for ScheduleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    Empty,
    InvalidUrl,
    InvalidDate,
    InvalidTime,
    EndNotAfterStart,
    NonexistentTime,
    InPast,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationReason::Empty => "must not be empty",
            ValidationReason::InvalidUrl => "must be an absolute URL (e.g. https://meet.google.com/abc)",
            ValidationReason::InvalidDate => "must be a date in YYYY-MM-DD format",
            ValidationReason::InvalidTime => "must be a time in HH:MM format",
            ValidationReason::EndNotAfterStart => "must be later than the start time",
            ValidationReason::NonexistentTime => {
                "does not exist on that date in local time (skipped by a DST change)"
            }
            ValidationReason::InPast => "is in the past (use --allow-past to keep it anyway)",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {reason}")]
pub struct ValidationError {
    pub field: ScheduleField,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: ScheduleField, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

impl From<ClockError> for ValidationError {
    fn from(err: ClockError) -> Self {
        match err {
            ClockError::InvalidDate(_) => Self::new(ScheduleField::Date, ValidationReason::InvalidDate),
            ClockError::InvalidTime(_) => {
                Self::new(ScheduleField::StartTime, ValidationReason::InvalidTime)
            }
            ClockError::NonexistentLocalTime(_) => {
                Self::new(ScheduleField::StartTime, ValidationReason::NonexistentTime)
            }
        }
    }
}

/// Every violation found in one candidate record, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: ScheduleField) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn reason_for(&self, field: ScheduleField) -> Option<ValidationReason> {
        self.0.iter().find(|e| e.field == field).map(|e| e.reason)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

// ---------------------------
// Clock
// ---------------------------

/// A schedule record whose date/start time cannot become an instant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("invalid date for countdown: '{0}'")]
    InvalidDate(String),

    #[error("invalid time for countdown: '{0}'")]
    InvalidTime(String),

    #[error("local time {0} does not exist (skipped by a DST change)")]
    NonexistentLocalTime(String),
}

// ---------------------------
// Application
// ---------------------------

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database / storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Schedule / countdown
    // ---------------------------
    #[error("Invalid schedule: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Countdown error: {0}")]
    Clock(#[from] ClockError),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,
}

pub type AppResult<T> = Result<T, AppError>;
