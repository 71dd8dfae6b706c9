//! Structural checks on a candidate schedule record.

use crate::errors::{ScheduleField, ValidationError, ValidationErrors, ValidationReason};
use crate::models::schedule::ScheduleRecord;
use crate::utils::{date, time};
use url::Url;

fn field_value(record: &ScheduleRecord, field: ScheduleField) -> &str {
    match field {
        ScheduleField::Title => &record.title,
        ScheduleField::Topic => &record.topic,
        ScheduleField::Subtitle => &record.subtitle,
        ScheduleField::Date => &record.date,
        ScheduleField::StartTime => &record.start_time,
        ScheduleField::EndTime => &record.end_time,
        ScheduleField::JoinLink => &record.join_link,
    }
}

/// Absolute URL check; relative references like `not a url` have no scheme
/// and fail to parse without a base.
pub fn is_absolute_url(s: &str) -> bool {
    Url::parse(s.trim()).is_ok()
}

/// Collect every violation of `record`, at most one per field.
///
/// Blank fields only report `Empty`; the start/end ordering is only checked
/// once both times parse.
pub fn check(record: &ScheduleRecord) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for field in ScheduleField::ALL {
        if field_value(record, field).trim().is_empty() {
            errors.push(ValidationError::new(field, ValidationReason::Empty));
        }
    }
    let blank = |f: ScheduleField| errors.iter().any(|e: &ValidationError| e.field == f);

    let mut found = Vec::new();

    if !blank(ScheduleField::Date) && date::parse_date(record.date.trim()).is_none() {
        found.push(ValidationError::new(ScheduleField::Date, ValidationReason::InvalidDate));
    }

    let start = if blank(ScheduleField::StartTime) {
        None
    } else {
        let t = time::parse_time(record.start_time.trim());
        if t.is_none() {
            found.push(ValidationError::new(ScheduleField::StartTime, ValidationReason::InvalidTime));
        }
        t
    };

    let end = if blank(ScheduleField::EndTime) {
        None
    } else {
        let t = time::parse_time(record.end_time.trim());
        if t.is_none() {
            found.push(ValidationError::new(ScheduleField::EndTime, ValidationReason::InvalidTime));
        }
        t
    };

    if let (Some(s), Some(e)) = (start, end)
        && s >= e
    {
        found.push(ValidationError::new(
            ScheduleField::EndTime,
            ValidationReason::EndNotAfterStart,
        ));
    }

    if !blank(ScheduleField::JoinLink) && !is_absolute_url(&record.join_link) {
        found.push(ValidationError::new(ScheduleField::JoinLink, ValidationReason::InvalidUrl));
    }

    errors.extend(found);
    errors.sort_by_key(|e| ScheduleField::ALL.iter().position(|f| *f == e.field));
    errors
}

/// All-or-nothing verdict over [`check`].
pub fn validate(record: &ScheduleRecord) -> Result<(), ValidationErrors> {
    let errors = check(record);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
