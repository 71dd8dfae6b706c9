use classclock::core::validate::{check, is_absolute_url, validate};
use classclock::errors::{ClockError, ScheduleField, ValidationReason};
use classclock::models::schedule::ScheduleRecord;

mod common;
use common::future_record;

fn blank(field: ScheduleField) -> ScheduleRecord {
    let mut r = future_record(3);
    let slot = match field {
        ScheduleField::Title => &mut r.title,
        ScheduleField::Topic => &mut r.topic,
        ScheduleField::Subtitle => &mut r.subtitle,
        ScheduleField::Date => &mut r.date,
        ScheduleField::StartTime => &mut r.start_time,
        ScheduleField::EndTime => &mut r.end_time,
        ScheduleField::JoinLink => &mut r.join_link,
    };
    slot.clear();
    r
}

#[test]
fn test_valid_record_passes() {
    assert!(validate(&future_record(1)).is_ok());
    assert!(validate(&ScheduleRecord::default()).is_ok());
}

#[test]
fn test_each_blank_field_is_reported_alone() {
    for field in ScheduleField::ALL {
        let errors = check(&blank(field));
        assert_eq!(errors.len(), 1, "blank {field} produced {errors:?}");
        assert_eq!(errors[0].field, field);
        assert_eq!(errors[0].reason, ValidationReason::Empty);
    }
}

#[test]
fn test_whitespace_only_counts_as_blank() {
    let mut r = future_record(1);
    r.subtitle = " \t ".to_string();
    let errors = validate(&r).unwrap_err();
    assert_eq!(errors.reason_for(ScheduleField::Subtitle), Some(ValidationReason::Empty));
}

#[test]
fn test_all_violations_are_collected() {
    let mut r = future_record(1);
    r.title.clear();
    r.date = "2025-13-45".to_string();
    r.join_link = "meet.google.com".to_string();

    let errors = validate(&r).unwrap_err();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.reason_for(ScheduleField::Title), Some(ValidationReason::Empty));
    assert_eq!(errors.reason_for(ScheduleField::Date), Some(ValidationReason::InvalidDate));
    assert_eq!(errors.reason_for(ScheduleField::JoinLink), Some(ValidationReason::InvalidUrl));
}

#[test]
fn test_time_ordering() {
    let mut r = future_record(1);
    r.start_time = "16:00".to_string();
    r.end_time = "15:00".to_string();
    let errors = validate(&r).unwrap_err();
    assert_eq!(
        errors.reason_for(ScheduleField::EndTime),
        Some(ValidationReason::EndNotAfterStart)
    );

    r.end_time = "16:00".to_string();
    assert!(validate(&r).unwrap_err().has(ScheduleField::EndTime));

    r.end_time = "16:01".to_string();
    assert!(validate(&r).is_ok());
}

#[test]
fn test_unparseable_times() {
    let mut r = future_record(1);
    r.start_time = "25:00".to_string();
    r.end_time = "late".to_string();

    let errors = validate(&r).unwrap_err();
    assert_eq!(errors.reason_for(ScheduleField::StartTime), Some(ValidationReason::InvalidTime));
    assert_eq!(errors.reason_for(ScheduleField::EndTime), Some(ValidationReason::InvalidTime));
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_url_validation() {
    assert!(!is_absolute_url("not a url"));
    assert!(!is_absolute_url("/relative/path"));
    assert!(is_absolute_url("https://meet.google.com/abc"));
    assert!(is_absolute_url("http://example.org"));

    let mut r = future_record(1);
    r.join_link = "not a url".to_string();
    assert_eq!(
        validate(&r).unwrap_err().reason_for(ScheduleField::JoinLink),
        Some(ValidationReason::InvalidUrl)
    );

    r.join_link = "https://meet.google.com/abc".to_string();
    assert!(validate(&r).is_ok());
}

#[test]
fn test_target_instant_from_date_and_start() {
    let r = ScheduleRecord::default();
    let target = r.target_instant().unwrap();
    assert_eq!(target.format("%Y-%m-%d %H:%M:%S").to_string(), "2025-10-11 15:00:00");

    let mut bad = ScheduleRecord::default();
    bad.date = "11/10/2025".to_string();
    assert!(matches!(bad.target_instant(), Err(ClockError::InvalidDate(_))));

    let mut bad = ScheduleRecord::default();
    bad.start_time = "3pm".to_string();
    assert!(matches!(bad.target_instant(), Err(ClockError::InvalidTime(_))));
}
