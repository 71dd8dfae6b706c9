use classclock::config::DEFAULT_STORAGE_KEY;
use classclock::core::store::{ClassScheduleStore, LoadSource, SaveOptions};
use classclock::errors::{AppError, ScheduleField, ValidationReason};
use classclock::models::schedule::ScheduleRecord;
use classclock::storage::{KeyValueStore, MemoryStorage, SqliteStorage};

mod common;
use common::{future_record, setup_test_db};

const KEY: &str = DEFAULT_STORAGE_KEY;

fn memory_store() -> ClassScheduleStore<MemoryStorage> {
    ClassScheduleStore::open(MemoryStorage::new(), KEY)
}

fn validation_reason(err: AppError, field: ScheduleField) -> Option<ValidationReason> {
    match err {
        AppError::Validation(errors) => errors.reason_for(field),
        other => panic!("expected a validation error, got {other}"),
    }
}

#[test]
fn test_empty_storage_loads_default() {
    let store = memory_store();
    assert_eq!(store.current(), ScheduleRecord::default());
    assert_eq!(store.last_source(), &LoadSource::Missing);
}

#[test]
fn test_corrupt_storage_falls_back_to_default() {
    let storage = MemoryStorage::with_value(KEY, "{ this is not json");
    let store = ClassScheduleStore::open(storage, KEY);

    assert_eq!(store.current(), ScheduleRecord::default());
    assert!(matches!(store.last_source(), LoadSource::Malformed(_)));
}

#[test]
fn test_stored_record_with_blank_field_falls_back_to_default() {
    let mut bad = future_record(3);
    bad.title = "   ".to_string();
    let storage = MemoryStorage::with_value(KEY, &bad.to_json().unwrap());

    let store = ClassScheduleStore::open(storage, KEY);
    assert_eq!(store.current(), ScheduleRecord::default());
    assert!(matches!(store.last_source(), LoadSource::Malformed(_)));
}

#[test]
fn test_save_then_load_returns_same_record() {
    let mut store = memory_store();
    let record = future_record(5);

    store.save(&record, SaveOptions::default()).unwrap();
    assert_eq!(store.load(), record);
    assert_eq!(store.last_source(), &LoadSource::Stored);
}

#[test]
fn test_save_then_load_across_sqlite_connections() {
    let db_path = setup_test_db("store_roundtrip");
    let record = future_record(2);

    {
        let mut store = ClassScheduleStore::open(SqliteStorage::open(&db_path).unwrap(), KEY);
        store.save(&record, SaveOptions::default()).unwrap();
    }

    let store = ClassScheduleStore::open(SqliteStorage::open(&db_path).unwrap(), KEY);
    assert_eq!(store.current(), record);
}

#[test]
fn test_in_memory_sqlite_storage_migrates_and_stores() {
    let mut store = ClassScheduleStore::open(SqliteStorage::in_memory().unwrap(), KEY);
    assert_eq!(store.last_source(), &LoadSource::Missing);

    let record = future_record(2);
    store.save(&record, SaveOptions::default()).unwrap();
    assert_eq!(store.load(), record);

    assert_eq!(store.key(), KEY);
    assert!(store.storage().get(KEY).unwrap().is_some());
}

#[test]
fn test_persisted_json_uses_record_keys() {
    let mut store = memory_store();
    let record = future_record(1);
    store.save(&record, SaveOptions::default()).unwrap();

    let raw = store.storage().get(KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value["titulo"], record.title.as_str());
    assert_eq!(value["tema"], record.topic.as_str());
    assert_eq!(value["subtitulo"], record.subtitle.as_str());
    assert_eq!(value["fecha"], record.date.as_str());
    assert_eq!(value["horaInicio"], "18:00");
    assert_eq!(value["horaFin"], "19:30");
    assert_eq!(value["link"], record.join_link.as_str());
}

#[test]
fn test_invalid_save_leaves_persisted_record_untouched() {
    let mut store = memory_store();
    let good = future_record(4);
    store.save(&good, SaveOptions::default()).unwrap();
    let raw_before = store.storage().get(KEY).unwrap();

    let mut bad = good.clone();
    bad.topic = String::new();
    bad.title = "Otro título".to_string();

    let err = store.save(&bad, SaveOptions::default()).unwrap_err();
    assert_eq!(
        validation_reason(err, ScheduleField::Topic),
        Some(ValidationReason::Empty)
    );

    assert_eq!(store.storage().get(KEY).unwrap(), raw_before);
    assert_eq!(store.current(), good);
    assert_eq!(store.load(), good);
}

#[test]
fn test_end_before_start_is_rejected() {
    let mut store = memory_store();
    let mut record = future_record(2);
    record.start_time = "16:00".to_string();
    record.end_time = "15:00".to_string();

    let err = store.save(&record, SaveOptions::default()).unwrap_err();
    assert_eq!(
        validation_reason(err, ScheduleField::EndTime),
        Some(ValidationReason::EndNotAfterStart)
    );
    assert_eq!(store.storage().get(KEY).unwrap(), None);
}

#[test]
fn test_past_schedule_needs_override() {
    let mut store = memory_store();
    let mut record = future_record(1);
    record.date = "2020-03-02".to_string();

    let err = store.save(&record, SaveOptions::default()).unwrap_err();
    assert_eq!(
        validation_reason(err, ScheduleField::Date),
        Some(ValidationReason::InPast)
    );
    assert_eq!(store.current(), ScheduleRecord::default());

    store.save(&record, SaveOptions::allow_past()).unwrap();
    assert_eq!(store.load(), record);
}

#[test]
fn test_reset_twice_yields_same_default() {
    let mut store = memory_store();
    store.save(&future_record(6), SaveOptions::default()).unwrap();

    let first = store.reset().unwrap();
    let raw_first = store.storage().get(KEY).unwrap();
    let second = store.reset().unwrap();
    let raw_second = store.storage().get(KEY).unwrap();

    assert_eq!(first, ScheduleRecord::default());
    assert_eq!(first, second);
    assert_eq!(raw_first, raw_second);
    assert_eq!(store.load(), ScheduleRecord::default());
}

#[test]
fn test_subscribers_see_saved_record_only() {
    let mut store = memory_store();
    let mut rx = store.subscribe();

    let mut bad = future_record(2);
    bad.join_link = "not a url".to_string();
    assert!(store.save(&bad, SaveOptions::default()).is_err());
    assert!(!rx.has_changed().unwrap());

    let good = future_record(2);
    store.save(&good, SaveOptions::default()).unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), good);

    // Saving the same record again is not a change
    store.save(&good, SaveOptions::default()).unwrap();
    assert!(!rx.has_changed().unwrap());

    store.reset().unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), ScheduleRecord::default());
}

#[test]
fn test_reload_picks_up_external_write() {
    let db_path = setup_test_db("store_reload");
    let mut store = ClassScheduleStore::open(SqliteStorage::open(&db_path).unwrap(), KEY);
    assert!(!store.reload());

    let record = future_record(9);
    let mut other = SqliteStorage::open(&db_path).unwrap();
    other.set(KEY, &record.to_json().unwrap()).unwrap();

    assert!(store.reload());
    assert_eq!(store.current(), record);
}
