//! Local-time gaps. Runs in its own test binary because it pins `TZ`.

use chrono::Local;
use classclock::core::board::ClassBoard;
use classclock::core::countdown::CountdownTimer;
use classclock::core::store::{ClassScheduleStore, LoadSource, SaveOptions};
use classclock::errors::{AppError, ClockError, ScheduleField, ValidationReason};
use classclock::models::countdown::CountdownPhase;
use classclock::models::schedule::ScheduleRecord;
use classclock::storage::{KeyValueStore, MemoryStorage};
use std::sync::{Arc, Once};
use std::time::Duration;

mod common;
use common::{TokioClock, future_record};

const KEY: &str = "clase";

/// Central European rules: clocks jump from 02:00 to 03:00 on the last
/// Sunday of March (2030-03-31).
fn central_european_time() {
    static TZ: Once = Once::new();
    TZ.call_once(|| {
        // SAFETY: runs before any other code in this binary reads the environment.
        unsafe { std::env::set_var("TZ", "CET-1CEST,M3.5.0,M10.5.0/3") };
    });
}

fn gap_record() -> ScheduleRecord {
    ScheduleRecord {
        date: "2030-03-31".to_string(),
        start_time: "02:30".to_string(),
        end_time: "03:30".to_string(),
        ..future_record(1)
    }
}

#[test]
fn test_start_in_dst_gap_is_rejected_before_writing() {
    central_european_time();
    let record = gap_record();
    assert!(matches!(
        record.target_instant(),
        Err(ClockError::NonexistentLocalTime(_))
    ));

    let mut store = ClassScheduleStore::open(MemoryStorage::new(), KEY);
    let mut rx = store.subscribe();

    for opts in [SaveOptions::default(), SaveOptions::allow_past()] {
        match store.save(&record, opts) {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(
                    errors.reason_for(ScheduleField::StartTime),
                    Some(ValidationReason::NonexistentTime)
                );
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
        assert_eq!(store.storage().get(KEY).unwrap(), None);
        assert_eq!(store.current(), ScheduleRecord::default());
        assert!(!rx.has_changed().unwrap());
    }
}

#[tokio::test(start_paused = true)]
async fn test_board_marks_stored_gap_record_invalid_then_recovers() {
    central_european_time();
    let clock = Arc::new(TokioClock::new(Local::now()));

    let storage = MemoryStorage::with_value(KEY, &gap_record().to_json().unwrap());
    let store = ClassScheduleStore::with_clock(storage, KEY, clock.clone());
    assert_eq!(store.last_source(), &LoadSource::Stored);

    let timer = CountdownTimer::new(clock.clone(), Duration::from_secs(1));
    let mut board = ClassBoard::new(store, timer);

    let err = board.start().unwrap_err();
    assert!(matches!(err, AppError::Clock(ClockError::NonexistentLocalTime(_))));
    assert!(matches!(
        board.timer().phase(),
        CountdownPhase::Invalid(ClockError::NonexistentLocalTime(_))
    ));
    assert!(!board.timer().is_ticking());
    assert_eq!(board.timer().snapshot().target, None);

    // A rejected gap save leaves the invalid state alone
    assert!(board.save(&gap_record(), SaveOptions::allow_past()).is_err());
    assert!(matches!(board.timer().phase(), CountdownPhase::Invalid(_)));

    let record = future_record(3);
    assert!(board.save(&record, SaveOptions::default()).unwrap());
    assert_eq!(board.timer().phase(), CountdownPhase::Running);
    assert_eq!(
        board.timer().snapshot().target,
        Some(record.target_instant().unwrap())
    );
    assert!(board.timer().is_ticking());
}
