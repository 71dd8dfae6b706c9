//! The persisted schedule record: load with fallback, validated save, reset,
//! and a change channel for whoever renders or counts down to it.

use crate::core::countdown::{Clock, SystemClock};
use crate::core::validate;
use crate::errors::{
    AppResult, ScheduleField, ValidationError, ValidationErrors, ValidationReason,
};
use crate::models::schedule::ScheduleRecord;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Accept a record whose start instant is already behind us.
    pub allow_past_schedule: bool,
}

impl SaveOptions {
    pub fn allow_past() -> Self {
        Self {
            allow_past_schedule: true,
        }
    }
}

/// Where the active record came from on the last load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    Stored,
    /// Nothing under the key.
    Missing,
    /// Something under the key that is not a usable record.
    Malformed(String),
}

pub struct ClassScheduleStore<S: KeyValueStore> {
    storage: S,
    key: String,
    clock: Arc<dyn Clock>,
    changes: watch::Sender<ScheduleRecord>,
    last_source: LoadSource,
}

impl<S: KeyValueStore> ClassScheduleStore<S> {
    /// Build the store and load the persisted record (or the default).
    pub fn open(storage: S, key: &str) -> Self {
        Self::with_clock(storage, key, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: S, key: &str, clock: Arc<dyn Clock>) -> Self {
        let (changes, _) = watch::channel(ScheduleRecord::default());
        let mut store = Self {
            storage,
            key: key.to_string(),
            clock,
            changes,
            last_source: LoadSource::Missing,
        };
        store.load();
        store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The active record.
    pub fn current(&self) -> ScheduleRecord {
        self.changes.borrow().clone()
    }

    pub fn last_source(&self) -> &LoadSource {
        &self.last_source
    }

    /// Receiver that observes every change of the active record.
    pub fn subscribe(&self) -> watch::Receiver<ScheduleRecord> {
        self.changes.subscribe()
    }

    /// Read the record from storage. Missing, unreadable or malformed values
    /// fall back to the compiled-in default; nothing is surfaced as an error.
    pub fn load(&mut self) -> ScheduleRecord {
        let (record, source) = match self.storage.get(&self.key) {
            Ok(Some(raw)) => match parse_stored(&raw) {
                Ok(r) => (r, LoadSource::Stored),
                Err(reason) => (ScheduleRecord::default(), LoadSource::Malformed(reason)),
            },
            Ok(None) => (ScheduleRecord::default(), LoadSource::Missing),
            Err(e) => (ScheduleRecord::default(), LoadSource::Malformed(e.to_string())),
        };

        self.last_source = source;
        self.publish(record.clone());
        record
    }

    /// Re-read storage; `true` when the active record changed.
    pub fn reload(&mut self) -> bool {
        let before = self.current();
        self.load() != before
    }

    pub fn validate(&self, candidate: &ScheduleRecord) -> Result<(), ValidationErrors> {
        validate::validate(candidate)
    }

    /// Validate `candidate` and, only if it passes, overwrite the persisted
    /// record with it. On any failure storage and the active record are
    /// left as they were.
    ///
    /// A candidate must also resolve to a start instant; with
    /// `allow_past_schedule` off that instant must not be in the past.
    pub fn save(&mut self, candidate: &ScheduleRecord, opts: SaveOptions) -> AppResult<()> {
        self.validate(candidate)?;

        let target = candidate
            .target_instant()
            .map_err(|e| ValidationErrors(vec![ValidationError::from(e)]))?;

        if !opts.allow_past_schedule && target < self.clock.now() {
            return Err(ValidationErrors(vec![ValidationError::new(
                ScheduleField::Date,
                ValidationReason::InPast,
            )])
            .into());
        }

        let raw = candidate.to_json()?;
        self.storage.set(&self.key, &raw)?;
        self.last_source = LoadSource::Stored;
        self.publish(candidate.clone());
        Ok(())
    }

    /// Overwrite the persisted record with the default and return it.
    pub fn reset(&mut self) -> AppResult<ScheduleRecord> {
        let record = ScheduleRecord::default();
        let raw = record.to_json()?;
        self.storage.set(&self.key, &raw)?;
        self.last_source = LoadSource::Stored;
        self.publish(record.clone());
        Ok(record)
    }

    fn publish(&self, record: ScheduleRecord) {
        self.changes.send_if_modified(|cur| {
            if *cur == record {
                false
            } else {
                *cur = record;
                true
            }
        });
    }
}

fn parse_stored(raw: &str) -> Result<ScheduleRecord, String> {
    let record = ScheduleRecord::from_json(raw).map_err(|e| e.to_string())?;
    validate::validate(&record).map_err(|e| e.to_string())?;
    Ok(record)
}
