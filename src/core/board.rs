use crate::core::countdown::CountdownTimer;
use crate::core::store::{ClassScheduleStore, SaveOptions};
use crate::errors::AppResult;
use crate::models::countdown::CountdownSnapshot;
use crate::models::schedule::ScheduleRecord;
use crate::storage::KeyValueStore;
use tokio::sync::watch;

/// A schedule store and the countdown that follows its active record.
///
/// The timer never reads the store directly: the board subscribes to the
/// store's change channel and retargets the timer for each record it sees.
pub struct ClassBoard<S: KeyValueStore> {
    store: ClassScheduleStore<S>,
    timer: CountdownTimer,
    changes: watch::Receiver<ScheduleRecord>,
}

impl<S: KeyValueStore> ClassBoard<S> {
    pub fn new(store: ClassScheduleStore<S>, timer: CountdownTimer) -> Self {
        let changes = store.subscribe();
        Self {
            store,
            timer,
            changes,
        }
    }

    pub fn store(&self) -> &ClassScheduleStore<S> {
        &self.store
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn countdown(&self) -> watch::Receiver<CountdownSnapshot> {
        self.timer.subscribe()
    }

    /// Start counting down to the active record.
    pub fn start(&mut self) -> AppResult<()> {
        let record = self.changes.borrow_and_update().clone();
        self.apply(&record)
    }

    /// Consume a pending record change, if any. Returns whether the timer
    /// was retargeted.
    pub fn sync(&mut self) -> AppResult<bool> {
        if !self.changes.has_changed().unwrap_or(false) {
            return Ok(false);
        }
        let record = self.changes.borrow_and_update().clone();
        self.apply(&record)?;
        Ok(true)
    }

    pub fn save(&mut self, candidate: &ScheduleRecord, opts: SaveOptions) -> AppResult<bool> {
        self.store.save(candidate, opts)?;
        self.sync()
    }

    pub fn reset(&mut self) -> AppResult<ScheduleRecord> {
        let record = self.store.reset()?;
        self.sync()?;
        Ok(record)
    }

    /// Pick up edits written to storage by someone else.
    pub fn reload(&mut self) -> AppResult<bool> {
        self.store.reload();
        self.sync()
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    /// Derive the target instant; a record that has none puts the timer in
    /// its invalid state and reports the clock error.
    fn apply(&mut self, record: &ScheduleRecord) -> AppResult<()> {
        match record.target_instant() {
            Ok(target) => {
                self.timer.retarget(target);
                Ok(())
            }
            Err(e) => {
                self.timer.invalidate(e.clone());
                Err(e.into())
            }
        }
    }
}
