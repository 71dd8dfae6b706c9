pub mod config;
pub mod countdown;
pub mod init;
pub mod log;
pub mod reset;
pub mod set;
pub mod show;

use crate::config::Config;
use crate::core::store::{ClassScheduleStore, LoadSource};
use crate::db::log::ttlog_or_warn;
use crate::errors::AppResult;
use crate::storage::SqliteStorage;
use crate::ui::messages::warning;

/// Open the configured database and load the schedule record.
/// A malformed stored record is reported and logged, then the default is used.
pub(crate) fn open_store(cfg: &Config) -> AppResult<ClassScheduleStore<SqliteStorage>> {
    let storage = SqliteStorage::open(&cfg.database)?;
    let store = ClassScheduleStore::open(storage, &cfg.storage_key);

    if let LoadSource::Malformed(reason) = store.last_source() {
        warning(format!(
            "Stored schedule is not usable ({}); using the default schedule",
            reason
        ));
        ttlog_or_warn(store.storage().conn(), "fallback", store.key(), reason);
    }

    Ok(store)
}
