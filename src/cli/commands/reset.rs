use crate::config::Config;
use crate::db::log::ttlog_or_warn;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::ui::render::record_card;

/// Handle the `reset` command
pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut store = super::open_store(cfg)?;
    let record = store.reset()?;

    ttlog_or_warn(
        store.storage().conn(),
        "reset",
        store.key(),
        "Schedule restored to defaults",
    );

    success("Schedule restored to the default values");
    println!("{}", record_card(&record));
    Ok(())
}
