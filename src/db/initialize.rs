use crate::db::migrate::{AppliedMigration, run_pending_migrations};
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine and
/// returns the migrations applied by this call.
pub fn init_db(conn: &Connection) -> AppResult<Vec<AppliedMigration>> {
    Ok(run_pending_migrations(conn)?)
}
