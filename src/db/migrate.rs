use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, params};

const KV_TABLE_VERSION: &str = "20251011_0001_create_kv_table";

/// A migration that ran during this call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub version: &'static str,
    pub message: &'static str,
}

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table with the given name exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the migration `version` was already recorded in `log`.
fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    // Same timestamp format as db::log::ttlog
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![now, version, message],
    )?;
    Ok(())
}

/// Create the `kv` table holding persisted values (one row per key).
fn migrate_create_kv_table(conn: &Connection) -> Result<Option<AppliedMigration>> {
    if is_applied(conn, KV_TABLE_VERSION)? && table_exists(conn, "kv")? {
        return Ok(None);
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv (
            key        TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    if is_applied(conn, KV_TABLE_VERSION)? {
        return Ok(None);
    }

    let applied = AppliedMigration {
        version: KV_TABLE_VERSION,
        message: "Created kv table",
    };
    mark_applied(conn, applied.version, applied.message)?;
    Ok(Some(applied))
}

/// Public entry point: run all pending migrations.
///
/// Nothing is printed here; callers report the returned migrations.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<AppliedMigration>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    applied.extend(migrate_create_kv_table(conn)?);
    Ok(applied)
}
