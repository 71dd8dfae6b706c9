use super::KeyValueStore;
use crate::db::initialize::init_db;
use crate::db::kv;
use crate::db::migrate::AppliedMigration;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Storage backed by the `kv` table of the application database.
pub struct SqliteStorage {
    pool: DbPool,
    applied: Vec<AppliedMigration>,
}

impl SqliteStorage {
    /// Open the database at `path`, running pending migrations.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        Self::from_pool(pool)
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        let applied = init_db(&pool.conn)?;
        Ok(Self { pool, applied })
    }

    /// Migrations that ran when this storage was opened.
    pub fn applied_migrations(&self) -> &[AppliedMigration] {
        &self.applied
    }

    /// Underlying connection, used for the internal log.
    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }
}

impl KeyValueStore for SqliteStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        kv::get_value(&self.pool.conn, key)
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        kv::put_value(&self.pool.conn, key, value)
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        kv::delete_value(&self.pool.conn, key)?;
        Ok(())
    }
}
