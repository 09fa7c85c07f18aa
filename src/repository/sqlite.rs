use chrono::Utc;
use diesel::prelude::*;

use crate::db::{DbConnection, DbPool};
use crate::models::entry::{KvEntry, NewKvEntry};
use crate::repository::{KeyValueStore, RepositoryResult};

/// Key-value store backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, so the store can be shared
/// freely.
#[derive(Clone)]
pub struct DieselStore {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselStore {
    /// Create a new store from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

impl KeyValueStore for DieselStore {
    fn get(&self, key: &str) -> RepositoryResult<Option<String>> {
        use crate::schema::kv_entries;

        let mut conn = self.conn()?;

        let entry = kv_entries::table
            .filter(kv_entries::key.eq(key))
            .first::<KvEntry>(&mut conn)
            .optional()?;

        Ok(entry.map(|entry| entry.value))
    }

    fn set(&self, key: &str, value: &str) -> RepositoryResult<()> {
        use crate::schema::kv_entries;

        let mut conn = self.conn()?;
        let entry = NewKvEntry {
            key,
            value,
            updated_at: Utc::now().naive_utc(),
        };

        diesel::insert_into(kv_entries::table)
            .values(&entry)
            .on_conflict(kv_entries::key)
            .do_update()
            .set(&entry)
            .execute(&mut conn)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> RepositoryResult<()> {
        use crate::schema::kv_entries;

        let mut conn = self.conn()?;

        diesel::delete(kv_entries::table.filter(kv_entries::key.eq(key))).execute(&mut conn)?;

        Ok(())
    }
}
