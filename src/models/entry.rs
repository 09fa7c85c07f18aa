use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Diesel model representing the `kv_entries` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::kv_entries, primary_key(key))]
pub struct KvEntry {
    pub key: String,
    pub value: String,
    pub updated_at: NaiveDateTime,
}

/// Insertable/patchable form of [`KvEntry`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::kv_entries, primary_key(key))]
pub struct NewKvEntry<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub updated_at: NaiveDateTime,
}
