// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` key-value backend.
//!
//! One `kv_entries` table holds every key. PRAGMA statements are raw SQL
//! because Diesel has no PRAGMA DSL.

use diesel::prelude::*;
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use super::KeyValueStore;
use crate::diesel_schema::kv_entries;
use crate::error::PersistenceError;

/// `SQLite` migrations.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A store backed by a `SQLite` database.
pub struct SqliteStore {
    conn: SqliteConnection,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Creates a store on a fresh, uniquely named in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:doorbook_mem_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = initialize_database(&shared_memory_url)?;
        Ok(Self { conn })
    }

    /// Opens or creates a file-based store.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not valid UTF-8 or the database
    /// cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = initialize_database(path_str)?;
        enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }
}

/// Connects to `database_url` and runs pending migrations.
///
/// # Errors
///
/// Returns an error if connection or migration fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!("Initializing SQLite database at: {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    Ok(conn)
}

/// Enables WAL mode for file-based databases.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    Ok(())
}

fn timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

impl KeyValueStore for SqliteStore {
    fn read(&mut self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(kv_entries::table
            .filter(kv_entries::entry_key.eq(key))
            .select(kv_entries::entry_value)
            .first::<String>(&mut self.conn)
            .optional()?)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let updated_at: String = timestamp()?;
        diesel::replace_into(kv_entries::table)
            .values((
                kv_entries::entry_key.eq(key),
                kv_entries::entry_value.eq(value),
                kv_entries::updated_at.eq(updated_at.as_str()),
            ))
            .execute(&mut self.conn)?;
        debug!(key, bytes = value.len(), "Wrote store entry");
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool, PersistenceError> {
        let removed: usize =
            diesel::delete(kv_entries::table.filter(kv_entries::entry_key.eq(key)))
                .execute(&mut self.conn)?;
        Ok(removed > 0)
    }

    fn keys(&mut self) -> Result<Vec<String>, PersistenceError> {
        Ok(kv_entries::table
            .select(kv_entries::entry_key)
            .order(kv_entries::entry_key.asc())
            .load::<String>(&mut self.conn)?)
    }
}
