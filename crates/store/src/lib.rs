// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Key-value persistence for doorbook consoles.
//!
//! A [`Store`] wraps a raw [`KeyValueStore`] backend. It only accepts the
//! keys listed in [`StorageKey`], encodes values as JSON, and publishes a
//! [`ChangeEvent`] after every successful write or removal.
//!
//! ## Backends
//!
//! - [`MemoryStore`]: process-lifetime map, used in tests and embedding
//! - [`SqliteStore`]: Diesel over `SQLite`, one `kv_entries` table, WAL mode
//!   for file databases and uniquely named shared in-memory databases for
//!   tests

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod diesel_schema;
mod error;
mod key;

#[cfg(test)]
mod tests;

pub use backend::KeyValueStore;
pub use backend::memory::MemoryStore;
pub use backend::sqlite::SqliteStore;
pub use error::PersistenceError;
pub use key::StorageKey;

use doorbook_domain::CalendarDay;
use doorbook_events::{ChangeEvent, ChangeNotifier};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// A recognized-key JSON store that announces its writes.
pub struct Store {
    backend: Box<dyn KeyValueStore + Send>,
    notifier: ChangeNotifier,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Wraps a backend.
    #[must_use]
    pub fn new<B: KeyValueStore + Send + 'static>(backend: B, notifier: ChangeNotifier) -> Self {
        Self {
            backend: Box::new(backend),
            notifier,
        }
    }

    /// A store on a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory(notifier: ChangeNotifier) -> Self {
        Self::new(MemoryStore::new(), notifier)
    }

    /// Returns the notifier writes are announced on.
    #[must_use]
    pub const fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Reads and decodes `key`, or returns `default` if it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored value does not
    /// decode as `T`.
    pub fn get<T: DeserializeOwned>(
        &mut self,
        key: StorageKey,
        default: T,
    ) -> Result<T, PersistenceError> {
        Ok(self.get_optional(key)?.unwrap_or(default))
    }

    /// Reads and decodes `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored value does not
    /// decode as `T`.
    pub fn get_optional<T: DeserializeOwned>(
        &mut self,
        key: StorageKey,
    ) -> Result<Option<T>, PersistenceError> {
        let name: String = key.to_string();
        match self.backend.read(&name)? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
                warn!(key = %name, error = %e, "Stored value did not decode");
                PersistenceError::from(e)
            }),
        }
    }

    /// Returns true if `key` holds a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn contains(&mut self, key: StorageKey) -> Result<bool, PersistenceError> {
        Ok(self.backend.read(&key.to_string())?.is_some())
    }

    /// Encodes and writes `value` under `key`, then announces the write.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the backend fails. Nothing is
    /// announced on failure.
    pub fn set<T: Serialize + ?Sized>(
        &mut self,
        key: StorageKey,
        value: &T,
    ) -> Result<(), PersistenceError> {
        let name: String = key.to_string();
        let encoded: String = serde_json::to_string(value)?;
        self.backend.write(&name, &encoded)?;
        debug!(key = %name, "Stored value");
        self.notifier.notify(&ChangeEvent::KeyWritten { key: name });
        Ok(())
    }

    /// Writes a JSON value under a key given by name.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UnrecognizedKey` for names outside
    /// [`StorageKey`], or an error if the backend fails.
    pub fn set_by_name(
        &mut self,
        name: &str,
        value: &serde_json::Value,
    ) -> Result<StorageKey, PersistenceError> {
        let key: StorageKey = name.parse()?;
        self.set(key, value)?;
        Ok(key)
    }

    /// Removes `key`. Returns true if a value was present.
    ///
    /// Removing an absent key is not announced.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn remove(&mut self, key: StorageKey) -> Result<bool, PersistenceError> {
        let name: String = key.to_string();
        let removed: bool = self.backend.delete(&name)?;
        if removed {
            debug!(key = %name, "Removed value");
            self.notifier.notify(&ChangeEvent::KeyRemoved { key: name });
        }
        Ok(removed)
    }

    /// Lists the days that have at least one archived key, oldest first.
    ///
    /// Stored keys that are not recognized are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn archived_days(&mut self) -> Result<Vec<CalendarDay>, PersistenceError> {
        let days: BTreeSet<CalendarDay> = self
            .backend
            .keys()?
            .iter()
            .filter_map(|name| name.parse::<StorageKey>().ok())
            .filter_map(|key| key.archive_day())
            .collect();
        Ok(days.into_iter().collect())
    }
}
