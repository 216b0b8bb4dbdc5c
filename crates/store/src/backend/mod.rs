// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Raw key-value backends.
//!
//! Backends store opaque text under text keys. Key recognition, JSON
//! encoding and change notification live in [`crate::Store`].

pub mod memory;
pub mod sqlite;

use crate::error::PersistenceError;

/// A place to keep serialized values.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&mut self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Deletes `key`. Returns true if a value was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn delete(&mut self, key: &str) -> Result<bool, PersistenceError>;

    /// Lists every stored key in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn keys(&mut self) -> Result<Vec<String>, PersistenceError>;
}
