// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Change notifications for views over the workforce roster.
//!
//! Events describe what changed after the fact. They are informational
//! only: subscribers that need authoritative data read it back from the
//! session or the store.

mod notifier;

#[cfg(test)]
mod tests;

pub use notifier::{ChangeNotifier, EVENT_BUFFER_SIZE};

use doorbook_domain::{CalendarDay, WorkerNumber};
use serde::{Deserialize, Serialize};

/// Represents the specific roster action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`MarkShowed`", "`FinalizeAttendance`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A change to canonical state that external views may want to react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    /// A key was written to the key-value store.
    KeyWritten {
        /// The full storage key, including any date suffix.
        key: String,
    },
    /// A key was removed from the key-value store.
    KeyRemoved {
        /// The full storage key, including any date suffix.
        key: String,
    },
    /// A roster transition was applied.
    RosterChanged {
        /// What was done.
        action: Action,
        /// The operating day the transition was applied on.
        date: CalendarDay,
        /// Workers whose records changed.
        affected: Vec<WorkerNumber>,
    },
}

impl ChangeEvent {
    /// Creates a `RosterChanged` event.
    #[must_use]
    pub const fn roster_changed(
        action: Action,
        date: CalendarDay,
        affected: Vec<WorkerNumber>,
    ) -> Self {
        Self::RosterChanged {
            action,
            date,
            affected,
        }
    }

    /// Returns the storage key for store events.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::KeyWritten { key } | Self::KeyRemoved { key } => Some(key),
            Self::RosterChanged { .. } => None,
        }
    }
}
