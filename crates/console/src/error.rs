// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Errors reported at the console boundary.

use doorbook::CoreError;
use doorbook_domain::DomainError;
use doorbook_store::PersistenceError;
use thiserror::Error;

/// Errors a console session reports to its host.
///
/// Only `Validation` and `NotFound` come from operator input. Both leave the
/// roster untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// The operation was rejected by a roster rule.
    #[error("Validation failed: {0}")]
    Validation(CoreError),
    /// The operation named a worker or cart that does not exist.
    #[error("Not found: {0}")]
    NotFound(CoreError),
    /// The store could not be read.
    #[error("Storage failure: {0}")]
    Storage(#[from] PersistenceError),
    /// The console configuration could not be used.
    #[error("Invalid configuration: {reason}")]
    Configuration {
        /// What was wrong with it.
        reason: String,
    },
    /// A CSV import could not be read at all.
    #[error("Invalid CSV: {reason}")]
    InvalidCsv {
        /// What was wrong with it.
        reason: String,
    },
}

impl ConsoleError {
    /// Returns true if the operator can correct the input and retry.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}

impl From<CoreError> for ConsoleError {
    fn from(err: CoreError) -> Self {
        if err.is_not_found() {
            Self::NotFound(err)
        } else {
            Self::Validation(err)
        }
    }
}

impl From<DomainError> for ConsoleError {
    fn from(err: DomainError) -> Self {
        Self::from(CoreError::from(err))
    }
}

impl From<csv::Error> for ConsoleError {
    fn from(err: csv::Error) -> Self {
        Self::InvalidCsv {
            reason: err.to_string(),
        }
    }
}
