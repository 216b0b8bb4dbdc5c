// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Worker, WorkerNumber};
use std::collections::HashSet;

/// Upper bound on carts a console can run in one day.
pub const MAX_CART_COUNT: u32 = 200;

/// Validates that a worker's basic field constraints are met.
///
/// This function checks that required fields are not empty.
/// It does NOT check for uniqueness (that requires the whole roster).
///
/// # Errors
///
/// Returns an error if:
/// - The worker number is empty
/// - Both name parts are empty
pub fn validate_worker_fields(worker: &Worker) -> Result<(), DomainError> {
    if worker.worker_number.value().is_empty() {
        return Err(DomainError::InvalidWorkerNumber(String::from(
            "Worker number cannot be empty",
        )));
    }

    if worker.first_name.is_empty() && worker.last_name.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "First and last name cannot both be empty",
        )));
    }

    Ok(())
}

/// Validates that every worker number in a roster is unique.
///
/// # Errors
///
/// Returns `DomainError::DuplicateWorkerNumber` naming the first repeat.
pub fn validate_worker_numbers_unique(workers: &[Worker]) -> Result<(), DomainError> {
    let mut seen: HashSet<&WorkerNumber> = HashSet::with_capacity(workers.len());

    for worker in workers {
        if !seen.insert(&worker.worker_number) {
            return Err(DomainError::DuplicateWorkerNumber(
                worker.worker_number.clone(),
            ));
        }
    }

    Ok(())
}

/// Validates an operator-requested cart count.
///
/// Zero is allowed and removes every cart.
///
/// # Errors
///
/// Returns `DomainError::InvalidCartCount` above `MAX_CART_COUNT`.
pub const fn validate_cart_count(count: u32) -> Result<(), DomainError> {
    if count > MAX_CART_COUNT {
        return Err(DomainError::InvalidCartCount { count });
    }
    Ok(())
}
