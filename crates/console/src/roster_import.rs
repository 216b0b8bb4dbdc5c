// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Worker roster import from the season's workers sheet.
//!
//! The sheet has a header row followed by positional columns:
//!
//! | # | Column |
//! |---|---|
//! | 0 | worker number |
//! | 1, 2 | first name, last name |
//! | 3, 4 | cell phone, home phone (digits kept) |
//! | 5 | email |
//! | 6, 7 | address, city |
//! | 8 | status (`Alumni`, anything else is Rookie) |
//! | 9 | days worked in previous years |
//! | 10..=13 | aeration, rejuvenation, sealing and cleaning silvers in previous years |
//! | 14 | shuttle line |
//!
//! Workers already on the roster are never overwritten.

use crate::error::ConsoleError;
use csv::StringRecord;
use doorbook_domain::{
    ContactInfo, PriorSeasons, Tenure, Worker, WorkerNumber, validate_worker_fields,
};
use serde::Serialize;
use std::collections::HashSet;
use std::io::Read;
use tracing::{debug, info};

/// A row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// 1-based, excluding the header.
    pub row_number: usize,
    pub errors: Vec<String>,
}

/// The outcome of parsing a workers sheet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkerImport {
    /// New workers, in sheet order.
    pub workers: Vec<Worker>,
    /// Rows naming a worker that already exists, or repeating an earlier row.
    pub skipped_existing: usize,
    pub rejected: Vec<RejectedRow>,
}

fn text(record: &StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn phone(record: &StringRecord, idx: usize) -> Option<String> {
    text(record, idx)
        .map(|raw| raw.chars().filter(char::is_ascii_digit).collect::<String>())
        .filter(|digits| !digits.is_empty())
}

fn counter(record: &StringRecord, idx: usize, name: &str, errors: &mut Vec<String>) -> u32 {
    text(record, idx).map_or(0, |raw| {
        raw.parse::<u32>().unwrap_or_else(|_| {
            errors.push(format!("{name}: invalid number '{raw}'"));
            0
        })
    })
}

fn parse_worker(record: &StringRecord, number: WorkerNumber) -> Result<Worker, Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    let first_name: String = text(record, 1).unwrap_or_default();
    let last_name: String = text(record, 2).unwrap_or_default();
    let mut worker: Worker = Worker::new(number, &first_name, &last_name);

    worker.contact = ContactInfo {
        cell_phone: phone(record, 3),
        home_phone: phone(record, 4),
        email: text(record, 5),
        address: text(record, 6),
        city: text(record, 7),
        shuttle_line: text(record, 14),
    };
    worker.tenure = match text(record, 8) {
        Some(status) if status.eq_ignore_ascii_case("alumni") => Tenure::Alumni,
        _ => Tenure::Rookie,
    };
    worker.prior_seasons = PriorSeasons {
        days_worked: counter(record, 9, "days_worked_previous_years", &mut errors),
        aeration_silvers: counter(record, 10, "aeration_silvers", &mut errors),
        rejuvenation_silvers: counter(record, 11, "rejuvenation_silvers", &mut errors),
        sealing_silvers: counter(record, 12, "sealing_silvers", &mut errors),
        cleaning_silvers: counter(record, 13, "cleaning_silvers", &mut errors),
    };

    if let Err(e) = validate_worker_fields(&worker) {
        errors.push(e.to_string());
    }

    if errors.is_empty() {
        Ok(worker)
    } else {
        Err(errors)
    }
}

/// Parses a workers sheet against the current roster.
///
/// Rows without a worker number are ignored.
///
/// # Errors
///
/// Returns `ConsoleError::InvalidCsv` if the sheet cannot be read.
pub fn parse_workers_csv<R: Read>(
    reader: R,
    existing: &[Worker],
) -> Result<WorkerImport, ConsoleError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut seen: HashSet<WorkerNumber> =
        existing.iter().map(|w| w.worker_number.clone()).collect();
    let mut import: WorkerImport = WorkerImport::default();

    for (idx, record) in reader.records().enumerate() {
        let record: StringRecord = record?;
        let row_number: usize = idx + 1;

        let Some(raw_number) = text(&record, 0) else {
            debug!(row = row_number, "Skipping row without a worker number");
            continue;
        };
        let number: WorkerNumber = WorkerNumber::new(&raw_number);
        if seen.contains(&number) {
            import.skipped_existing += 1;
            continue;
        }

        match parse_worker(&record, number) {
            Ok(worker) => {
                seen.insert(worker.worker_number.clone());
                import.workers.push(worker);
            }
            Err(errors) => import.rejected.push(RejectedRow { row_number, errors }),
        }
    }

    info!(
        added = import.workers.len(),
        skipped = import.skipped_existing,
        rejected = import.rejected.len(),
        "Parsed workers sheet"
    );
    Ok(import)
}
