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
#![allow(clippy::multiple_crate_versions)]

mod commands;

#[cfg(test)]
mod tests;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use doorbook::SystemClock;
use doorbook_console::{ConsoleConfig, ConsoleSession, InMemoryBookings};
use doorbook_domain::SeasonType;
use doorbook_events::ChangeNotifier;
use doorbook_store::{SqliteStore, Store};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

/// Doorbook - operator console for a field-sales crew
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Console profile as JSON. Without one, an unnamed individual console is used.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Hours east of UTC that the crew's operating day follows
    #[arg(long, global = true, default_value_t = 0, allow_hyphen_values = true)]
    utc_offset: i8,

    #[command(subcommand)]
    command: CliCommand,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum CliCommand {
    /// Advance the roster to today, archiving the previous day
    Rollover,

    /// Print today's board
    #[command(visible_alias = "board")]
    Roster,

    /// Record that a worker showed up today
    MarkShowed {
        /// The worker's number
        worker_number: String,
    },

    /// Assign a showed worker to a route manager or a cart
    Assign {
        /// The worker's number
        worker_number: String,

        /// Route manager name
        #[arg(short, long, conflicts_with = "cart", required_unless_present = "cart")]
        manager: Option<String>,

        /// Cart number, starting at 1
        #[arg(long)]
        cart: Option<u32>,
    },

    /// Lock today's attendance
    Finalize,

    /// Reopen today's attendance
    ModifyAttendance,

    /// Quote today's payouts from a bookings export
    PayoutPreview {
        /// Bookings CSV with a `booking_id` column
        #[arg(short, long)]
        bookings: PathBuf,
    },

    /// Add new workers from a workers sheet
    ImportWorkers {
        /// Workers CSV
        sheet: PathBuf,
    },
}

impl CliCommand {
    fn bookings_path(&self) -> Option<&Path> {
        match self {
            Self::PayoutPreview { bookings } => Some(bookings),
            _ => None,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ConsoleConfig> {
    let Some(path) = path else {
        return Ok(ConsoleConfig::new(0, SeasonType::Individual));
    };
    let text: String = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read console profile {}", path.display()))?;
    Ok(ConsoleConfig::from_json(&text)?)
}

fn load_bookings(path: Option<&Path>) -> Result<InMemoryBookings> {
    let Some(path) = path else {
        return Ok(InMemoryBookings::new(Vec::new()));
    };
    let file: File = File::open(path)
        .wrap_err_with(|| format!("Failed to open bookings {}", path.display()))?;
    Ok(InMemoryBookings::from_csv(file)?)
}

fn open_store(path: Option<&Path>, notifier: ChangeNotifier) -> Result<Store> {
    let backend: SqliteStore = if let Some(db_path) = path {
        info!("Using file-based database at: {}", db_path.display());
        SqliteStore::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqliteStore::new_in_memory()?
    };
    Ok(Store::new(backend, notifier))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string())),
        )
        .with_writer(std::io::stderr)
        .init();

    let config: ConsoleConfig = load_config(args.config.as_deref())?;
    let bookings: InMemoryBookings = load_bookings(args.command.bookings_path())?;
    let clock: SystemClock = SystemClock::with_offset_hours(args.utc_offset)?;

    let notifier: ChangeNotifier = ChangeNotifier::new();
    let mut events = notifier.subscribe();
    let store: Store = open_store(args.database.as_deref(), notifier)?;

    let mut session = ConsoleSession::open(store, clock, config, bookings)?;
    let output: serde_json::Value = commands::run(&mut session, &args.command)?;

    while let Ok(event) = events.try_recv() {
        info!(?event, "Change announced");
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
