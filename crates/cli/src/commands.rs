// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Runs one CLI subcommand against an open session and renders its result
//! as JSON.

use crate::CliCommand;
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use doorbook::{Clock, Command, FollowUp, NoCommission, PayoutQuote, RolloverOutcome};
use doorbook_console::{ConsoleSession, Executed, Imported, SessionStart};
use doorbook_domain::{CartId, RouteManager, WorkerNumber};
use serde_json::{Value, json};
use std::fs::File;
use tracing::{info, warn};

/// Starts the session, then runs `command`.
///
/// Every subcommand first brings the roster up to the current operating
/// day, so `rollover` only reports what that start did.
pub fn run<C: Clock>(session: &mut ConsoleSession<C>, command: &CliCommand) -> Result<Value> {
    let start: SessionStart = session.start()?;
    if !start.persistence.is_persisted() {
        warn!("Rollover is held in memory only");
    }

    match command {
        CliCommand::Rollover => Ok(render_start(&start)?),
        CliCommand::Roster => Ok(serde_json::to_value(session.board()?)?),
        CliCommand::MarkShowed { worker_number } => execute(
            session,
            Command::MarkShowed {
                worker_number: WorkerNumber::new(worker_number),
            },
        ),
        CliCommand::Assign {
            worker_number,
            manager,
            cart,
        } => {
            let worker_number: WorkerNumber = WorkerNumber::new(worker_number);
            let command: Command = match (manager, cart) {
                (Some(name), _) => Command::AssignRouteManager {
                    worker_number,
                    manager: Some(RouteManager::new(name)),
                },
                (None, Some(id)) => Command::AssignCart {
                    worker_number,
                    cart_id: Some(CartId::new(*id)?),
                },
                (None, None) => return Err(eyre!("Pass --manager or --cart")),
            };
            execute(session, command)
        }
        CliCommand::Finalize => execute(session, Command::FinalizeAttendance),
        CliCommand::ModifyAttendance => execute(session, Command::ModifyAttendance),
        CliCommand::PayoutPreview { .. } => {
            let quotes: Vec<PayoutQuote> = session.quote_payouts(&NoCommission);
            info!(quotes = quotes.len(), "Quoted payouts");
            Ok(json!({
                "today": session.today(),
                "quotes": quotes,
            }))
        }
        CliCommand::ImportWorkers { sheet } => {
            let file: File = File::open(sheet)
                .wrap_err_with(|| format!("Failed to open workers sheet {}", sheet.display()))?;
            let imported: Imported = session.import_workers(file)?;
            Ok(json!({
                "added": imported.import.workers.len(),
                "skippedExisting": imported.import.skipped_existing,
                "rejected": imported.import.rejected,
                "persistence": imported.persistence,
            }))
        }
    }
}

fn execute<C: Clock>(session: &mut ConsoleSession<C>, command: Command) -> Result<Value> {
    let executed: Executed = session.execute(command)?;
    Ok(json!({
        "changed": executed.event.is_some(),
        "event": executed.event,
        "followUp": executed.follow_up.map(render_follow_up),
        "persistence": executed.persistence,
    }))
}

fn render_follow_up(follow_up: FollowUp) -> Value {
    match follow_up {
        FollowUp::ChooseNextBooking {
            worker_number,
            earliest,
        } => json!({
            "prompt": "chooseNextBooking",
            "workerNumber": worker_number,
            "earliest": earliest,
        }),
    }
}

fn render_start(start: &SessionStart) -> serde_json::Result<Value> {
    let archived: Vec<String> = start.archived.iter().map(ToString::to_string).collect();
    let rendered: Value = match &start.outcome {
        RolloverOutcome::FirstRun { today } => json!({ "outcome": "firstRun", "today": today }),
        RolloverOutcome::AlreadyCurrent { today } => {
            json!({ "outcome": "alreadyCurrent", "today": today })
        }
        RolloverOutcome::ClockBehind {
            last_processed,
            today,
        } => json!({
            "outcome": "clockBehind",
            "lastProcessed": last_processed,
            "today": today,
        }),
        RolloverOutcome::Advanced(rolled) => json!({
            "outcome": "advanced",
            "report": serde_json::to_value(&rolled.report)?,
            "archived": archived,
        }),
    };
    Ok(rendered)
}
