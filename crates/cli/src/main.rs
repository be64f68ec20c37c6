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

mod config;
mod fixture;

use clap::{Args as ClapArgs, Parser, Subcommand};
use field_status::WizardStep;
use field_status_api::{
    OfflineQueue, Progression, ReplaySummary, SqliteOfflineQueue, StatusChangeSession,
    SubmitOutcome, SystemClock, replay_pending,
};
use field_status_domain::StatusDefinition;
use field_status_persistence::{OfflineQueueStore, QueuedEntry};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::Fixture;
use crate::fixture::{StdoutTransport, collaborators};

/// Field status CLI - drive the status change wizard against a fixture
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` offline queue. If not provided, uses an in-memory queue.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Path to the JSON fixture describing the unit, statuses and destinations.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one status change through the wizard.
    ///
    /// Reconciliation of the unit record is started in the background
    /// after an accepted submission and is not awaited; the command can exit
    /// before it logs.
    Submit(SubmitArgs),
    /// Inspect or drain the offline queue.
    #[command(subcommand)]
    Queue(QueueCommand),
}

#[derive(ClapArgs, Debug, Clone)]
struct SubmitArgs {
    /// Status ID from the fixture.
    #[arg(long)]
    status: String,

    /// Respond to this call.
    #[arg(long, conflicts_with = "station")]
    call: Option<String>,

    /// Respond to this station.
    #[arg(long)]
    station: Option<String>,

    /// Explicitly choose no destination, overriding any pre-selected call.
    #[arg(long, conflicts_with_all = ["call", "station"])]
    no_destination: bool,

    /// Note to attach.
    #[arg(long, default_value = "")]
    note: String,

    /// Fail delivery so the change lands in the offline queue.
    #[arg(long)]
    offline: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum QueueCommand {
    /// List pending changes, oldest first.
    List,
    /// Deliver pending changes once, stopping at the first failure.
    Replay,
    /// Remove every pending change.
    Purge,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn open_store(database: Option<&PathBuf>) -> CliResult<OfflineQueueStore> {
    let store: OfflineQueueStore = if let Some(db_path) = database {
        info!("Using offline queue at: {}", db_path.display());
        OfflineQueueStore::new_with_file(db_path)?
    } else {
        info!("Using in-memory offline queue");
        OfflineQueueStore::new_in_memory()?
    };
    Ok(store)
}

async fn run_submit(
    fixture: &Fixture,
    store: Arc<Mutex<OfflineQueueStore>>,
    args: &SubmitArgs,
) -> CliResult<SubmitOutcome> {
    let status: StatusDefinition = fixture.status(&args.status)?.clone();
    let queue: Arc<dyn OfflineQueue> = Arc::new(SqliteOfflineQueue::new(store));
    let session: StatusChangeSession = StatusChangeSession::new(collaborators(
        fixture,
        StdoutTransport {
            offline: args.offline,
        },
        Some(queue),
    ));

    let mut progression: Progression = session.open(Some(status)).await?;
    while let Progression::Step(step) = progression {
        match step {
            WizardStep::SelectStatus => {
                return Err("wizard unexpectedly asked for a status".into());
            }
            WizardStep::SelectDestination => {
                if let Some(call_id) = &args.call {
                    session.select_call(fixture.call(call_id)?.clone()).await?;
                } else if let Some(station_id) = &args.station {
                    session
                        .select_station(fixture.station(station_id)?.clone())
                        .await?;
                } else if args.no_destination {
                    session.select_no_destination().await?;
                }
            }
            WizardStep::AddNote => session.set_note(args.note.clone()).await?,
        }
        progression = session.advance().await?;
    }

    match progression {
        Progression::Submitted(outcome) => Ok(outcome),
        Progression::Step(_) => Err("wizard did not finish".into()),
    }
}

async fn run_queue(
    store: Arc<Mutex<OfflineQueueStore>>,
    command: QueueCommand,
) -> CliResult<()> {
    match command {
        QueueCommand::List => {
            let pending: Vec<QueuedEntry> = store.lock().await.list_pending()?;
            if pending.is_empty() {
                println!("Offline queue is empty");
            }
            for entry in pending {
                println!(
                    "{}\t{}\t{}\t{}\tattempts={}\tqueued_at={}\t{}",
                    entry.queue_id,
                    entry.change.unit_id,
                    entry.change.status_type_id,
                    entry.change.responding_to_id,
                    entry.attempts,
                    entry.queued_at,
                    entry.last_error.unwrap_or_default()
                );
            }
        }
        QueueCommand::Replay => {
            let summary: ReplaySummary =
                replay_pending(&store, &StdoutTransport { offline: false }, &SystemClock).await?;
            println!(
                "Delivered {}, {} remaining",
                summary.delivered, summary.remaining
            );
            if let Some(failure) = summary.failure {
                eprintln!("Replay stopped: {failure}");
            }
        }
        QueueCommand::Purge => {
            let removed: usize = store.lock().await.purge()?;
            println!("Removed {removed} queued status changes");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let store: Arc<Mutex<OfflineQueueStore>> =
        Arc::new(Mutex::new(open_store(args.database.as_ref())?));

    match &args.command {
        Command::Submit(submit) => {
            let config: &PathBuf = args
                .config
                .as_ref()
                .ok_or("--config is required for submit")?;
            let fixture: Fixture = Fixture::load(config)?;
            let outcome: SubmitOutcome = run_submit(&fixture, store, submit).await?;
            info!(?outcome, "Status change finished");
        }
        Command::Queue(command) => run_queue(store, *command).await?,
    }

    Ok(())
}
