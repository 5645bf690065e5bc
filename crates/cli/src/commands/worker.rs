// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker command handlers: start/stop/status against a running
//! multiplexer session via the Worker Manager.

use anyhow::Result;
use clap::{Args, Subcommand};

use sq_adapters::TmuxAdapter;
use sq_core::worker::WorkerType;
use sq_engine::WorkerManager;
use sq_prompt::PromptVars;

use crate::output::OutputFormat;
use crate::table::{Column, Table};

#[derive(Args)]
pub struct WorkerArgs {
    #[command(subcommand)]
    pub command: WorkerCommand,
}

#[derive(Subcommand)]
pub enum WorkerCommand {
    /// Start one worker's iteration loop
    Start { worker_type: WorkerType },
    /// Start all four workers
    StartAll {},
    /// Stop one worker (interrupts its pane, leaves the session alive)
    Stop { worker_type: WorkerType },
    /// Stop all workers and kill the session
    StopAll {},
    /// Print the current state of all four workers
    Status {},
}

pub async fn handle(
    command: WorkerCommand,
    manager: &WorkerManager<TmuxAdapter>,
    vars: PromptVars,
    format: OutputFormat,
) -> Result<()> {
    match command {
        WorkerCommand::Start { worker_type } => {
            manager.start(worker_type, vars).await?;
            println!("Started {worker_type}");
        }
        WorkerCommand::StartAll {} => {
            manager.start_all(|_| vars.clone()).await?;
            println!("Started all workers");
        }
        WorkerCommand::Stop { worker_type } => {
            manager.stop(worker_type).await?;
            println!("Stopped {worker_type}");
        }
        WorkerCommand::StopAll {} => {
            manager.shutdown().await?;
            println!("Stopped all workers and killed the session");
        }
        WorkerCommand::Status {} => {
            print_status(manager, format);
        }
    }
    Ok(())
}

fn print_status(manager: &WorkerManager<TmuxAdapter>, format: OutputFormat) {
    let workers = manager.worker_states();
    match format {
        OutputFormat::Json => {
            // Worker doesn't derive Deserialize; Serialize is enough to emit.
            println!("{}", serde_json::to_string_pretty(&workers).unwrap_or_else(|_| "[]".to_string()));
        }
        OutputFormat::Text => {
            let mut table = Table::new(vec![
                Column::left("WORKER"),
                Column::status("STATE"),
                Column::right("SESSIONS"),
                Column::right("TASKS"),
                Column::left("CURRENT TASK"),
                Column::left("LAST ERROR"),
            ]);
            for worker in &workers {
                table.row(vec![
                    worker.worker_type.to_string(),
                    worker.state.to_string(),
                    worker.sessions_run.to_string(),
                    worker.tasks_completed.to_string(),
                    worker.current_task.clone().unwrap_or_else(|| "-".to_string()),
                    worker.last_error.clone().unwrap_or_else(|| "-".to_string()),
                ]);
            }
            table.render(&mut std::io::stdout());
        }
    }
}
