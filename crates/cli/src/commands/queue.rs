// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue command handlers: one-shot operations on the Queue Store, no
//! daemon or running session required.

use anyhow::Result;
use clap::{Args, Subcommand};

use sq_core::paths::Paths;
use sq_core::priority::Priority;
use sq_core::queue_item::{QueueItem, QueueName};
use sq_queue::QueueStore;

use crate::output::{format_time_ago, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args)]
pub struct QueueArgs {
    #[command(subcommand)]
    pub command: QueueCommand,
}

#[derive(Subcommand)]
pub enum QueueCommand {
    /// List items in a queue, high priority first
    List { queue: QueueName },
    /// Push a new pending item
    Push {
        queue: QueueName,
        priority: Priority,
        /// Item payload as a JSON object
        payload: String,
    },
    /// Claim a pending item for a worker
    Claim { queue: QueueName, id: String, worker: String },
    /// Mark a claimed item completed
    Complete { queue: QueueName, id: String },
    /// Mark an item failed, wrapping its payload with the given reason
    Fail { queue: QueueName, id: String, reason: String },
}

fn open(paths: &Paths, queue: QueueName) -> Result<QueueStore> {
    Ok(QueueStore::new(queue, paths.queue_dir(queue))?)
}

pub fn handle(command: QueueCommand, paths: &Paths, format: OutputFormat) -> Result<()> {
    match command {
        QueueCommand::List { queue } => {
            let store = open(paths, queue)?;
            let items = store.list()?;
            print_items(&items, format)?;
        }
        QueueCommand::Push { queue, priority, payload } => {
            let store = open(paths, queue)?;
            let payload: serde_json::Value = serde_json::from_str(&payload)
                .map_err(|e| anyhow::anyhow!("payload must be a JSON object: {e}"))?;
            let item = QueueItem::new(uuid::Uuid::new_v4().to_string(), "cli", priority, payload);
            let id = item.id.clone();
            store.push(&item)?;
            println!("Pushed item {id} to queue {queue}");
        }
        QueueCommand::Claim { queue, id, worker } => {
            let store = open(paths, queue)?;
            store.claim(&id, &worker)?;
            println!("Claimed item {id} in queue {queue} for {worker}");
        }
        QueueCommand::Complete { queue, id } => {
            let store = open(paths, queue)?;
            store.complete(&id)?;
            println!("Completed item {id} in queue {queue}");
        }
        QueueCommand::Fail { queue, id, reason } => {
            let store = open(paths, queue)?;
            store.fail(&id, &reason)?;
            println!("Failed item {id} in queue {queue}: {reason}");
        }
    }
    Ok(())
}

fn print_items(items: &[QueueItem], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items)?);
        }
        OutputFormat::Text => {
            if items.is_empty() {
                println!("No items");
                return Ok(());
            }
            let mut table = Table::new(vec![
                Column::muted("ID"),
                Column::left("PRIORITY"),
                Column::status("STATUS"),
                Column::right("AGE"),
                Column::left("CLAIMED BY"),
            ]);
            for item in items {
                let epoch_ms = item.created_at.timestamp_millis().max(0) as u64;
                table.row(vec![
                    item.id.clone(),
                    item.priority.to_string(),
                    item.status.to_string(),
                    format_time_ago(epoch_ms),
                    item.claimed_by.clone().unwrap_or_else(|| "-".to_string()),
                ]);
            }
            table.render(&mut std::io::stdout());
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
