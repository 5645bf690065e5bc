// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status command: a read-only Dashboard Snapshot rendered as a compact,
//! multi-section table.

use anyhow::Result;

use sq_dashboard::DashboardSnapshot;

use crate::output::OutputFormat;
use crate::table::{Column, Table};

pub fn handle(snapshot: &DashboardSnapshot, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(snapshot)?);
        }
        OutputFormat::Text => {
            println!("Workers:");
            let mut workers = Table::new(vec![
                Column::left("WORKER"),
                Column::status("STATE"),
                Column::left("CURRENT TASK"),
            ]);
            for worker in &snapshot.workers {
                workers.row(vec![
                    worker.worker_type.to_string(),
                    worker.state.to_string(),
                    worker.current_task.clone().unwrap_or_else(|| "-".to_string()),
                ]);
            }
            workers.render(&mut std::io::stdout());

            println!("\nQueues:");
            let mut queues = Table::new(vec![
                Column::left("QUEUE"),
                Column::right("PENDING"),
                Column::right("CLAIMED"),
                Column::right("TOTAL"),
            ]);
            for depth in &snapshot.queues {
                queues.row(vec![
                    depth.name.to_string(),
                    depth.pending.to_string(),
                    depth.claimed.to_string(),
                    depth.total.to_string(),
                ]);
            }
            queues.render(&mut std::io::stdout());

            println!("\nStrategy output:");
            let s = &snapshot.strategies;
            println!(
                "  good={} under_review={} rejected={} prop_firm_ready={}",
                s.good, s.under_review, s.rejected, s.prop_firm_ready
            );
        }
    }
    Ok(())
}
