// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Health command: runs the Health Checker and prints a readiness report.

use anyhow::Result;
use clap::Args;

use sq_adapters::TmuxAdapter;
use sq_core::health::{CheckCategory, Report};
use sq_health::HealthChecker;

use crate::color;
use crate::output::OutputFormat;
use crate::table::{Column, Table};

#[derive(Args)]
pub struct HealthArgs {
    /// Restrict to one category (system, project, data, runtime)
    #[arg(long)]
    pub category: Option<CheckCategory>,
}

/// Returns `true` when the report is healthy, so `main` can set the
/// process exit code accordingly.
pub async fn handle(args: HealthArgs, checker: &HealthChecker<TmuxAdapter>, format: OutputFormat) -> Result<bool> {
    let report = match args.category {
        Some(category) => checker.run_category(category).await,
        None => checker.run_all().await,
    };
    print_report(&report, format);
    Ok(report.healthy())
}

fn print_report(report: &Report, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string()));
        }
        OutputFormat::Text => {
            let mut table = Table::new(vec![
                Column::left("PROBE"),
                Column::left("CATEGORY"),
                Column::status("STATUS"),
                Column::left("MESSAGE"),
            ]);
            for result in &report.results {
                table.row(vec![
                    result.name.clone(),
                    result.category.to_string(),
                    result.status.to_string(),
                    result.message.clone(),
                ]);
            }
            table.render(&mut std::io::stdout());
            println!(
                "\n{} passed, {} warned, {} failed — {}",
                report.passed,
                report.warned,
                report.failed,
                if report.healthy() { color::green("healthy") } else { color::status("unhealthy") }
            );
        }
    }
}
