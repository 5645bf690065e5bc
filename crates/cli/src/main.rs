// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! sigmaq - supervisor CLI for the sigma-quant agent pipeline

mod color;
mod commands;
mod context;
mod env;
mod output;
mod table;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use sq_adapters::TmuxAdapter;
use sq_core::queue_item::QueueName;
use sq_engine::WorkerManager;
use sq_health::HealthChecker;
use sq_queue::{PipelineView, QueueStore};

use crate::context::Context;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "sigmaq", version, about = "Supervisor for the sigma-quant agent pipeline")]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Queue management
    Queue(commands::queue::QueueArgs),
    /// Worker management
    Worker(commands::worker::WorkerArgs),
    /// Run health checks
    Health(commands::health::HealthArgs),
    /// Show a dashboard snapshot
    Status {},
    /// Start the supervisor: workers, pane monitor, and queue watcher
    Run {},
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env::log_filter()))
        .init();

    let format = cli.output;

    match cli.command {
        Commands::Queue(args) => {
            let ctx = Context::load()?;
            commands::queue::handle(args.command, &ctx.paths, format)?;
        }
        Commands::Worker(args) => {
            let ctx = Context::load()?;
            let manager = build_manager(&ctx);
            commands::worker::handle(args.command, &manager, ctx.prompt_vars(), format).await?;
        }
        Commands::Health(args) => {
            let ctx = Context::load_for_health()?;
            let checker = HealthChecker::new(ctx.paths.clone(), ctx.config.clone(), ctx.tmux_adapter());
            let healthy = commands::health::handle(args, &checker, format).await?;
            if !healthy {
                std::process::exit(1);
            }
        }
        Commands::Status {} => {
            let ctx = Context::load()?;
            let manager = build_manager(&ctx);
            let pipeline = build_pipeline(&ctx)?;
            let snapshot = sq_dashboard::capture(&manager, &pipeline, &ctx.paths)?;
            commands::status::handle(&snapshot, format)?;
        }
        Commands::Run {} => {
            let ctx = Context::load()?;
            let manager = Arc::new(build_manager(&ctx));
            commands::run::handle(&ctx.paths, manager, ctx.prompt_vars()).await?;
        }
    }
    Ok(())
}

fn build_manager(ctx: &Context) -> WorkerManager<TmuxAdapter> {
    WorkerManager::new(ctx.tmux_adapter(), ctx.paths.clone(), ctx.session_name())
}

fn build_pipeline(ctx: &Context) -> Result<PipelineView> {
    let mut stores = HashMap::new();
    for name in QueueName::ALL {
        stores.insert(name, Arc::new(QueueStore::new(name, ctx.paths.queue_dir(name))?));
    }
    Ok(PipelineView::new(stores))
}
