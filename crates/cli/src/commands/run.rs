// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run command: the supervisor entry point. Starts the Worker Manager,
//! Pane Monitor, and Queue Watcher together and blocks until signaled,
//! shutting every component down cooperatively on exit.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use sq_adapters::TmuxAdapter;
use sq_core::paths::Paths;
use sq_core::queue_item::QueueName;
use sq_engine::{PaneMonitor, WorkerManager};
use sq_prompt::PromptVars;
use sq_queue::{QueueStore, QueueWatcher};

pub async fn handle(paths: &Paths, manager: Arc<WorkerManager<TmuxAdapter>>, vars: PromptVars) -> Result<()> {
    let token = CancellationToken::new();

    manager.start_all(|_| vars.clone()).await?;
    info!("all workers started");

    let (update_tx, mut update_rx) = mpsc::channel(64);
    let monitor = PaneMonitor::new(
        Arc::clone(&manager),
        sq_engine::env::monitor_poll_interval(),
        sq_engine::env::stale_threshold(),
    );
    let monitor_token = token.clone();
    let monitor_task = tokio::spawn(async move { monitor.run(update_tx, monitor_token).await });

    let mut stores = HashMap::new();
    for name in QueueName::ALL {
        stores.insert(name, Arc::new(QueueStore::new(name, paths.queue_dir(name))?));
    }
    let mut watcher_rx = QueueWatcher::new(stores)
        .with_debounce(sq_engine::env::watcher_debounce())
        .watch(token.clone())?;

    let updates_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(update) = update_rx.recv() => {
                    info!(worker = %update.worker_type, state = %update.state, "worker update");
                }
                Some(event) = watcher_rx.recv() => {
                    info!(queue = %event.queue, event = ?event.event_type, "queue event");
                }
                else => break,
            }
        }
    });

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
    }

    token.cancel();
    if let Err(e) = manager.shutdown().await {
        warn!(error = %e, "error shutting down worker manager");
    }
    let _ = monitor_task.await;
    let _ = updates_task.await;
    Ok(())
}
