// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pane Monitor: polls worker panes, scans for markers, and tracks staleness.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use sq_adapters::SessionAdapter;
use sq_core::worker::{WorkerState, WorkerType};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::manager::WorkerManager;
use crate::markers::{self, MarkerEffect};

/// Lines of pane scrollback captured per tick.
const CAPTURE_LINES: u32 = 200;

/// Notification emitted on the outbound channel after a worker's state is
/// updated under the Manager's lock. Best-effort: if no consumer is ready
/// the update is dropped, since Manager state has already been applied.
#[derive(Debug, Clone)]
pub struct WorkerUpdate {
    pub worker_type: WorkerType,
    pub state: WorkerState,
    pub task: Option<String>,
    pub error: Option<String>,
}

impl WorkerUpdate {
    fn from_effect(worker_type: WorkerType, effect: &MarkerEffect) -> Self {
        Self {
            worker_type,
            state: effect.state,
            task: effect.task.clone(),
            error: effect.error.clone(),
        }
    }
}

struct PaneTracker {
    last_buffer: String,
    last_change: Instant,
    last_effect: Option<MarkerEffect>,
}

/// Polls panes at a configured interval and feeds updates into the Manager.
pub struct PaneMonitor<A: SessionAdapter> {
    manager: Arc<WorkerManager<A>>,
    poll_interval: Duration,
    stale_threshold: Duration,
}

impl<A: SessionAdapter> PaneMonitor<A> {
    pub fn new(manager: Arc<WorkerManager<A>>, poll_interval: Duration, stale_threshold: Duration) -> Self {
        Self { manager, poll_interval, stale_threshold }
    }

    /// Run the poll loop until `token` is cancelled, closing `tx` on exit.
    pub async fn run(&self, tx: mpsc::Sender<WorkerUpdate>, token: CancellationToken) {
        let mut trackers: HashMap<WorkerType, PaneTracker> = HashMap::new();
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
            self.tick(&mut trackers, &tx).await;
        }
    }

    /// One poll iteration: capture every non-stopped worker's pane, apply
    /// marker or staleness effects, and best-effort-notify `tx`.
    async fn tick(&self, trackers: &mut HashMap<WorkerType, PaneTracker>, tx: &mpsc::Sender<WorkerUpdate>) {
        let session_name = self.manager.session_name().to_string();
        if !self.manager.adapter().session_exists(&session_name).await.unwrap_or(false) {
            return;
        }

        for worker_type in self.manager.non_stopped_workers() {
            let Some(pane) = self.manager.pane_for(worker_type) else { continue };
            let Ok(buffer) = self.manager.adapter().capture_output(&pane, CAPTURE_LINES).await else { continue };

            let now = Instant::now();
            let stale_effect = match trackers.get_mut(&worker_type) {
                Some(tracker) if tracker.last_buffer == buffer => {
                    if now.duration_since(tracker.last_change) > self.stale_threshold {
                        Some(MarkerEffect {
                            state: WorkerState::Error,
                            task: None,
                            error: Some(format!(
                                "pane output unchanged for longer than {}s",
                                self.stale_threshold.as_secs()
                            )),
                            increment_sessions_run: false,
                        })
                    } else {
                        None
                    }
                }
                _ => {
                    trackers.insert(
                        worker_type,
                        PaneTracker { last_buffer: buffer.clone(), last_change: now, last_effect: None },
                    );
                    None
                }
            };

            let effect = markers::scan(&buffer).or(stale_effect);

            if let Some(effect) = effect {
                let previous = trackers.get(&worker_type).and_then(|t| t.last_effect.clone());
                if previous.as_ref() != Some(&effect) {
                    self.manager.apply_update(worker_type, &effect);
                    let _ = tx.try_send(WorkerUpdate::from_effect(worker_type, &effect));
                }
                if let Some(tracker) = trackers.get_mut(&worker_type) {
                    tracker.last_effect = Some(effect);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
