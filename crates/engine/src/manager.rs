// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker Manager: owns the four workers inside one multiplexer session.

use std::collections::HashMap;
use std::time::SystemTime;

use parking_lot::Mutex;
use sq_adapters::SessionAdapter;
use sq_core::paths::Paths;
use sq_core::worker::{Worker, WorkerState, WorkerType};
use sq_prompt::PromptVars;

use crate::error::ManagerError;

/// The interrupt key sequence recognized by the multiplexer to stop the
/// foreground process in a pane without killing the pane itself.
const INTERRUPT_KEYS: &str = "C-c";

struct Panes {
    /// Pane target ids, indexed by `WorkerType::pane_index()`.
    by_index: [String; 4],
}

/// Owns the four workers inside one multiplexer session.
///
/// All mutations to the workers map are serialized under `workers`; the
/// Pane Monitor is the only other writer and takes the same lock.
pub struct WorkerManager<A: SessionAdapter> {
    adapter: A,
    paths: Paths,
    session_name: String,
    workers: Mutex<HashMap<WorkerType, Worker>>,
    panes: Mutex<Option<Panes>>,
}

impl<A: SessionAdapter> WorkerManager<A> {
    pub fn new(adapter: A, paths: Paths, session_name: impl Into<String>) -> Self {
        let mut workers = HashMap::new();
        for worker_type in WorkerType::ALL {
            workers.insert(worker_type, Worker::new(worker_type));
        }
        Self {
            adapter,
            paths,
            session_name: session_name.into(),
            workers: Mutex::new(workers),
            panes: Mutex::new(None),
        }
    }

    /// Ensure the session and its 2x2 pane grid exist, caching pane ids.
    async fn ensure_session(&self) -> Result<(), ManagerError> {
        if self.panes.lock().is_some() {
            return Ok(());
        }

        if !self.adapter.session_exists(&self.session_name).await? {
            self.adapter.spawn(&self.session_name, &self.paths.root, "bash", &[]).await?;
        }

        let grid = self.adapter.layout_grid_2x2(&self.session_name).await?;
        let by_index: [String; 4] = grid.try_into().map_err(|_| {
            sq_adapters::SessionError::CommandFailed("layout_grid_2x2 did not return four panes".to_string())
        })?;
        *self.panes.lock() = Some(Panes { by_index });
        Ok(())
    }

    fn pane_target(&self, worker_type: WorkerType) -> Option<String> {
        self.panes.lock().as_ref().map(|p| p.by_index[worker_type.pane_index()].clone())
    }

    /// Start one worker: creates the session/grid if needed, resolves its
    /// mission prompt, and launches the iteration loop in its pane.
    pub async fn start(&self, worker_type: WorkerType, vars: PromptVars) -> Result<(), ManagerError> {
        if sq_prompt::all_prompts_exist(&self.paths).contains(&worker_type) {
            return Err(ManagerError::MissingPrompt(worker_type));
        }
        {
            let workers = self.workers.lock();
            if let Some(worker) = workers.get(&worker_type) {
                if worker.state == WorkerState::Running {
                    return Err(ManagerError::AlreadyRunning(worker_type));
                }
            }
        }

        self.ensure_session().await?;
        let prompt = sq_prompt::resolve(&self.paths, worker_type, vars)?;

        let prompt_path = self.paths.root.join("prompts").join(format!(".resolved-{worker_type}.md"));
        std::fs::write(&prompt_path, &prompt).map_err(|e| {
            sq_adapters::SessionError::SpawnFailed(format!("writing resolved prompt: {e}"))
        })?;

        let pane = self.pane_target(worker_type).ok_or(ManagerError::PaneNotFound(worker_type))?;
        let command = format!("sigmaq-iterate --prompt {}", prompt_path.display());
        self.adapter.send_literal(&pane, &command).await?;
        self.adapter.send_enter(&pane).await?;

        let mut workers = self.workers.lock();
        if let Some(worker) = workers.get_mut(&worker_type) {
            worker.state = WorkerState::Running;
            worker.started_at = Some(SystemTime::now());
        }
        Ok(())
    }

    /// Start all four workers. Fails fast on the first error.
    pub async fn start_all(&self, vars_for: impl Fn(WorkerType) -> PromptVars) -> Result<(), ManagerError> {
        for worker_type in WorkerType::ALL {
            self.start(worker_type, vars_for(worker_type)).await?;
        }
        Ok(())
    }

    /// Send the interrupt sequence and mark the worker stopping then stopped.
    pub async fn stop(&self, worker_type: WorkerType) -> Result<(), ManagerError> {
        {
            let mut workers = self.workers.lock();
            if let Some(worker) = workers.get_mut(&worker_type) {
                worker.state = WorkerState::Stopping;
            }
        }

        if let Some(pane) = self.pane_target(worker_type) {
            self.adapter.send(&pane, INTERRUPT_KEYS).await?;
        }

        let mut workers = self.workers.lock();
        if let Some(worker) = workers.get_mut(&worker_type) {
            worker.state = WorkerState::Stopped;
        }
        Ok(())
    }

    /// Stop all workers, then kill the session entirely.
    pub async fn shutdown(&self) -> Result<(), ManagerError> {
        for worker_type in WorkerType::ALL {
            self.stop(worker_type).await?;
        }
        self.adapter.kill(&self.session_name).await?;
        *self.panes.lock() = None;
        Ok(())
    }

    /// Snapshot copy of the four worker records. Callers never hold live references.
    pub fn worker_states(&self) -> Vec<Worker> {
        let workers = self.workers.lock();
        WorkerType::ALL.into_iter().map(|wt| workers[&wt].clone()).collect()
    }

    /// Apply a Pane Monitor update to one worker under the shared lock.
    pub(crate) fn apply_update(&self, worker_type: WorkerType, effect: &crate::markers::MarkerEffect) {
        let mut workers = self.workers.lock();
        if let Some(worker) = workers.get_mut(&worker_type) {
            worker.state = effect.state;
            if let Some(task) = &effect.task {
                worker.current_task = Some(task.clone());
            }
            if let Some(error) = &effect.error {
                worker.last_error = Some(error.clone());
            }
            if effect.increment_sessions_run {
                worker.sessions_run += 1;
            }
        }
    }

    pub(crate) fn pane_for(&self, worker_type: WorkerType) -> Option<String> {
        self.pane_target(worker_type)
    }

    pub(crate) fn session_name(&self) -> &str {
        &self.session_name
    }

    pub(crate) fn adapter(&self) -> &A {
        &self.adapter
    }

    pub(crate) fn non_stopped_workers(&self) -> Vec<WorkerType> {
        let workers = self.workers.lock();
        WorkerType::ALL.into_iter().filter(|wt| workers[wt].state != WorkerState::Stopped).collect()
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
