// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker role, lifecycle state, and the mutable worker record owned by the manager.

use std::time::SystemTime;

/// One of the four long-lived roles running inside a multiplexer pane.
///
/// Role identity determines prompt file, pane index, and queue routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerType {
    Researcher,
    Converter,
    Backtester,
    Optimizer,
}

impl WorkerType {
    /// All four roles, in canonical pane order.
    pub const ALL: [WorkerType; 4] = [
        WorkerType::Researcher,
        WorkerType::Converter,
        WorkerType::Backtester,
        WorkerType::Optimizer,
    ];

    /// Fixed mapping from role to pane index within the 2x2 grid.
    ///
    /// Explicit rather than derived from enum discriminant or iteration
    /// order, so adding a role later cannot silently reshuffle panes.
    pub fn pane_index(&self) -> usize {
        match self {
            WorkerType::Researcher => 0,
            WorkerType::Converter => 1,
            WorkerType::Backtester => 2,
            WorkerType::Optimizer => 3,
        }
    }

    /// Lowercase name used for prompt filenames and CLI args.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerType::Researcher => "researcher",
            WorkerType::Converter => "converter",
            WorkerType::Backtester => "backtester",
            WorkerType::Optimizer => "optimizer",
        }
    }
}

impl std::fmt::Display for WorkerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WorkerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "researcher" => Ok(WorkerType::Researcher),
            "converter" => Ok(WorkerType::Converter),
            "backtester" => Ok(WorkerType::Backtester),
            "optimizer" => Ok(WorkerType::Optimizer),
            other => Err(format!("unknown worker type: {other}")),
        }
    }
}

/// Lifecycle state of a worker. Written only by the Pane Monitor and the
/// Worker Manager; no other component mutates this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerState {
    Starting,
    Running,
    Idle,
    Stopping,
    Stopped,
    Error,
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WorkerState::Starting => "starting",
            WorkerState::Running => "running",
            WorkerState::Idle => "idle",
            WorkerState::Stopping => "stopping",
            WorkerState::Stopped => "stopped",
            WorkerState::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// Mutable record owned by the Worker Manager. Created at session
/// construction, mutated by Manager (Start/Stop) and Monitor
/// (state/task/counters from parsed markers), dropped with the Manager.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Worker {
    pub worker_type: WorkerType,
    pub pane_index: usize,
    pub state: WorkerState,
    pub sessions_run: u64,
    pub tasks_completed: u64,
    pub current_task: Option<String>,
    pub last_error: Option<String>,
    pub started_at: Option<SystemTime>,
}

impl Worker {
    pub fn new(worker_type: WorkerType) -> Self {
        Self {
            pane_index: worker_type.pane_index(),
            worker_type,
            state: WorkerState::Stopped,
            sessions_run: 0,
            tasks_completed: 0,
            current_task: None,
            last_error: None,
            started_at: None,
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
