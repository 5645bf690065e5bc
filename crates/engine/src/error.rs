// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker Manager / Pane Monitor error taxonomy.

use sq_core::worker::WorkerType;

#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error("session error: {0}")]
    Session(#[from] sq_adapters::SessionError),

    #[error("prompt error: {0}")]
    Prompt(#[from] sq_prompt::PromptError),

    #[error("worker {0} is missing its mission prompt")]
    MissingPrompt(WorkerType),

    #[error("worker {0} is already running")]
    AlreadyRunning(WorkerType),

    #[error("no pane assigned to worker {0} after session setup")]
    PaneNotFound(WorkerType),
}

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("session error: {0}")]
    Session(#[from] sq_adapters::SessionError),
}
