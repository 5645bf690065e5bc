// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pane stdout marker table and the backward-scan that turns a captured
//! buffer into a worker state update.

use sq_core::worker::WorkerState;

/// Effect of the most recent recognized marker line in a pane's output.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerEffect {
    pub state: WorkerState,
    pub task: Option<String>,
    pub error: Option<String>,
    pub increment_sessions_run: bool,
}

/// Scan `buffer` from its most recent line backward and return the effect
/// of the first line that matches a recognized marker. Returns `None` if
/// no line in the buffer matches any marker.
pub fn scan(buffer: &str) -> Option<MarkerEffect> {
    buffer.lines().rev().find_map(classify_line)
}

fn classify_line(line: &str) -> Option<MarkerEffect> {
    if line.contains("SESSION_COMPLETE") {
        return Some(MarkerEffect {
            state: WorkerState::Idle,
            task: None,
            error: None,
            increment_sessions_run: true,
        });
    }
    if line.contains("SESSION_START") || line.contains("Starting session") {
        return Some(MarkerEffect {
            state: WorkerState::Running,
            task: None,
            error: None,
            increment_sessions_run: false,
        });
    }
    if let Some(idx) = line.find("TASK_START") {
        let rest = line[idx + "TASK_START".len()..].trim().trim_start_matches(":- ").trim();
        return Some(MarkerEffect {
            state: WorkerState::Running,
            task: Some(rest.to_string()),
            error: None,
            increment_sessions_run: false,
        });
    }
    if line.contains("RALPH_MISSION_COMPLETE") {
        return Some(MarkerEffect {
            state: WorkerState::Stopped,
            task: None,
            error: None,
            increment_sessions_run: false,
        });
    }
    if line.contains("Budget limit reached") || line.contains("Budget exceeded") {
        return Some(MarkerEffect {
            state: WorkerState::Stopped,
            task: None,
            error: None,
            increment_sessions_run: false,
        });
    }
    if line.contains("[ERROR]") {
        return Some(MarkerEffect {
            state: WorkerState::Error,
            task: None,
            error: Some(line.to_string()),
            increment_sessions_run: false,
        });
    }
    None
}

#[cfg(test)]
#[path = "markers_tests.rs"]
mod tests;
