// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime-category probe: stale sessions with no live worker process.

use std::time::Instant;

use sq_adapters::SessionAdapter;
use sq_core::health::{CheckCategory, CheckResult};
use sq_core::worker::WorkerType;

/// A session exists but none of its four panes has a running worker
/// process. This usually means a crashed or hand-killed worker left the
/// multiplexer session behind without cleaning it up.
pub async fn stale_session<A: SessionAdapter>(adapter: &A, session_name: &str, process_pattern: &str) -> CheckResult {
    let start = Instant::now();

    match adapter.session_exists(session_name).await {
        Ok(false) => return CheckResult::pass("stale-session", CheckCategory::Runtime, "no session running", start.elapsed()),
        Err(e) => return CheckResult::fail("stale-session", CheckCategory::Runtime, e.to_string(), start.elapsed()),
        Ok(true) => {}
    }

    for worker in WorkerType::ALL {
        let pane = format!("{session_name}.{}", worker.pane_index());
        match adapter.is_process_running(&pane, process_pattern).await {
            Ok(true) => {
                return CheckResult::pass("stale-session", CheckCategory::Runtime, "at least one worker is live", start.elapsed())
            }
            _ => continue,
        }
    }

    CheckResult::warn(
        "stale-session",
        CheckCategory::Runtime,
        "session is running but no pane has a live worker process",
        start.elapsed(),
    )
}
