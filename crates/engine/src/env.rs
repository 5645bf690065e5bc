// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::time::Duration;

/// Pane Monitor tick interval override (default 1000ms, spec range 500-2000ms).
pub fn monitor_poll_interval() -> Duration {
    std::env::var("SIGMAQ_MONITOR_POLL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_millis(1000))
}

/// Pane staleness threshold override (default 60s).
pub fn stale_threshold() -> Duration {
    std::env::var("SIGMAQ_STALE_THRESHOLD_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(60))
}

/// Canonical multiplexer session name override (default `sigma-quant`).
pub fn session_name() -> String {
    std::env::var("SIGMAQ_SESSION_NAME").unwrap_or_else(|_| "sigma-quant".to_string())
}

/// Queue Watcher coalescing window override (default 100ms).
pub fn watcher_debounce() -> Duration {
    std::env::var("SIGMAQ_WATCHER_DEBOUNCE_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_millis(100))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
