// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

/// Resolve the project root: `SIGMAQ_PROJECT_ROOT` override, else the
/// current working directory.
pub fn project_root() -> std::io::Result<PathBuf> {
    if let Ok(dir) = std::env::var("SIGMAQ_PROJECT_ROOT") {
        return Ok(PathBuf::from(dir));
    }
    std::env::current_dir()
}

/// `tracing-subscriber` `EnvFilter` directive: `SIGMAQ_LOG` > `RUST_LOG` > `info`.
pub fn log_filter() -> String {
    std::env::var("SIGMAQ_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
