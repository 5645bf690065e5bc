// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session management adapters

mod noop;
mod tmux;

pub use noop::NoOpSessionAdapter;
pub use tmux::TmuxAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSession, FakeSessionAdapter, SessionCall};

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors from session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(String),
    #[error("spawn failed: {0}")]
    SpawnFailed(String),
    #[error("command failed: {0}")]
    CommandFailed(String),
}

/// Adapter for managing terminal sessions (tmux, etc.)
#[async_trait]
pub trait SessionAdapter: Clone + Send + Sync + 'static {
    /// Spawn a new session
    async fn spawn(
        &self,
        name: &str,
        cwd: &Path,
        cmd: &str,
        env: &[(String, String)],
    ) -> Result<String, SessionError>;

    /// Send input to a session
    async fn send(&self, id: &str, input: &str) -> Result<(), SessionError>;

    /// Send literal text to a session (no key interpretation)
    async fn send_literal(&self, id: &str, text: &str) -> Result<(), SessionError>;

    /// Send the Enter key to a session
    async fn send_enter(&self, id: &str) -> Result<(), SessionError>;

    /// Kill a session
    async fn kill(&self, id: &str) -> Result<(), SessionError>;

    /// Check if a session is alive
    async fn is_alive(&self, id: &str) -> Result<bool, SessionError>;

    /// Capture recent output from a session
    async fn capture_output(&self, id: &str, lines: u32) -> Result<String, SessionError>;

    /// Check if a process matching pattern is running inside the session
    async fn is_process_running(&self, id: &str, pattern: &str) -> Result<bool, SessionError>;

    /// Get the exit code of the pane's process (if available)
    ///
    /// Returns `None` if the pane is still running or the exit code is unavailable.
    async fn get_exit_code(&self, id: &str) -> Result<Option<i32>, SessionError>;

    /// Apply configuration to an existing session (styling, status bar, etc.)
    /// Default implementation is a no-op.
    async fn configure(&self, _id: &str, _config: &serde_json::Value) -> Result<(), SessionError> {
        Ok(())
    }

    /// Whether a session with this name currently exists.
    async fn session_exists(&self, name: &str) -> Result<bool, SessionError>;

    /// List all live session names. Returns an empty list (not an error)
    /// when the multiplexer server is not running.
    async fn list_sessions(&self) -> Result<Vec<String>, SessionError>;

    /// Split `target` horizontally (side by side), returning the new pane's id.
    async fn split_horizontal(&self, target: &str) -> Result<String, SessionError>;

    /// Split `target` vertically (stacked), returning the new pane's id.
    async fn split_vertical(&self, target: &str) -> Result<String, SessionError>;

    /// Apply the multiplexer's tiled layout to evenly size all panes in a session.
    async fn select_layout_tiled(&self, session: &str) -> Result<(), SessionError>;

    /// Bring a pane into focus.
    async fn select_pane(&self, target: &str) -> Result<(), SessionError>;

    /// Lay out a 2x2 tiled grid of four panes in `session`, in pane-index
    /// order (0=top-left, 1=top-right, 2=bottom-left, 3=bottom-right).
    ///
    /// Composite operation built from the split/select primitives: split
    /// horizontally, then split each half vertically, then apply the
    /// tiled layout for even sizing.
    async fn layout_grid_2x2(&self, session: &str) -> Result<Vec<String>, SessionError> {
        let top_right = self.split_horizontal(session).await?;
        let bottom_left = self.split_vertical(session).await?;
        let bottom_right = self.split_vertical(&top_right).await?;
        self.select_layout_tiled(session).await?;
        Ok(vec![session.to_string(), top_right, bottom_left, bottom_right])
    }
}
