// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tmux-backed session adapter: every operation is a short-lived child
//! process call against the `tmux` binary.

use super::{SessionAdapter, SessionError};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Tmux-based session adapter.
///
/// `bin` defaults to `tmux` but can be overridden (e.g. to a stub script)
/// for test harnesses via `SIGMAQ_TMUX_BIN`.
#[derive(Clone)]
pub struct TmuxAdapter {
    bin: String,
}

impl Default for TmuxAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl TmuxAdapter {
    pub fn new() -> Self {
        Self { bin: "tmux".to_string() }
    }

    pub fn with_bin(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    fn cmd(&self) -> Command {
        Command::new(&self.bin)
    }
}

#[async_trait]
impl SessionAdapter for TmuxAdapter {
    async fn spawn(
        &self,
        name: &str,
        cwd: &Path,
        cmd: &str,
        env: &[(String, String)],
    ) -> Result<String, SessionError> {
        if !cwd.exists() {
            return Err(SessionError::SpawnFailed(format!(
                "working directory does not exist: {}",
                cwd.display()
            )));
        }

        if self.session_exists(name).await.unwrap_or(false) {
            tracing::warn!(session = name, "session already exists, killing first");
            let _ = self.cmd().args(["kill-session", "-t", name]).output().await;
        }

        let mut tmux_cmd = self.cmd();
        tmux_cmd.arg("new-session").arg("-d").arg("-s").arg(name).arg("-c").arg(cwd);

        for (key, value) in env {
            tmux_cmd.arg("-e").arg(format!("{}={}", key, value));
        }

        tmux_cmd.arg(cmd);

        let output = tmux_cmd.output().await.map_err(|e| SessionError::SpawnFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(session = name, stderr = %stderr, "tmux spawn failed");
            return Err(SessionError::SpawnFailed(stderr.to_string()));
        }

        if !output.stderr.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(session = name, stderr = %stderr, "tmux spawn stderr (non-fatal)");
        }

        Ok(name.to_string())
    }

    async fn send(&self, id: &str, input: &str) -> Result<(), SessionError> {
        let output = self
            .cmd()
            .arg("send-keys")
            .arg("-t")
            .arg(id)
            .arg(input)
            .output()
            .await
            .map_err(|e| SessionError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(SessionError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn send_literal(&self, id: &str, text: &str) -> Result<(), SessionError> {
        // -l = literal mode (no key name interpretation), -- ends option parsing
        let output = self
            .cmd()
            .args(["send-keys", "-t", id, "-l", "--", text])
            .output()
            .await
            .map_err(|e| SessionError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(SessionError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn send_enter(&self, id: &str) -> Result<(), SessionError> {
        let output = self
            .cmd()
            .args(["send-keys", "-t", id, "Enter"])
            .output()
            .await
            .map_err(|e| SessionError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(SessionError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn kill(&self, id: &str) -> Result<(), SessionError> {
        let _ = self.cmd().arg("kill-session").arg("-t").arg(id).output().await;
        Ok(())
    }

    async fn is_alive(&self, id: &str) -> Result<bool, SessionError> {
        self.session_exists(id).await
    }

    async fn capture_output(&self, id: &str, lines: u32) -> Result<String, SessionError> {
        let output = self
            .cmd()
            .arg("capture-pane")
            .arg("-t")
            .arg(id)
            .arg("-p")
            .arg("-S")
            .arg(format!("-{}", lines))
            .output()
            .await
            .map_err(|e| SessionError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(SessionError::NotFound(id.to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    async fn is_process_running(&self, id: &str, pattern: &str) -> Result<bool, SessionError> {
        let output = self
            .cmd()
            .args(["list-panes", "-t", id, "-F", "#{pane_pid}"])
            .output()
            .await
            .map_err(|e| SessionError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(SessionError::NotFound(id.to_string()));
        }

        let pane_pid = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if pane_pid.is_empty() {
            return Ok(false);
        }

        // ps checks the pane process itself; pgrep checks its children
        // (the common case when the pane runs a shell launching the worker).
        let (ps_output, pgrep_output) = tokio::try_join!(
            async {
                Command::new("ps")
                    .args(["-p", &pane_pid, "-o", "command="])
                    .output()
                    .await
                    .map_err(|e| SessionError::CommandFailed(e.to_string()))
            },
            async {
                Command::new("pgrep")
                    .args(["-P", &pane_pid, "-f", pattern])
                    .output()
                    .await
                    .map_err(|e| SessionError::CommandFailed(e.to_string()))
            },
        )?;

        if ps_output.status.success() {
            let cmd_line = String::from_utf8_lossy(&ps_output.stdout);
            if cmd_line.contains(pattern) {
                return Ok(true);
            }
        }

        Ok(pgrep_output.status.success())
    }

    async fn get_exit_code(&self, id: &str) -> Result<Option<i32>, SessionError> {
        let output = self
            .cmd()
            .args(["display-message", "-t", id, "-p", "#{pane_dead_status}"])
            .output()
            .await
            .map_err(|e| SessionError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(SessionError::NotFound(id.to_string()));
        }

        let status_str = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if status_str.is_empty() {
            return Ok(None);
        }
        Ok(status_str.parse::<i32>().ok())
    }

    async fn session_exists(&self, name: &str) -> Result<bool, SessionError> {
        let output = self
            .cmd()
            .arg("has-session")
            .arg("-t")
            .arg(name)
            .output()
            .await
            .map_err(|e| SessionError::CommandFailed(e.to_string()))?;
        Ok(output.status.success())
    }

    async fn list_sessions(&self) -> Result<Vec<String>, SessionError> {
        let output = self
            .cmd()
            .args(["list-sessions", "-F", "#{session_name}"])
            .output()
            .await
            .map_err(|e| SessionError::CommandFailed(e.to_string()))?;

        // The server being down is not an error: list-sessions returns an
        // empty list rather than propagating failure.
        if !output.status.success() {
            return Ok(Vec::new());
        }
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }

    async fn split_horizontal(&self, target: &str) -> Result<String, SessionError> {
        let output = self
            .cmd()
            .args(["split-window", "-h", "-t", target, "-P", "-F", "#{pane_id}"])
            .output()
            .await
            .map_err(|e| SessionError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(SessionError::CommandFailed(String::from_utf8_lossy(&output.stderr).to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn split_vertical(&self, target: &str) -> Result<String, SessionError> {
        let output = self
            .cmd()
            .args(["split-window", "-v", "-t", target, "-P", "-F", "#{pane_id}"])
            .output()
            .await
            .map_err(|e| SessionError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(SessionError::CommandFailed(String::from_utf8_lossy(&output.stderr).to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn select_layout_tiled(&self, session: &str) -> Result<(), SessionError> {
        let output = self
            .cmd()
            .args(["select-layout", "-t", session, "tiled"])
            .output()
            .await
            .map_err(|e| SessionError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(SessionError::CommandFailed(String::from_utf8_lossy(&output.stderr).to_string()));
        }
        Ok(())
    }

    async fn select_pane(&self, target: &str) -> Result<(), SessionError> {
        let output = self
            .cmd()
            .args(["select-pane", "-t", target])
            .output()
            .await
            .map_err(|e| SessionError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(SessionError::NotFound(target.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tmux_tests.rs"]
mod tests;
