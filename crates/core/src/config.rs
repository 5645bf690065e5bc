// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk config shape and the process-wide, read-mostly global config.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

/// Errors surfaced while loading or parsing `config.json`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("config file missing required section: {0}")]
    MissingSection(&'static str),
}

/// Per-worker-type enable flags. Concurrency is not configurable here —
/// each enabled role gets exactly one pane.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct WorkersSection {
    #[serde(default = "default_true")]
    pub researcher: bool,
    #[serde(default = "default_true")]
    pub converter: bool,
    #[serde(default = "default_true")]
    pub backtester: bool,
    #[serde(default = "default_true")]
    pub optimizer: bool,
}

fn default_true() -> bool {
    true
}

/// Optional overrides for queue directory locations, keyed by queue name.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct QueueDirOverrides {
    pub hypotheses: Option<PathBuf>,
    #[serde(rename = "to-convert")]
    pub to_convert: Option<PathBuf>,
    #[serde(rename = "to-backtest")]
    pub to_backtest: Option<PathBuf>,
    #[serde(rename = "to-optimize")]
    pub to_optimize: Option<PathBuf>,
}

/// The on-disk `config.json` shape.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ConfigFile {
    #[serde(rename = "activeProfile")]
    pub active_profile: PathBuf,
    #[serde(default)]
    pub workers: WorkersSection,
    #[serde(default)]
    pub queues: Option<QueueDirOverrides>,
    pub session_name: Option<String>,
    pub tmux_bin: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Canonical multiplexer session name, falling back to `sigma-quant`.
    pub fn session_name(&self) -> &str {
        self.session_name.as_deref().unwrap_or("sigma-quant")
    }

    /// Multiplexer binary name, falling back to `tmux`.
    pub fn tmux_bin(&self) -> &str {
        self.tmux_bin.as_deref().unwrap_or("tmux")
    }
}

/// Opaque market profile. Only the fields the core needs to route and
/// display are strongly typed; everything else is a duck-typed passthrough.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Profile {
    #[serde(rename = "profileId")]
    pub profile_id: String,
    #[serde(rename = "marketType")]
    pub market_type: String,
    #[serde(flatten)]
    pub rest: HashMap<String, serde_json::Value>,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Process-wide config, loaded once and guarded by a read/write lock.
///
/// Writes happen only at initial load; all subsequent access takes a
/// read lock, mirroring the teacher's `ENV > XDG > default` state
/// resolution composed once at startup.
#[derive(Clone)]
pub struct GlobalConfig {
    inner: Arc<RwLock<ConfigFile>>,
}

impl GlobalConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = ConfigFile::load(path)?;
        Ok(Self {
            inner: Arc::new(RwLock::new(file)),
        })
    }

    pub fn from_file(file: ConfigFile) -> Self {
        Self {
            inner: Arc::new(RwLock::new(file)),
        }
    }

    /// Take a read snapshot. Callers never hold a live reference across
    /// an await point; clone out the fields they need.
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, ConfigFile> {
        self.inner.read()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
