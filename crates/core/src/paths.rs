// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolved filesystem layout for one project root.

use std::path::{Path, PathBuf};

use crate::queue_item::QueueName;

/// Resolved filesystem layout rooted at a project directory.
///
/// Paths is a pure value: it never touches the filesystem itself beyond
/// the `join`s that build it. Callers (Queue Store, Health Checker) are
/// responsible for creating directories they need.
#[derive(Debug, Clone)]
pub struct Paths {
    pub root: PathBuf,
}

impl Paths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    pub fn profile_file(&self, active_profile: &Path) -> PathBuf {
        if active_profile.is_absolute() {
            active_profile.to_path_buf()
        } else {
            self.root.join(active_profile)
        }
    }

    pub fn prompts_dir(&self) -> PathBuf {
        self.root.join("prompts")
    }

    pub fn prompt_file(&self, worker: crate::worker::WorkerType) -> PathBuf {
        self.prompts_dir().join(format!("{}.md", worker.as_str()))
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn patterns_dir(&self) -> PathBuf {
        self.root.join("patterns")
    }

    pub fn env_file(&self) -> PathBuf {
        self.root.join(".env")
    }

    pub fn queues_dir(&self) -> PathBuf {
        self.root.join("queues")
    }

    pub fn queue_dir(&self, queue: QueueName) -> PathBuf {
        self.queues_dir().join(queue.as_str())
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join("output")
    }

    pub fn strategies_dir(&self, subdir: &str) -> PathBuf {
        self.output_dir().join("strategies").join(subdir)
    }

    pub fn strategies_good(&self) -> PathBuf {
        self.strategies_dir("good")
    }

    pub fn strategies_under_review(&self) -> PathBuf {
        self.strategies_dir("under_review")
    }

    pub fn strategies_rejected(&self) -> PathBuf {
        self.strategies_dir("rejected")
    }

    pub fn strategies_prop_firm_ready(&self) -> PathBuf {
        self.strategies_dir("prop_firm_ready")
    }

    pub fn indicators_dir(&self) -> PathBuf {
        self.output_dir().join("indicators")
    }

    pub fn backtests_dir(&self) -> PathBuf {
        self.output_dir().join("backtests")
    }

    pub fn research_logs_dir(&self) -> PathBuf {
        self.output_dir().join("research-logs")
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
