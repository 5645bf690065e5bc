// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Health Checker: runs the sixteen named probes and aggregates a report.

use sq_adapters::SessionAdapter;
use sq_core::config::GlobalConfig;
use sq_core::health::{CheckCategory, CheckResult, Report};
use sq_core::paths::Paths;

use crate::probes::{data, project, runtime, system};

/// Worker process name matched against pane contents when probing for a
/// live worker. Matches the teacher's convention of grepping the launcher
/// command rather than a PID file.
const WORKER_PROCESS_PATTERN: &str = "claude";

/// Runs the System/Project/Data/Runtime probes against one project root.
pub struct HealthChecker<A: SessionAdapter> {
    paths: Paths,
    config: GlobalConfig,
    adapter: A,
}

impl<A: SessionAdapter> HealthChecker<A> {
    pub fn new(paths: Paths, config: GlobalConfig, adapter: A) -> Self {
        Self { paths, config, adapter }
    }

    /// Run every probe across all four categories.
    pub async fn run_all(&self) -> Report {
        let mut results = Vec::with_capacity(16);
        results.extend(self.run_system().await);
        results.extend(self.run_project().await);
        results.extend(self.run_data().await);
        results.extend(self.run_runtime().await);
        Report::from_results(results)
    }

    /// Run only the probes in one category.
    pub async fn run_category(&self, category: CheckCategory) -> Report {
        let results = match category {
            CheckCategory::System => self.run_system().await,
            CheckCategory::Project => self.run_project().await,
            CheckCategory::Data => self.run_data().await,
            CheckCategory::Runtime => self.run_runtime().await,
        };
        Report::from_results(results)
    }

    async fn run_system(&self) -> Vec<CheckResult> {
        let tmux_bin = self.config.read().tmux_bin().to_string();
        vec![
            system::python_interpreter().await,
            system::package_manager().await,
            system::tmux_binary(&tmux_bin).await,
            system::version_control().await,
            system::llm_cli().await,
            system::required_packages().await,
        ]
    }

    async fn run_project(&self) -> Vec<CheckResult> {
        let config = self.config.read().clone();
        vec![
            project::config_json(&self.paths).await,
            project::active_profile(&self.paths, &config).await,
            project::worker_prompts(&self.paths).await,
            project::agent_definitions(&self.paths).await,
            project::skill_definitions(&self.paths).await,
            project::queue_dirs(&self.paths).await,
            project::output_dirs(&self.paths).await,
        ]
    }

    async fn run_data(&self) -> Vec<CheckResult> {
        let config = self.config.read().clone();
        vec![
            data::sample_data_files(&self.paths).await,
            data::env_file(&self.paths, &config).await,
        ]
    }

    async fn run_runtime(&self) -> Vec<CheckResult> {
        let session_name = self.config.read().session_name().to_string();
        vec![runtime::stale_session(&self.adapter, &session_name, WORKER_PROCESS_PATTERN).await]
    }
}

#[cfg(test)]
#[path = "checker_tests.rs"]
mod tests;
