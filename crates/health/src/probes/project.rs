// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project-category probes: config, profile, prompts, definitions, and directory layout.

use std::time::Instant;

use sq_core::config::ConfigFile;
use sq_core::health::{CheckCategory, CheckResult};
use sq_core::paths::Paths;
use sq_core::worker::WorkerType;

const ESSENTIAL_CONFIG_KEYS: &[&str] = &["activeProfile", "workers", "session_name", "tmux_bin"];

pub async fn config_json(paths: &Paths) -> CheckResult {
    let start = Instant::now();
    let path = paths.config_file();
    let text = match std::fs::read_to_string(&path) {
        Ok(t) => t,
        Err(_) => return CheckResult::fail("config.json", CheckCategory::Project, "missing", start.elapsed()),
    };
    let value: serde_json::Value = match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => return CheckResult::fail("config.json", CheckCategory::Project, format!("invalid json: {e}"), start.elapsed()),
    };
    let missing: Vec<_> = ESSENTIAL_CONFIG_KEYS.iter().filter(|k| value.get(*k).is_none()).collect();
    if missing.is_empty() {
        CheckResult::pass("config.json", CheckCategory::Project, "present with required keys", start.elapsed())
    } else {
        CheckResult::warn(
            "config.json",
            CheckCategory::Project,
            format!("missing keys: {missing:?}"),
            start.elapsed(),
        )
    }
}

pub async fn active_profile(paths: &Paths, config: &ConfigFile) -> CheckResult {
    let start = Instant::now();
    let path = paths.profile_file(&config.active_profile);
    match sq_core::config::Profile::load(&path) {
        Ok(_) => CheckResult::pass("active-profile", CheckCategory::Project, path.display().to_string(), start.elapsed()),
        Err(e) => CheckResult::fail("active-profile", CheckCategory::Project, e.to_string(), start.elapsed()),
    }
}

pub async fn worker_prompts(paths: &Paths) -> CheckResult {
    let start = Instant::now();
    let missing: Vec<_> = WorkerType::ALL
        .into_iter()
        .filter(|wt| !paths.prompt_file(*wt).exists())
        .map(|wt| wt.as_str())
        .collect();
    if missing.is_empty() {
        CheckResult::pass("worker-prompts", CheckCategory::Project, "all four present", start.elapsed())
    } else {
        CheckResult::fail("worker-prompts", CheckCategory::Project, format!("missing: {}", missing.join(", ")), start.elapsed())
    }
}

pub async fn agent_definitions(paths: &Paths) -> CheckResult {
    let start = Instant::now();
    let dir = paths.root.join("agents");
    if dir.is_dir() && std::fs::read_dir(&dir).map(|mut d| d.next().is_some()).unwrap_or(false) {
        CheckResult::pass("agent-definitions", CheckCategory::Project, "present", start.elapsed())
    } else {
        CheckResult::warn("agent-definitions", CheckCategory::Project, "no agent definitions found", start.elapsed())
    }
}

pub async fn skill_definitions(paths: &Paths) -> CheckResult {
    let start = Instant::now();
    let dir = paths.root.join("skills");
    if dir.is_dir() && std::fs::read_dir(&dir).map(|mut d| d.next().is_some()).unwrap_or(false) {
        CheckResult::pass("skill-definitions", CheckCategory::Project, "present", start.elapsed())
    } else {
        CheckResult::warn("skill-definitions", CheckCategory::Project, "no skill definitions found", start.elapsed())
    }
}

pub async fn queue_dirs(paths: &Paths) -> CheckResult {
    let start = Instant::now();
    let missing: Vec<_> = sq_core::queue_item::QueueName::ALL
        .into_iter()
        .filter(|q| !paths.queue_dir(*q).is_dir())
        .map(|q| q.to_string())
        .collect();
    if missing.is_empty() {
        CheckResult::pass("queue-dirs", CheckCategory::Project, "all four present", start.elapsed())
    } else {
        CheckResult::fail("queue-dirs", CheckCategory::Project, format!("missing: {}", missing.join(", ")), start.elapsed())
    }
}

pub async fn output_dirs(paths: &Paths) -> CheckResult {
    let start = Instant::now();
    let dirs = [
        paths.strategies_good(),
        paths.strategies_under_review(),
        paths.strategies_rejected(),
        paths.strategies_prop_firm_ready(),
        paths.indicators_dir(),
        paths.backtests_dir(),
        paths.research_logs_dir(),
    ];
    let missing = dirs.iter().filter(|d| !d.is_dir()).count();
    if missing == 0 {
        CheckResult::pass("output-dirs", CheckCategory::Project, "all seven present", start.elapsed())
    } else {
        CheckResult::fail("output-dirs", CheckCategory::Project, format!("{missing} of 7 missing"), start.elapsed())
    }
}
