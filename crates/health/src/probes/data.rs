// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Data-category probes: sample data availability and environment secrets.

use std::time::Instant;

use sq_core::config::ConfigFile;
use sq_core::health::{CheckCategory, CheckResult};
use sq_core::paths::Paths;

/// Keys every profile needs regardless of market type.
const MANDATORY_ENV_KEYS: &[&str] = &["ANTHROPIC_API_KEY"];

/// Keys only required for a live/paper-trading profile, warned on otherwise.
const LIVE_PROFILE_ENV_KEYS: &[&str] = &["BROKER_API_KEY", "BROKER_API_SECRET"];

pub async fn sample_data_files(paths: &Paths) -> CheckResult {
    let start = Instant::now();
    let dir = paths.data_dir();
    let count = std::fs::read_dir(&dir)
        .map(|entries| entries.filter_map(Result::ok).count())
        .unwrap_or(0);
    if count > 0 {
        CheckResult::pass("sample-data-files", CheckCategory::Data, format!("{count} files"), start.elapsed())
    } else {
        CheckResult::warn("sample-data-files", CheckCategory::Data, "data directory is empty or missing", start.elapsed())
    }
}

pub async fn env_file(paths: &Paths, config: &ConfigFile) -> CheckResult {
    let start = Instant::now();
    let path = paths.env_file();
    let text = match std::fs::read_to_string(&path) {
        Ok(t) => t,
        Err(_) => return CheckResult::fail("env-file", CheckCategory::Data, "missing .env", start.elapsed()),
    };
    let present: std::collections::HashSet<&str> = text
        .lines()
        .filter_map(|line| line.split('=').next())
        .map(str::trim)
        .collect();

    let missing_mandatory: Vec<_> = MANDATORY_ENV_KEYS.iter().filter(|k| !present.contains(*k)).collect();
    if !missing_mandatory.is_empty() {
        return CheckResult::fail(
            "env-file",
            CheckCategory::Data,
            format!("missing required keys: {missing_mandatory:?}"),
            start.elapsed(),
        );
    }

    let profile_path = paths.profile_file(&config.active_profile);
    let is_live = sq_core::config::Profile::load(&profile_path)
        .map(|p| p.market_type == "live" || p.market_type == "paper")
        .unwrap_or(false);

    if is_live {
        let missing_live: Vec<_> = LIVE_PROFILE_ENV_KEYS.iter().filter(|k| !present.contains(*k)).collect();
        if !missing_live.is_empty() {
            return CheckResult::warn(
                "env-file",
                CheckCategory::Data,
                format!("live profile missing optional keys: {missing_live:?}"),
                start.elapsed(),
            );
        }
    }

    CheckResult::pass("env-file", CheckCategory::Data, "all required keys present", start.elapsed())
}
