// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! System-category probes: binary presence/version and package importability.

use std::time::Instant;

use sq_adapters::subprocess::{run_with_timeout, HEALTH_PROBE_FAST_TIMEOUT};
use sq_core::health::{CheckCategory, CheckResult};
use tokio::process::Command;

/// Packages the pattern/backtest pipeline requires at minimum.
const REQUIRED_PACKAGES: &[&str] = &["numpy", "pandas"];

async fn binary_check(name: &str, bin: &str, args: &[&str]) -> CheckResult {
    let start = Instant::now();
    let mut cmd = Command::new(bin);
    cmd.args(args);
    match run_with_timeout(cmd, HEALTH_PROBE_FAST_TIMEOUT, name).await {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).lines().next().unwrap_or("").to_string();
            CheckResult::pass(name, CheckCategory::System, version, start.elapsed())
        }
        Ok(output) => CheckResult::fail(
            name,
            CheckCategory::System,
            format!("{bin} exited with status {}", output.status),
            start.elapsed(),
        ),
        Err(message) => CheckResult::fail(name, CheckCategory::System, message, start.elapsed()),
    }
}

pub async fn python_interpreter() -> CheckResult {
    binary_check("python-interpreter", "python3", &["--version"]).await
}

pub async fn package_manager() -> CheckResult {
    binary_check("package-manager", "pip3", &["--version"]).await
}

pub async fn tmux_binary(tmux_bin: &str) -> CheckResult {
    binary_check("tmux-binary", tmux_bin, &["-V"]).await
}

pub async fn version_control() -> CheckResult {
    binary_check("version-control", "git", &["--version"]).await
}

pub async fn llm_cli() -> CheckResult {
    binary_check("llm-cli", "claude", &["--version"]).await
}

/// Ability to import each required numeric/pipeline package. Missing
/// packages warn unless every one is missing, in which case the probe fails.
pub async fn required_packages() -> CheckResult {
    let start = Instant::now();
    let mut missing = Vec::new();
    for package in REQUIRED_PACKAGES {
        let script = format!("import {package}");
        let mut cmd = Command::new("python3");
        cmd.args(["-c", &script]);
        let ok = run_with_timeout(cmd, HEALTH_PROBE_FAST_TIMEOUT, "package import")
            .await
            .map(|o| o.status.success())
            .unwrap_or(false);
        if !ok {
            missing.push(*package);
        }
    }

    if missing.is_empty() {
        CheckResult::pass("required-packages", CheckCategory::System, "all present", start.elapsed())
    } else if missing.len() == REQUIRED_PACKAGES.len() {
        CheckResult::fail(
            "required-packages",
            CheckCategory::System,
            format!("none of the required packages import: {}", missing.join(", ")),
            start.elapsed(),
        )
    } else {
        CheckResult::warn(
            "required-packages",
            CheckCategory::System,
            format!("missing packages: {}", missing.join(", ")),
            start.elapsed(),
        )
    }
}
