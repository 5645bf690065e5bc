// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Health check data model: categories, probe results, and report aggregation.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    System,
    Project,
    Data,
    Runtime,
}

impl std::fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CheckCategory::System => "system",
            CheckCategory::Project => "project",
            CheckCategory::Data => "data",
            CheckCategory::Runtime => "runtime",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for CheckCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(CheckCategory::System),
            "project" => Ok(CheckCategory::Project),
            "data" => Ok(CheckCategory::Data),
            "runtime" => Ok(CheckCategory::Runtime),
            other => Err(format!("unknown check category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Warn => "warn",
            CheckStatus::Fail => "fail",
        };
        write!(f, "{s}")
    }
}

/// Outcome of a single named probe.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub category: CheckCategory,
    pub status: CheckStatus,
    pub message: String,
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

impl CheckResult {
    pub fn pass(name: impl Into<String>, category: CheckCategory, message: impl Into<String>, duration: Duration) -> Self {
        Self { name: name.into(), category, status: CheckStatus::Pass, message: message.into(), duration }
    }

    pub fn warn(name: impl Into<String>, category: CheckCategory, message: impl Into<String>, duration: Duration) -> Self {
        Self { name: name.into(), category, status: CheckStatus::Warn, message: message.into(), duration }
    }

    pub fn fail(name: impl Into<String>, category: CheckCategory, message: impl Into<String>, duration: Duration) -> Self {
        Self { name: name.into(), category, status: CheckStatus::Fail, message: message.into(), duration }
    }
}

mod duration_ms {
    use std::time::Duration;

    pub fn serialize<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u128(d.as_millis())
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let ms = u64::deserialize(d)?;
        Ok(Duration::from_millis(ms))
    }

    use serde::Deserialize;
}

/// Aggregate of all probe results from one Health Checker run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Report {
    pub results: Vec<CheckResult>,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
}

impl Report {
    pub fn from_results(results: Vec<CheckResult>) -> Self {
        let passed = results.iter().filter(|r| r.status == CheckStatus::Pass).count();
        let warned = results.iter().filter(|r| r.status == CheckStatus::Warn).count();
        let failed = results.iter().filter(|r| r.status == CheckStatus::Fail).count();
        Self { results, passed, warned, failed }
    }

    /// `Healthy := failed == 0`; warnings alone are a degraded-but-healthy state.
    pub fn healthy(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
