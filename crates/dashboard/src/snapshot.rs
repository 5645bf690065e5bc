// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dashboard Snapshot: a read-only aggregation for non-interactive rendering.

use sq_adapters::SessionAdapter;
use sq_core::paths::Paths;
use sq_core::queue_item::QueueDepth;
use sq_core::worker::Worker;
use sq_engine::WorkerManager;
use sq_queue::PipelineView;

/// Count of `.json` strategy files in each of the four output subdirectories.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct StrategyOutputCounts {
    pub good: usize,
    pub under_review: usize,
    pub rejected: usize,
    pub prop_firm_ready: usize,
}

/// A point-in-time read-only view over worker states, queue depths, and
/// strategy output counts. Never mutates anything.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DashboardSnapshot {
    pub workers: Vec<Worker>,
    pub queues: Vec<QueueDepth>,
    pub strategies: StrategyOutputCounts,
}

fn count_json_files(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|e| e.path().extension().map(|ext| ext == "json").unwrap_or(false))
                .count()
        })
        .unwrap_or(0)
}

/// Assemble one snapshot from the Manager, the Pipeline View, and the
/// output directory layout.
pub fn capture<A: SessionAdapter>(
    manager: &WorkerManager<A>,
    pipeline: &PipelineView,
    paths: &Paths,
) -> Result<DashboardSnapshot, sq_queue::QueueError> {
    let workers = manager.worker_states();
    let queues = pipeline.pipeline_status()?;
    let strategies = StrategyOutputCounts {
        good: count_json_files(&paths.strategies_good()),
        under_review: count_json_files(&paths.strategies_under_review()),
        rejected: count_json_files(&paths.strategies_rejected()),
        prop_firm_ready: count_json_files(&paths.strategies_prop_firm_ready()),
    };

    Ok(DashboardSnapshot { workers, queues, strategies })
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
