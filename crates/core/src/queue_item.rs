// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue item status, queue names, the item envelope, and queue events.

use chrono::{DateTime, Utc};

/// Lifecycle status of a queue item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Pending => "pending",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
            Status::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// The four pipeline queues, in canonical traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueueName {
    Hypotheses,
    ToConvert,
    ToBacktest,
    ToOptimize,
}

impl QueueName {
    /// All four queues, in canonical pipeline order.
    pub const ALL: [QueueName; 4] = [
        QueueName::Hypotheses,
        QueueName::ToConvert,
        QueueName::ToBacktest,
        QueueName::ToOptimize,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueueName::Hypotheses => "hypotheses",
            QueueName::ToConvert => "to-convert",
            QueueName::ToBacktest => "to-backtest",
            QueueName::ToOptimize => "to-optimize",
        }
    }
}

impl std::fmt::Display for QueueName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QueueName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hypotheses" => Ok(QueueName::Hypotheses),
            "to-convert" => Ok(QueueName::ToConvert),
            "to-backtest" => Ok(QueueName::ToBacktest),
            "to-optimize" => Ok(QueueName::ToOptimize),
            other => Err(format!("unknown queue: {other}")),
        }
    }
}

/// A queue item, persisted as one file per item.
///
/// The embedded `id` must equal the filename id; the store enforces this
/// on push and treats a mismatch as a malformed file on read.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QueueItem {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub priority: crate::priority::Priority,
    pub status: Status,
    pub claimed_by: Option<String>,
    pub payload: serde_json::Value,
}

impl QueueItem {
    pub fn new(
        id: impl Into<String>,
        created_by: impl Into<String>,
        priority: crate::priority::Priority,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            created_by: created_by.into(),
            priority,
            status: Status::Pending,
            claimed_by: None,
            payload,
        }
    }
}

/// Derived depth counters for one queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QueueDepth {
    pub name: QueueName,
    pub pending: usize,
    pub claimed: usize,
    pub total: usize,
}

/// The kind of change a Queue Watcher event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueEventType {
    Added,
    Claimed,
    Completed,
    Failed,
    Removed,
}

/// One coalesced filesystem event for a queue, emitted by the Queue Watcher.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct QueueEvent {
    pub queue: QueueName,
    pub event_type: QueueEventType,
    pub item: Option<QueueItem>,
    pub time: DateTime<Utc>,
}

#[cfg(test)]
#[path = "queue_item_tests.rs"]
mod tests;
