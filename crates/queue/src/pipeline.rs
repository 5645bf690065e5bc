// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only composition of the four Queue Stores.

use std::sync::Arc;

use sq_core::queue_item::{QueueDepth, QueueName};

use crate::error::QueueError;
use crate::store::QueueStore;

/// Pure convenience view over the four queues, in canonical pipeline order.
/// Holds no state of its own beyond references to the stores.
pub struct PipelineView {
    stores: std::collections::HashMap<QueueName, Arc<QueueStore>>,
}

impl PipelineView {
    pub fn new(stores: std::collections::HashMap<QueueName, Arc<QueueStore>>) -> Self {
        Self { stores }
    }

    /// Depths for all four queues, in canonical pipeline order.
    pub fn pipeline_status(&self) -> Result<Vec<QueueDepth>, QueueError> {
        QueueName::ALL
            .into_iter()
            .map(|name| {
                self.stores
                    .get(&name)
                    .ok_or_else(|| QueueError::NotFound { id: name.to_string() })
                    .and_then(|store| store.count())
            })
            .collect()
    }

    /// Sum of pending+claimed across the pipeline.
    pub fn total_items(&self) -> Result<usize, QueueError> {
        Ok(self.pipeline_status()?.iter().map(|d| d.pending + d.claimed).sum())
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
