// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue Store and Queue Watcher error taxonomy.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serializing/deserializing queue item: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("item {id} not found in queue")]
    NotFound { id: String },

    #[error("item {id} is not pending, cannot claim")]
    NotPending { id: String },

    #[error("watching filesystem: {0}")]
    Watch(#[from] notify::Error),
}

impl QueueError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
