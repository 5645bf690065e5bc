// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Health Checker error taxonomy.

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("unknown check category: {0}")]
    UnknownCategory(String),

    #[error("session error while running a probe: {0}")]
    Session(#[from] sq_adapters::SessionError),
}
