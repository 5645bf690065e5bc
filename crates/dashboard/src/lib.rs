// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sq-dashboard: read-only snapshot aggregation for non-interactive rendering.

pub mod snapshot;

pub use snapshot::{capture, DashboardSnapshot, StrategyOutputCounts};
