// Copyright (c) 2025 the siometer authors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Core collection pipeline for siometer.
//!
//! One poll cycle is a single linear chain: login, pool inventory,
//! statistics query, pool selection, per-pool metric derivation, sample
//! emission, logout. There is no concurrency and no state carried across
//! cycles; any failure aborts the remainder of the cycle.

pub mod cycle;
pub mod derive;
pub mod error;
pub mod resolve;
pub mod sink;

pub use cycle::{collect_once, run_cycle};
pub use derive::{derive_pool_metrics, kib_to_bytes, DerivedPoolMetrics};
pub use error::{CollectError, Result};
pub use resolve::select_pools;
pub use sink::{MetricSink, Sample, VecSink};
