// Copyright (c) 2025 the siometer authors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Wire types for the gateway's storage-pool endpoints.
//!
//! Field names mirror the gateway's JSON vocabulary, including its own
//! misspellings (`numOccured`, `thinCapacityAllocatedInKm`); serde renames
//! keep the Rust side conventional where possible.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

/// A storage pool as listed by the gateway's pool inventory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PoolIdentity {
	pub name: String,
	pub id: String,
}

/// One bandwidth-counter group: a cumulative (operation count, weighted KiB,
/// window seconds) triple from which an instantaneous rate is derived.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandwidthCounter {
	/// Operation count over the window. The gateway spells this `numOccured`.
	pub num_occured: u64,
	pub total_weight_in_kb: f64,
	pub num_seconds: f64,
}

/// The statistics record for one pool, as returned by the selected-statistics
/// query. Capacity fields are in KiB.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStatistics {
	pub max_capacity_in_kb: f64,
	pub capacity_available_for_volume_allocation_in_kb: f64,
	pub capacity_in_use_in_kb: f64,
	/// `InKm` is the gateway's spelling, not ours.
	pub thin_capacity_allocated_in_km: f64,
	pub thick_capacity_in_use_in_kb: f64,
	pub snap_capacity_in_use_occupied_in_kb: f64,
	pub unreachable_unused_capacity_in_kb: f64,
	pub degraded_healthy_capacity_in_kb: f64,
	pub failed_capacity_in_kb: f64,
	pub spare_capacity_in_kb: f64,
	pub primary_read_bwc: BandwidthCounter,
	pub primary_write_bwc: BandwidthCounter,
	pub rebalance_read_bwc: BandwidthCounter,
	pub fwd_rebuild_read_bwc: BandwidthCounter,
	pub bck_rebuild_read_bwc: BandwidthCounter,
}

/// The full statistics response: one record per pool, keyed by pool id.
pub type RawPoolStatistics = HashMap<String, PoolStatistics>;

/// An opaque session token returned by `/api/login`.
///
/// Valid for one poll cycle; never reused across cycles. The login response
/// body is a JSON-quoted string; surrounding quotes are stripped on
/// construction. `Debug` redacts the token so it cannot leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
	pub fn new(raw: impl Into<String>) -> Self {
		let raw = raw.into();
		Self(raw.trim().trim_matches('"').to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for SessionToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SessionToken(<redacted>)")
	}
}
