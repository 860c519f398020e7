// Copyright (c) 2025 the siometer authors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Per-pool metric derivation.
//!
//! Capacity gauges are unit-converted from the gateway's KiB fields; rate
//! gauges divide cumulative bandwidth counters by their window length. This
//! is the densest part of the pipeline and the formulas are deliberately
//! literal; see the comments on the individual fields.

use siometer_gateway::{BandwidthCounter, PoolIdentity, PoolStatistics, RawPoolStatistics};

use crate::error::{CollectError, Result};

/// Converts a KiB quantity to bytes.
pub fn kib_to_bytes(value: f64) -> f64 {
	value * 1024.0
}

/// The derived gauge set for one pool, one poll cycle. All values are
/// floating-point gauges; capacity gauges are in bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedPoolMetrics {
	pub raw_bytes: f64,
	pub useable_bytes: f64,
	pub available_bytes: f64,
	pub used_bytes: f64,
	pub allocated_bytes: f64,
	pub unreachable_unused_bytes: f64,
	pub degraded_bytes: f64,
	pub failed_bytes: f64,
	pub spare_bytes: f64,
	pub read_iops: f64,
	pub read_bps: f64,
	pub write_iops: f64,
	pub write_bps: f64,
	pub rebalance_iops: f64,
	pub rebalance_bps: f64,
	/// Forward and backward rebuild rates summed; never exposed individually.
	pub rebuild_iops: f64,
	pub rebuild_bps: f64,
}

impl DerivedPoolMetrics {
	/// Named samples in the fixed emission order.
	pub fn samples(&self) -> [(&'static str, f64); 17] {
		[
			("raw_bytes", self.raw_bytes),
			("useable_bytes", self.useable_bytes),
			("available_bytes", self.available_bytes),
			("used_bytes", self.used_bytes),
			("allocated_bytes", self.allocated_bytes),
			("unreachable_unused_bytes", self.unreachable_unused_bytes),
			("degraded_bytes", self.degraded_bytes),
			("failed_bytes", self.failed_bytes),
			("spare_bytes", self.spare_bytes),
			("read_iops", self.read_iops),
			("read_bps", self.read_bps),
			("write_iops", self.write_iops),
			("write_bps", self.write_bps),
			("rebalance_iops", self.rebalance_iops),
			("rebalance_bps", self.rebalance_bps),
			("rebuild_iops", self.rebuild_iops),
			("rebuild_bps", self.rebuild_bps),
		]
	}
}

/// Instantaneous (iops, bps) for one bandwidth-counter group.
///
/// A window with no operations reports zero for both rates regardless of
/// `num_seconds` or `total_weight_in_kb`. An active window of zero seconds
/// divides as-is (IEEE infinity); the guard is only on activity.
fn rates(bwc: &BandwidthCounter) -> (f64, f64) {
	if bwc.num_occured == 0 {
		return (0.0, 0.0);
	}
	let iops = bwc.num_occured as f64 / bwc.num_seconds;
	let bps = kib_to_bytes(bwc.total_weight_in_kb) / bwc.num_seconds;
	(iops, bps)
}

/// Computes the full gauge set for one pool from the cycle's statistics
/// response.
pub fn derive_pool_metrics(
	stats: &RawPoolStatistics,
	pool: &PoolIdentity,
) -> Result<DerivedPoolMetrics> {
	let s: &PoolStatistics = stats
		.get(&pool.id)
		.ok_or_else(|| CollectError::MissingPool(pool.id.clone()))?;

	let (read_iops, read_bps) = rates(&s.primary_read_bwc);
	let (write_iops, write_bps) = rates(&s.primary_write_bwc);
	let (rebalance_iops, rebalance_bps) = rates(&s.rebalance_read_bwc);
	let (fwd_rebuild_iops, fwd_rebuild_bps) = rates(&s.fwd_rebuild_read_bwc);
	let (bck_rebuild_iops, bck_rebuild_bps) = rates(&s.bck_rebuild_read_bwc);

	Ok(DerivedPoolMetrics {
		raw_bytes: kib_to_bytes(s.max_capacity_in_kb / 2.0),
		useable_bytes: kib_to_bytes(
			s.capacity_available_for_volume_allocation_in_kb + s.capacity_in_use_in_kb / 2.0,
		),
		available_bytes: kib_to_bytes(s.capacity_available_for_volume_allocation_in_kb),
		used_bytes: kib_to_bytes(s.capacity_in_use_in_kb / 2.0),
		// The halving applies to the summed byte values here, unlike the
		// per-field gauges above. Keep literal; do not fold into the
		// conversion.
		allocated_bytes: (kib_to_bytes(s.thin_capacity_allocated_in_km)
			+ kib_to_bytes(s.thick_capacity_in_use_in_kb)
			+ kib_to_bytes(s.snap_capacity_in_use_occupied_in_kb))
			/ 2.0,
		unreachable_unused_bytes: kib_to_bytes(s.unreachable_unused_capacity_in_kb),
		degraded_bytes: kib_to_bytes(s.degraded_healthy_capacity_in_kb),
		failed_bytes: kib_to_bytes(s.failed_capacity_in_kb),
		spare_bytes: kib_to_bytes(s.spare_capacity_in_kb),
		read_iops,
		read_bps,
		write_iops,
		write_bps,
		rebalance_iops,
		rebalance_bps,
		rebuild_iops: fwd_rebuild_iops + bck_rebuild_iops,
		rebuild_bps: fwd_rebuild_bps + bck_rebuild_bps,
	})
}
