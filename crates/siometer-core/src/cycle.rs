// Copyright (c) 2025 the siometer authors. All rights reserved.
// SPDX-License-Identifier: MIT

//! The poll-cycle orchestrator.

use chrono::Utc;
use siometer_gateway::GatewayClient;
use tracing::{debug, info, warn};

use crate::derive::derive_pool_metrics;
use crate::error::Result;
use crate::resolve::select_pools;
use crate::sink::{MetricSink, Sample};

/// Runs one poll cycle: login, inventory, statistics, selection, per-pool
/// derivation and emission, logout.
///
/// Fails fast: the first error aborts the remainder of the cycle, and the
/// session (if any) is left to expire on the gateway side. Logout runs only
/// when every prior step succeeded; a logout failure is logged rather than
/// returned, since the cycle's samples are already emitted.
pub async fn run_cycle(
	client: &GatewayClient,
	cluster: &str,
	pool_names: &[String],
	sink: &mut dyn MetricSink,
) -> Result<()> {
	let session = client.login().await?;
	let inventory = client.list_pools(&session).await?;
	let stats = client.query_statistics(&session).await?;
	let selected = select_pools(&inventory, pool_names)?;

	for pool in &selected {
		let metrics = derive_pool_metrics(&stats, pool)?;
		let timestamp = Utc::now();
		for (metric, value) in metrics.samples() {
			sink.emit(&Sample {
				cluster: cluster.to_string(),
				plugin: "pool",
				pool: pool.name.clone(),
				metric,
				value,
				timestamp,
			})?;
		}
		debug!(pool = %pool.name, "emitted pool gauges");
	}

	if let Err(e) = client.logout(&session).await {
		warn!(error = %e, "logout failed; session will expire on the gateway side");
	}
	Ok(())
}

/// Scheduler-facing entry point. Absorbs every failure: a failed cycle is a
/// logged no-op with fewer (or zero) samples, never an error to the caller.
pub async fn collect_once(
	client: &GatewayClient,
	cluster: &str,
	pool_names: &[String],
	sink: &mut dyn MetricSink,
) {
	match run_cycle(client, cluster, pool_names, sink).await {
		Ok(()) => info!("poll cycle complete"),
		Err(e) => warn!(error = %e, "poll cycle aborted"),
	}
}
