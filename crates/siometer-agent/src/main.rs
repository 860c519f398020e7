// Copyright (c) 2025 the siometer authors. All rights reserved.
// SPDX-License-Identifier: MIT

//! The siometer agent: loads the config, then runs one poll cycle per
//! interval tick forever. Cycle failures are logged and absorbed; the loop
//! itself never stops.

mod config;
mod sink;

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{Args, Config};
use sink::PutvalSink;
use siometer_core::collect_once;
use siometer_gateway::{GatewayClient, TlsPolicy};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	let (config, unknown_keys) = Config::load(&args.config)?;

	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| EnvFilter::new(config.default_log_filter())),
		)
		.init();

	for key in &unknown_keys {
		warn!(key = %key, "unknown config key ignored");
	}

	info!(
		gateway = %config.gateway,
		cluster = %config.cluster,
		pools = config.pools.len(),
		interval_secs = config.interval_secs,
		"starting siometer agent"
	);
	if config.pools.is_empty() {
		warn!("no pools configured; every cycle will abort without samples");
	}
	if config.insecure_skip_tls_verify {
		warn!("TLS certificate verification is disabled; the gateway's identity is not checked");
	}

	let tls = if config.insecure_skip_tls_verify {
		TlsPolicy::DangerousNoVerify
	} else {
		TlsPolicy::Verify
	};
	let client = GatewayClient::new(
		&config.gateway,
		&config.mdmuser,
		config.mdmpassword.expose(),
		tls,
	)
	.context("failed to build gateway client")?;

	let mut sink = PutvalSink::new(std::io::stdout(), config.interval_secs);

	// Delayed ticks keep cycles strictly serialized: a cycle that overruns
	// the interval pushes the next one back instead of piling up.
	let mut ticker = tokio::time::interval(Duration::from_secs(config.interval_secs));
	ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

	loop {
		ticker.tick().await;
		collect_once(&client, &config.cluster, &config.pools, &mut sink).await;
	}
}
