// Copyright (c) 2025 the siometer authors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Agent configuration: CLI arguments and the TOML config file.
//!
//! The config is loaded once before the first poll cycle and is read-only
//! afterwards; there is no dynamic reconfiguration.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

/// siometer agent - storage pool metrics collector
#[derive(Parser, Debug)]
#[command(name = "siometer-agent")]
pub struct Args {
	/// Path to the TOML configuration file
	#[arg(long, env = "SIOMETER_CONFIG", default_value = "/etc/siometer/agent.toml")]
	pub config: PathBuf,
}

/// A sensitive config value. `Debug` redacts, so deriving `Debug` on
/// containing structs cannot leak it into logs.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for Secret {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[REDACTED]")
	}
}

fn default_cluster() -> String {
	"myCluster".to_string()
}

fn default_interval() -> u64 {
	60
}

/// Static agent configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	/// Verbose internal logging.
	#[serde(default)]
	pub debug: bool,
	/// Operational logging (connection errors, pool-selection warnings).
	#[serde(default)]
	pub verbose: bool,
	/// Management gateway host or host:port.
	pub gateway: String,
	/// Label attached to every emitted sample as the source identity.
	#[serde(default = "default_cluster")]
	pub cluster: String,
	/// Pool names to collect. Empty means every cycle aborts with no samples.
	#[serde(default)]
	pub pools: Vec<String>,
	/// Gateway API username.
	pub mdmuser: String,
	/// Gateway API password.
	pub mdmpassword: Secret,
	/// Disables TLS certificate verification for the gateway. Security
	/// trade-off for self-signed gateway certificates; off by default.
	#[serde(default)]
	pub insecure_skip_tls_verify: bool,
	/// Poll interval in seconds. Cycles never overlap; a slow cycle delays
	/// the next tick.
	#[serde(default = "default_interval")]
	pub interval_secs: u64,
}

const KNOWN_KEYS: [&str; 9] = [
	"debug",
	"verbose",
	"gateway",
	"cluster",
	"pools",
	"mdmuser",
	"mdmpassword",
	"insecure_skip_tls_verify",
	"interval_secs",
];

impl Config {
	/// Loads the config file. Returns the config plus any unknown top-level
	/// keys, which the caller should log once logging is up; unknown keys are
	/// ignored, not rejected.
	pub fn load(path: &Path) -> anyhow::Result<(Self, Vec<String>)> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("failed to read config file {}", path.display()))?;
		Self::parse(&content)
	}

	fn parse(content: &str) -> anyhow::Result<(Self, Vec<String>)> {
		let value: toml::Value = content.parse().context("invalid TOML in config file")?;

		let unknown_keys = value
			.as_table()
			.map(|table| {
				table
					.keys()
					.filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
					.cloned()
					.collect()
			})
			.unwrap_or_default();

		let config: Config = value.try_into().context("invalid config file")?;
		Ok((config, unknown_keys))
	}

	/// The default `tracing` filter directive implied by the `debug` and
	/// `verbose` flags; `RUST_LOG` overrides it.
	pub fn default_log_filter(&self) -> &'static str {
		if self.debug {
			"debug"
		} else if self.verbose {
			"info"
		} else {
			"warn"
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const MINIMAL: &str = r#"
		gateway = "gw.example"
		mdmuser = "admin"
		mdmpassword = "hunter2"
	"#;

	#[test]
	fn minimal_config_uses_defaults() {
		let (config, unknown) = Config::parse(MINIMAL).unwrap();
		assert!(!config.debug);
		assert!(!config.verbose);
		assert_eq!(config.cluster, "myCluster");
		assert!(config.pools.is_empty());
		assert!(!config.insecure_skip_tls_verify);
		assert_eq!(config.interval_secs, 60);
		assert!(unknown.is_empty());
	}

	#[test]
	fn full_config_parses() {
		let (config, unknown) = Config::parse(
			r#"
			debug = true
			verbose = true
			gateway = "gw.example:8443"
			cluster = "prod"
			pools = ["poolA", "poolB"]
			mdmuser = "admin"
			mdmpassword = "hunter2"
			insecure_skip_tls_verify = true
			interval_secs = 30
			"#,
		)
		.unwrap();
		assert_eq!(config.gateway, "gw.example:8443");
		assert_eq!(config.cluster, "prod");
		assert_eq!(config.pools, vec!["poolA", "poolB"]);
		assert_eq!(config.mdmpassword.expose(), "hunter2");
		assert!(config.insecure_skip_tls_verify);
		assert_eq!(config.interval_secs, 30);
		assert!(unknown.is_empty());
	}

	#[test]
	fn unknown_keys_are_collected_not_rejected() {
		let content = format!("{MINIMAL}\nfrobnicate = 1\n");
		let (_, unknown) = Config::parse(&content).unwrap();
		assert_eq!(unknown, vec!["frobnicate".to_string()]);
	}

	#[test]
	fn missing_gateway_is_an_error() {
		let result = Config::parse("mdmuser = \"admin\"\nmdmpassword = \"pw\"\n");
		assert!(result.is_err());
	}

	#[test]
	fn password_is_redacted_in_debug_output() {
		let (config, _) = Config::parse(MINIMAL).unwrap();
		let rendered = format!("{config:?}");
		assert!(!rendered.contains("hunter2"));
		assert!(rendered.contains("[REDACTED]"));
	}

	#[test]
	fn log_filter_follows_flags() {
		let (mut config, _) = Config::parse(MINIMAL).unwrap();
		assert_eq!(config.default_log_filter(), "warn");
		config.verbose = true;
		assert_eq!(config.default_log_filter(), "info");
		config.debug = true;
		assert_eq!(config.default_log_filter(), "debug");
	}

	#[test]
	fn load_reads_from_disk() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("agent.toml");
		std::fs::write(&path, MINIMAL).unwrap();

		let (config, _) = Config::load(&path).unwrap();
		assert_eq!(config.gateway, "gw.example");
	}
}
