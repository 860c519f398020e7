// Copyright (c) 2025 the siometer authors. All rights reserved.
// SPDX-License-Identifier: MIT

//! collectd exec-plugin output.

use std::io::Write;

use siometer_core::{MetricSink, Result, Sample};

/// Writes each sample as one collectd `PUTVAL` line, the exec-plugin text
/// protocol:
///
/// ```text
/// PUTVAL "<cluster>/<plugin>-<pool>/gauge-<metric>" interval=<secs> <epoch>:<value>
/// ```
///
/// Lines are flushed per sample so a supervising collectd sees them as they
/// are produced, not at buffer boundaries.
pub struct PutvalSink<W: Write> {
	writer: W,
	interval_secs: u64,
}

impl<W: Write> PutvalSink<W> {
	pub fn new(writer: W, interval_secs: u64) -> Self {
		Self {
			writer,
			interval_secs,
		}
	}
}

impl<W: Write> MetricSink for PutvalSink<W> {
	fn emit(&mut self, sample: &Sample) -> Result<()> {
		writeln!(
			self.writer,
			"PUTVAL \"{}/{}-{}/gauge-{}\" interval={} {}:{}",
			sample.cluster,
			sample.plugin,
			sample.pool,
			sample.metric,
			self.interval_secs,
			sample.timestamp.timestamp(),
			sample.value,
		)?;
		self.writer.flush()?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use chrono::{TimeZone, Utc};

	use super::*;

	#[test]
	fn putval_line_has_collectd_shape() {
		let mut out = Vec::new();
		{
			let mut sink = PutvalSink::new(&mut out, 60);
			sink.emit(&Sample {
				cluster: "cluster1".to_string(),
				plugin: "pool",
				pool: "poolA".to_string(),
				metric: "raw_bytes",
				value: 1_024_000.0,
				timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
			})
			.unwrap();
		}

		let line = String::from_utf8(out).unwrap();
		assert_eq!(
			line,
			"PUTVAL \"cluster1/pool-poolA/gauge-raw_bytes\" interval=60 1700000000:1024000\n"
		);
	}

	#[test]
	fn one_line_per_sample() {
		let mut out = Vec::new();
		{
			let mut sink = PutvalSink::new(&mut out, 10);
			for metric in ["read_iops", "read_bps"] {
				sink.emit(&Sample {
					cluster: "c".to_string(),
					plugin: "pool",
					pool: "p".to_string(),
					metric,
					value: 0.0,
					timestamp: Utc.timestamp_opt(0, 0).unwrap(),
				})
				.unwrap();
			}
		}

		let text = String::from_utf8(out).unwrap();
		assert_eq!(text.lines().count(), 2);
	}
}
