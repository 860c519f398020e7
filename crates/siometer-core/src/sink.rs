// Copyright (c) 2025 the siometer authors. All rights reserved.
// SPDX-License-Identifier: MIT

//! The metrics-host boundary.

use chrono::{DateTime, Utc};

use crate::error::Result;

/// One gauge observation handed to the metrics host.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
	/// Source identity: the configured cluster label.
	pub cluster: String,
	/// Plugin namespace; `"pool"` for pool gauges.
	pub plugin: &'static str,
	/// Plugin instance: the pool name.
	pub pool: String,
	/// Type instance: the metric name.
	pub metric: &'static str,
	pub value: f64,
	pub timestamp: DateTime<Utc>,
}

/// Destination for derived samples. One call per metric; no batching and no
/// ordering requirement on the host side.
pub trait MetricSink {
	fn emit(&mut self, sample: &Sample) -> Result<()>;
}

/// Captures samples in memory. Intended for tests.
#[derive(Debug, Default)]
pub struct VecSink {
	pub samples: Vec<Sample>,
}

impl MetricSink for VecSink {
	fn emit(&mut self, sample: &Sample) -> Result<()> {
		self.samples.push(sample.clone());
		Ok(())
	}
}
