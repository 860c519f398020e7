// Copyright (c) 2025 the siometer authors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Error types for the collection pipeline.

use siometer_gateway::GatewayError;
use thiserror::Error;

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectError>;

/// Errors that abort the current poll cycle. None of them outlive the cycle:
/// the orchestrator boundary logs and discards them.
#[derive(Debug, Error)]
pub enum CollectError {
	#[error(transparent)]
	Gateway(#[from] GatewayError),

	/// None of the configured pool names matched the cluster inventory.
	#[error("no configured pool matched the cluster inventory")]
	NoPoolsSelected,

	/// The statistics response carried no record for a selected pool.
	#[error("statistics response is missing pool id {0}")]
	MissingPool(String),

	#[error("metric sink error: {0}")]
	Sink(#[from] std::io::Error),
}
