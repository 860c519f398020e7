// Copyright (c) 2025 the siometer authors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Pool selection.

use siometer_gateway::PoolIdentity;
use tracing::warn;

use crate::error::{CollectError, Result};

/// Selects the configured subset of the cluster's pool inventory.
///
/// Matching is exact and case-sensitive. A requested name with no match is
/// logged and skipped; a name matching several pools keeps every match.
/// Output order follows `requested`, not the inventory order.
pub fn select_pools(all: &[PoolIdentity], requested: &[String]) -> Result<Vec<PoolIdentity>> {
	let mut selected = Vec::new();

	for name in requested {
		let mut found = false;
		for pool in all {
			if pool.name == *name {
				selected.push(pool.clone());
				found = true;
			}
		}
		if !found {
			warn!(pool = %name, "requested pool does not exist on the cluster");
		}
	}

	if selected.is_empty() {
		return Err(CollectError::NoPoolsSelected);
	}
	Ok(selected)
}
