// Copyright (c) 2025 the siometer authors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Gateway client implementation.

use std::time::Duration;

use reqwest::header::CONNECTION;
use reqwest::{Client, Response, StatusCode};
use serde_json::json;
use tracing::{debug, error, instrument, trace};

use crate::error::GatewayError;
use crate::types::{PoolIdentity, RawPoolStatistics, SessionToken};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The per-pool statistics properties requested in one query covering all
/// pools: ten capacity fields plus five bandwidth-counter groups.
pub const STATISTICS_PROPERTIES: [&str; 15] = [
	"maxCapacityInKb",
	"capacityAvailableForVolumeAllocationInKb",
	"capacityInUseInKb",
	"thinCapacityAllocatedInKm",
	"thickCapacityInUseInKb",
	"snapCapacityInUseOccupiedInKb",
	"unreachableUnusedCapacityInKb",
	"degradedHealthyCapacityInKb",
	"failedCapacityInKb",
	"spareCapacityInKb",
	"primaryReadBwc",
	"primaryWriteBwc",
	"rebalanceReadBwc",
	"fwdRebuildReadBwc",
	"bckRebuildReadBwc",
];

/// TLS certificate verification policy for gateway connections.
///
/// `DangerousNoVerify` disables certificate validation entirely. Gateways are
/// frequently deployed with self-signed certificates, so this is offered as an
/// explicit opt-in; it trades away any protection against a man-in-the-middle
/// between the agent and the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsPolicy {
	#[default]
	Verify,
	DangerousNoVerify,
}

/// Client for the MDM gateway REST API.
///
/// One instance is shared across poll cycles; sessions are not. Every request
/// carries `Connection: close` and the client keeps no idle connections, so
/// no connection is reused across calls.
#[derive(Debug, Clone)]
pub struct GatewayClient {
	http_client: Client,
	username: String,
	password: String,
	base_url: String,
}

impl GatewayClient {
	/// Creates a client for the gateway at `address` (host or host:port).
	pub fn new(
		address: impl Into<String>,
		username: impl Into<String>,
		password: impl Into<String>,
		tls: TlsPolicy,
	) -> Result<Self, GatewayError> {
		let http_client = Client::builder()
			.timeout(REQUEST_TIMEOUT)
			.pool_max_idle_per_host(0)
			.danger_accept_invalid_certs(tls == TlsPolicy::DangerousNoVerify)
			.build()?;

		Ok(Self {
			http_client,
			username: username.into(),
			password: password.into(),
			base_url: format!("https://{}", address.into()),
		})
	}

	/// Sets a custom base URL, scheme included (useful for testing).
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Opens a session. The response body is the session token, which is
	/// used as the basic-auth password on every subsequent call.
	#[instrument(skip(self))]
	pub async fn login(&self) -> Result<SessionToken, GatewayError> {
		let url = format!("{}/api/login", self.base_url);
		let response = self.get(&url, &self.password).await?;

		let status = response.status();
		if status == StatusCode::UNAUTHORIZED {
			error!("gateway rejected the MDM credentials");
			return Err(GatewayError::Authentication);
		}
		check_status(status)?;

		let body = response.text().await?;
		trace!("received session token");
		Ok(SessionToken::new(body))
	}

	/// Fetches the full storage-pool inventory.
	#[instrument(skip(self, session))]
	pub async fn list_pools(
		&self,
		session: &SessionToken,
	) -> Result<Vec<PoolIdentity>, GatewayError> {
		let url = format!("{}/api/types/StoragePool/instances", self.base_url);
		let response = self.get(&url, session.as_str()).await?;

		check_session_status(response.status())?;

		let body = response.text().await?;
		let pools: Vec<PoolIdentity> = serde_json::from_str(&body)
			.map_err(|e| GatewayError::MalformedResponse(format!("pool inventory: {e}")))?;

		debug!(count = pools.len(), "listed storage pools");
		Ok(pools)
	}

	/// Queries the selected statistics for all pools in one call.
	#[instrument(skip(self, session))]
	pub async fn query_statistics(
		&self,
		session: &SessionToken,
	) -> Result<RawPoolStatistics, GatewayError> {
		let url = format!(
			"{}/api/types/StoragePool/instances/action/querySelectedStatistics",
			self.base_url
		);
		let body = json!({
			"allIds": "",
			"properties": STATISTICS_PROPERTIES,
		});

		debug!(url = %url, "POST");
		let response = self
			.http_client
			.post(&url)
			.basic_auth(&self.username, Some(session.as_str()))
			.header(CONNECTION, "close")
			.json(&body)
			.send()
			.await
			.map_err(|e| {
				error!(error = %e, "error reaching the gateway");
				GatewayError::Connection(e)
			})?;

		check_session_status(response.status())?;

		let body = response.text().await?;
		let stats: RawPoolStatistics = serde_json::from_str(&body)
			.map_err(|e| GatewayError::MalformedResponse(format!("pool statistics: {e}")))?;

		debug!(pools = stats.len(), "received pool statistics");
		Ok(stats)
	}

	/// Invalidates the session on the gateway side.
	#[instrument(skip(self, session))]
	pub async fn logout(&self, session: &SessionToken) -> Result<(), GatewayError> {
		let url = format!("{}/api/logout", self.base_url);
		let response = self.get(&url, session.as_str()).await?;

		check_session_status(response.status())?;
		debug!("session closed");
		Ok(())
	}

	async fn get(&self, url: &str, password: &str) -> Result<Response, GatewayError> {
		debug!(url = %url, "GET");
		self.http_client
			.get(url)
			.basic_auth(&self.username, Some(password))
			.header(CONNECTION, "close")
			.send()
			.await
			.map_err(|e| {
				error!(error = %e, "error reaching the gateway");
				GatewayError::Connection(e)
			})
	}
}

fn check_status(status: StatusCode) -> Result<(), GatewayError> {
	if status.is_success() {
		Ok(())
	} else {
		error!(status = status.as_u16(), "gateway returned an error status");
		Err(GatewayError::Api {
			status: status.as_u16(),
		})
	}
}

/// 401 after login means the session is gone; everything else non-2xx is a
/// plain API error.
fn check_session_status(status: StatusCode) -> Result<(), GatewayError> {
	if status == StatusCode::UNAUTHORIZED {
		error!("gateway session expired or invalid");
		return Err(GatewayError::SessionExpired);
	}
	check_status(status)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_client_defaults_to_https() {
		let client =
			GatewayClient::new("gateway.example:443", "admin", "pw", TlsPolicy::Verify).unwrap();
		assert_eq!(client.base_url, "https://gateway.example:443");
	}

	#[test]
	fn test_with_base_url() {
		let client = GatewayClient::new("gw", "admin", "pw", TlsPolicy::Verify)
			.unwrap()
			.with_base_url("http://127.0.0.1:8080");
		assert_eq!(client.base_url, "http://127.0.0.1:8080");
	}

	#[test]
	fn statistics_properties_cover_all_counter_groups() {
		assert_eq!(STATISTICS_PROPERTIES.len(), 15);
		for group in [
			"primaryReadBwc",
			"primaryWriteBwc",
			"rebalanceReadBwc",
			"fwdRebuildReadBwc",
			"bckRebuildReadBwc",
		] {
			assert!(STATISTICS_PROPERTIES.contains(&group));
		}
	}

	#[test]
	fn session_status_maps_401_to_expiry() {
		assert!(matches!(
			check_session_status(StatusCode::UNAUTHORIZED),
			Err(GatewayError::SessionExpired)
		));
		assert!(matches!(
			check_session_status(StatusCode::INTERNAL_SERVER_ERROR),
			Err(GatewayError::Api { status: 500 })
		));
		assert!(check_session_status(StatusCode::OK).is_ok());
	}
}
