// Copyright (c) 2025 the siometer authors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Error types for the gateway client.

use thiserror::Error;

/// Errors that can occur when talking to the MDM gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
	/// Transport-level failure reaching the gateway.
	#[error("gateway connection error: {0}")]
	Connection(#[from] reqwest::Error),

	/// The gateway rejected the configured credentials at login (HTTP 401).
	#[error("gateway rejected the MDM credentials")]
	Authentication,

	/// HTTP 401 on an authenticated call after login; the session token is
	/// expired or invalid.
	#[error("gateway session expired or invalid")]
	SessionExpired,

	/// The gateway returned a non-401 error status.
	#[error("gateway returned HTTP {status}")]
	Api { status: u16 },

	/// The response body did not match the expected wire shape.
	#[error("malformed gateway response: {0}")]
	MalformedResponse(String),
}
