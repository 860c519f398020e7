// Copyright (c) 2025 the siometer authors. All rights reserved.
// SPDX-License-Identifier: MIT

//! ScaleIO MDM gateway REST client for siometer.
//!
//! This crate provides a typed client for the management gateway's REST API:
//! session login/logout, the storage-pool inventory, and the per-pool
//! statistics query. Responses are deserialized into the wire types in
//! [`types`]; anything that does not match the expected shape surfaces as
//! [`GatewayError::MalformedResponse`] instead of a panic deep in the
//! pipeline.

pub mod client;
pub mod error;
pub mod types;

pub use client::{GatewayClient, TlsPolicy};
pub use error::GatewayError;
pub use types::{
	BandwidthCounter, PoolIdentity, PoolStatistics, RawPoolStatistics, SessionToken,
};
