//! Pinterest sign-in for Rust services: OAuth 2.0 authorization-code flow, typed configuration,
//! and normalized account profiles on top of the `oauth2` crate.
//!
//! Start with [`strategy::StrategyBuilder`], register a [`strategy::Verify`] callback, then drive
//! [`strategy::PinterestStrategy::authorization_request`] and
//! [`strategy::PinterestStrategy::authenticate`] from your HTTP handlers.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod strategy;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::StrategyOptions,
		http::ReqwestHttpClient,
		oauth::ReqwestTransportErrorMapper,
		strategy::{ReqwestPinterestStrategy, StrategyBuilder, Verify},
	};

	/// Client id used by test fixtures.
	pub const TEST_CLIENT_ID: &str = "123-456-789";
	/// Client secret used by test fixtures.
	pub const TEST_CLIENT_SECRET: &str = "shhh-its-a-secret";
	/// Callback URL used by test fixtures.
	pub const TEST_CALLBACK_URL: &str = "https://www.example.net/auth/pinterest/callback";

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Options pointing every endpoint at `base_url` (typically an `httpmock` server).
	pub fn test_options(base_url: &str) -> StrategyOptions {
		StrategyOptions::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET, TEST_CALLBACK_URL)
			.authorization_url(format!("{base_url}/oauth/"))
			.token_url(format!("{base_url}/v5/oauth/token"))
			.profile_url(format!("{base_url}/v5/user_account"))
	}

	/// Constructs a reqwest-backed strategy from `options` using the insecure test transport.
	pub fn build_reqwest_test_strategy<U>(
		options: StrategyOptions,
		verify: impl 'static + Verify<U>,
	) -> ReqwestPinterestStrategy<U> {
		StrategyBuilder::new(options)
			.verify(verify)
			.build_with_http_client(test_reqwest_http_client(), ReqwestTransportErrorMapper)
			.expect("Test strategy should build.")
	}
}

mod _prelude {
	#[cfg(test)]
	pub use std::collections::HashMap;
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
