//! Authorization redirect metadata and state validation.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::_prelude::*;

const STATE_LEN: usize = 32;

/// Authorization redirect metadata returned by
/// [`PinterestStrategy::authorization_request`](crate::strategy::PinterestStrategy::authorization_request).
///
/// Hosts persist [`state`](Self::state) under [`session_key`](Self::session_key) and check it
/// with [`validate_state`](Self::validate_state) when Pinterest redirects back.
#[derive(Clone, Debug)]
pub struct AuthorizationRequest {
	/// Fully-formed authorize URL the end-user should be redirected to.
	pub authorize_url: Url,
	/// Opaque state value that must round-trip via the redirect handler.
	pub state: String,
	/// Session namespace the host should store [`state`](Self::state) under.
	pub session_key: String,
}
impl AuthorizationRequest {
	pub(super) fn new(authorize_url: Url, state: String, session_key: String) -> Self {
		Self { authorize_url, state, session_key }
	}

	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state {
			Ok(())
		} else {
			Err(Error::InvalidGrant { reason: "Authorization state mismatch.".into() })
		}
	}
}

pub(super) fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}
