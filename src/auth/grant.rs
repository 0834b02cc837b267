//! Tokens issued by the authorization-code exchange.

// self
use crate::{
	_prelude::*,
	auth::{ScopeList, TokenSecret},
};

/// Tokens returned by the token endpoint for a single authorization-code exchange.
///
/// The strategy does not persist grants; hosts decide what to keep.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenGrant {
	/// Access token presented to the Pinterest API.
	pub access_token: TokenSecret,
	/// Refresh token, when Pinterest issued one.
	pub refresh_token: Option<TokenSecret>,
	/// Scopes echoed back by the token endpoint, if any.
	pub scope: Option<ScopeList>,
	/// Instant the grant was received.
	pub issued_at: OffsetDateTime,
	/// Expiry instant derived from `expires_in`, when supplied.
	pub expires_at: Option<OffsetDateTime>,
}
impl TokenGrant {
	/// Creates a grant carrying only an access token, issued now.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			refresh_token: None,
			scope: None,
			issued_at: OffsetDateTime::now_utc(),
			expires_at: None,
		}
	}

	/// Attaches a refresh token.
	pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
		self.refresh_token = Some(TokenSecret::new(refresh_token));

		self
	}

	/// Sets the expiry relative to `issued_at`.
	pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
		self.expires_at = Some(self.issued_at + expires_in);

		self
	}

	/// Returns `true` if the access token has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| instant >= expires_at)
	}
}
impl Debug for TokenGrant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenGrant")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("scope", &self.scope)
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
