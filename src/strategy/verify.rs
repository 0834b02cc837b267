//! Host verification hook invoked once a Pinterest profile has been normalized.

// self
use crate::{_prelude::*, auth::TokenGrant, strategy::Profile};

/// Boxed future returned by [`Verify::verify`].
pub type VerifyFuture<'a, U> =
	Pin<Box<dyn Future<Output = Result<VerifyOutcome<U>>> + 'a + Send>>;

/// Decision reported by a verify callback.
#[derive(Clone, Debug, PartialEq)]
pub enum VerifyOutcome<U> {
	/// The host resolved the Pinterest account to one of its users.
	Authenticated {
		/// Host user record.
		user: U,
		/// Optional extra information forwarded to the host framework.
		info: Option<serde_json::Value>,
	},
	/// The host declined the account without raising an error.
	Rejected {
		/// Optional reason forwarded to the host framework.
		info: Option<serde_json::Value>,
	},
}
impl<U> VerifyOutcome<U> {
	/// Shorthand for an [`Authenticated`](Self::Authenticated) outcome without extra info.
	pub fn authenticated(user: U) -> Self {
		Self::Authenticated { user, info: None }
	}

	/// Shorthand for a [`Rejected`](Self::Rejected) outcome without extra info.
	pub fn rejected() -> Self {
		Self::Rejected { info: None }
	}

	/// Returns the authenticated user, if any.
	pub fn user(&self) -> Option<&U> {
		match self {
			Self::Authenticated { user, .. } => Some(user),
			Self::Rejected { .. } => None,
		}
	}
}

/// Resolves tokens plus a normalized [`Profile`] to a host user.
///
/// Any `Fn(TokenGrant, Profile) -> impl Future<Output = Result<VerifyOutcome<U>>>` closure
/// implements this trait. Failures should be wrapped with [`Error::verify`].
pub trait Verify<U>
where
	Self: Send + Sync,
{
	/// Runs the host's account lookup.
	fn verify(&self, grant: TokenGrant, profile: Profile) -> VerifyFuture<'_, U>;
}
impl<U, F, Fut> Verify<U> for F
where
	F: Send + Sync + Fn(TokenGrant, Profile) -> Fut,
	Fut: 'static + Send + Future<Output = Result<VerifyOutcome<U>>>,
{
	fn verify(&self, grant: TokenGrant, profile: Profile) -> VerifyFuture<'_, U> {
		Box::pin(self(grant, profile))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn outcome_helpers_expose_the_user() {
		let outcome = VerifyOutcome::authenticated("user-1");

		assert_eq!(outcome.user(), Some(&"user-1"));
		assert_eq!(VerifyOutcome::<&str>::rejected().user(), None);
	}

	#[tokio::test]
	async fn closures_implement_verify() {
		let verify = |grant: TokenGrant, profile: Profile| async move {
			Ok::<_, Error>(VerifyOutcome::authenticated(format!(
				"{}:{}",
				profile.id,
				grant.access_token.expose()
			)))
		};
		let profile = Profile::parse("{\"id\":\"42\",\"username\":\"alice\"}".into())
			.expect("Profile fixture should normalize.");
		let outcome = Verify::verify(&verify, TokenGrant::new("token-1"), profile)
			.await
			.expect("Closure verify should succeed.");

		assert_eq!(outcome.user().map(String::as_str), Some("42:token-1"));
	}
}
