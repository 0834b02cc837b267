//! Pinterest sign-in strategy built on top of the generic [`OAuth2Client`].
//!
//! [`StrategyBuilder`] validates options and wires a verify callback; the resulting
//! [`PinterestStrategy`] drives the authorization redirect, the code exchange, and profile
//! retrieval. Every operation is stateless, so one strategy can serve any number of concurrent
//! sign-ins.

pub mod profile;
pub mod session;
pub mod verify;

pub use profile::*;
pub use session::*;
pub use verify::*;

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use oauth2::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::TokenGrant,
	config::{StrategyConfig, StrategyOptions},
	error::{ConfigError, ProfileError},
	http::ProviderHttpClient,
	oauth::{OAuth2Client, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan, record_flow_outcome},
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Strategy specialized for the crate's default reqwest transport stack.
pub type ReqwestPinterestStrategy<U> =
	PinterestStrategy<U, ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Collects options and the verify callback before building a [`PinterestStrategy`].
pub struct StrategyBuilder<U> {
	options: StrategyOptions,
	verify: Option<Arc<dyn Verify<U>>>,
}
impl<U> StrategyBuilder<U> {
	/// Starts a builder from typed options.
	pub fn new(options: StrategyOptions) -> Self {
		Self { options, verify: None }
	}

	/// Starts a builder from a JSON options object.
	pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
		Ok(Self::new(StrategyOptions::from_value(value)?))
	}

	/// Registers the callback that resolves Pinterest accounts to host users.
	pub fn verify(mut self, verify: impl 'static + Verify<U>) -> Self {
		self.verify = Some(Arc::new(verify));

		self
	}

	/// Builds a strategy that reuses the caller-provided transport + mapper pair.
	pub fn build_with_http_client<C, M>(
		self,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<PinterestStrategy<U, C, M>>
	where
		C: ?Sized + ProviderHttpClient,
		M: ?Sized + TransportErrorMapper<C::TransportError>,
	{
		let verify = self.verify.ok_or(ConfigError::MissingVerify)?;
		let config = StrategyConfig::try_from(self.options)?;
		let mut client = OAuth2Client::<C, M>::new(&config.client_options(), http_client, mapper)?;

		client.use_authorization_header_for_get(true);

		let profile_url = Url::parse(&config.profile_url)
			.map_err(|source| ConfigError::InvalidEndpoint { field: "profileURL", source })?;
		let credential_headers =
			credential_headers(&config.client_id, config.client_secret.expose())?;

		Ok(PinterestStrategy {
			config: Arc::new(config),
			client: Arc::new(client),
			profile_url,
			credential_headers: Arc::new(credential_headers),
			verify,
		})
	}
}
#[cfg(feature = "reqwest")]
impl<U> StrategyBuilder<U> {
	/// Builds a strategy backed by a default reqwest transport.
	pub fn build(self) -> Result<ReqwestPinterestStrategy<U>> {
		self.build_with_http_client(ReqwestHttpClient::default(), ReqwestTransportErrorMapper)
	}
}
impl<U> Debug for StrategyBuilder<U> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyBuilder")
			.field("options", &self.options)
			.field("verify_set", &self.verify.is_some())
			.finish()
	}
}

/// Pinterest OAuth 2.0 sign-in strategy.
///
/// Holds immutable configuration, the generic OAuth client, and a precomputed
/// `Authorization: Basic` header that is attached to every profile request next to the
/// `Bearer` access token.
pub struct PinterestStrategy<U, C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	config: Arc<StrategyConfig>,
	client: Arc<OAuth2Client<C, M>>,
	profile_url: Url,
	credential_headers: Arc<HeaderMap>,
	verify: Arc<dyn Verify<U>>,
}
impl<U, C, M> PinterestStrategy<U, C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Strategy name used by host frameworks to select it.
	pub const NAME: &'static str = "pinterest";

	/// Returns [`Self::NAME`].
	pub fn name(&self) -> &'static str {
		Self::NAME
	}

	/// Validated configuration.
	pub fn config(&self) -> &StrategyConfig {
		&self.config
	}

	/// Underlying generic OAuth client.
	pub fn oauth_client(&self) -> &OAuth2Client<C, M> {
		&self.client
	}

	/// Builds the authorization redirect.
	///
	/// Uses the configured `state` when present and a fresh random value otherwise.
	pub fn authorization_request(&self) -> AuthorizationRequest {
		let span = FlowSpan::new(FlowKind::Authorize, "authorization_request");

		record_flow_outcome(FlowKind::Authorize, FlowOutcome::Attempt);

		let state = self.config.state.clone().unwrap_or_else(session::random_state);
		let authorize_url = self.client.authorize_url(self.config.scope_param().as_deref(), &state);

		span.note("authorize URL built");
		record_flow_outcome(FlowKind::Authorize, FlowOutcome::Success);

		AuthorizationRequest::new(authorize_url, state, self.config.session_key.clone())
	}

	/// Exchanges an authorization code for tokens.
	pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant> {
		obs::observe(FlowKind::ExchangeCode, "exchange_code", self.client.exchange_code(code)).await
	}

	/// Fetches and normalizes the Pinterest account behind `access_token`.
	///
	/// Performs exactly one GET per call and never caches the result.
	pub async fn user_profile(&self, access_token: &str) -> Result<Profile> {
		obs::observe(FlowKind::UserProfile, "user_profile", self.fetch_profile(access_token)).await
	}

	/// Runs the callback pipeline: code exchange, profile retrieval, then the verify callback.
	pub async fn authenticate(&self, code: &str) -> Result<VerifyOutcome<U>> {
		obs::observe(FlowKind::Authenticate, "authenticate", self.run_callback(code)).await
	}

	async fn fetch_profile(&self, access_token: &str) -> Result<Profile> {
		let raw = self
			.client
			.get(&self.profile_url, access_token, &self.credential_headers)
			.await
			.map_err(|source| ProfileError::Fetch { source })?;

		Ok(Profile::parse(raw)?)
	}

	async fn run_callback(&self, code: &str) -> Result<VerifyOutcome<U>> {
		let grant = self.exchange_code(code).await?;
		let profile = self.user_profile(grant.access_token.expose()).await?;

		self.verify.verify(grant, profile).await
	}
}
impl<U, C, M> Clone for PinterestStrategy<U, C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			config: Arc::clone(&self.config),
			client: Arc::clone(&self.client),
			profile_url: self.profile_url.clone(),
			credential_headers: Arc::clone(&self.credential_headers),
			verify: Arc::clone(&self.verify),
		}
	}
}
impl<U, C, M> Debug for PinterestStrategy<U, C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PinterestStrategy")
			.field("name", &Self::NAME)
			.field("config", &self.config)
			.field("profile_url", &self.profile_url.as_str())
			.finish()
	}
}

fn credential_headers(client_id: &str, client_secret: &str) -> Result<HeaderMap, ConfigError> {
	let encoded = STANDARD.encode(format!("{client_id}:{client_secret}"));
	let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
		.map_err(|source| ConfigError::InvalidCredentialHeader { source })?;
	let mut headers = HeaderMap::new();

	value.set_sensitive(true);
	headers.append(AUTHORIZATION, value);

	Ok(headers)
}
