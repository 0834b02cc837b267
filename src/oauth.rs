//! Generic OAuth 2.0 client facade held by provider strategies.
//!
//! [`OAuth2Client`] owns everything a provider does not customize: authorize-URL construction,
//! the authorization-code exchange (delegated to the `oauth2` crate), and an authenticated GET
//! primitive. Providers layer their profile semantics on top by holding a client instead of
//! extending one.

pub use oauth2;

// crates.io
use oauth2::{
	AsyncHttpClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
	EndpointNotSet, EndpointSet, HttpClientError, HttpRequest, RedirectUrl, RequestTokenError,
	TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError, BasicTokenResponse},
	http::{
		HeaderMap, HeaderValue, Uri,
		header::{ACCEPT, AUTHORIZATION},
	},
};
// self
use crate::{
	_prelude::*,
	auth::{ScopeList, TokenGrant, TokenSecret},
	error::{ConfigError, FetchError, TransientError, TransportError},
	http::{ProviderHttpClient, ResponseMetadata, ResponseMetadataSlot},
};
#[cfg(feature = "reqwest")]
use crate::http::ReqwestHttpClient;

type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

const TOKEN_ENDPOINT: &str = "token endpoint";
const BODY_PREVIEW_LIMIT: usize = 256;

/// Maps HTTP transport failures into [`TransportError`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport.
	///
	/// `endpoint` is a human-readable label such as `"token endpoint"`.
	fn map_transport_error(
		&self,
		endpoint: &'static str,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> TransportError;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		endpoint: &'static str,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> TransportError {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(endpoint, meta, *inner),
			HttpClientError::Http(inner) => TransportError::Request(inner),
			HttpClientError::Io(inner) => TransportError::Io(inner),
			HttpClientError::Other(message) => TransportError::Other { endpoint, message },
			_ => TransportError::Other { endpoint, message: "unrecognized client failure".into() },
		}
	}
}

/// Settings consumed by [`OAuth2Client::new`].
#[derive(Clone, Debug)]
pub struct ClientOptions {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: TokenSecret,
	/// Authorization endpoint.
	pub authorization_url: String,
	/// Token endpoint.
	pub token_url: String,
	/// Redirect URI registered with the provider.
	pub callback_url: String,
}

/// Authorization-code client bound to one set of credentials and endpoints.
pub struct OAuth2Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	oauth_client: ConfiguredBasicClient,
	http_client: Arc<C>,
	error_mapper: Arc<M>,
	use_authorization_header_for_get: bool,
}
impl<C, M> OAuth2Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds a client, validating every endpoint URL.
	///
	/// The token endpoint is called with HTTP Basic client authentication.
	pub fn new(
		options: &ClientOptions,
		http_client: impl Into<Arc<C>>,
		error_mapper: impl Into<Arc<M>>,
	) -> Result<Self, ConfigError> {
		let auth_url = AuthUrl::new(options.authorization_url.clone())
			.map_err(|source| ConfigError::InvalidEndpoint { field: "authorizationURL", source })?;
		let token_url = TokenUrl::new(options.token_url.clone())
			.map_err(|source| ConfigError::InvalidEndpoint { field: "tokenURL", source })?;
		let redirect_url = RedirectUrl::new(options.callback_url.clone())
			.map_err(|source| ConfigError::InvalidEndpoint { field: "callbackURL", source })?;
		let oauth_client = BasicClient::new(ClientId::new(options.client_id.clone()))
			.set_client_secret(ClientSecret::new(options.client_secret.expose().to_owned()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url)
			.set_redirect_uri(redirect_url);

		Ok(Self {
			oauth_client,
			http_client: http_client.into(),
			error_mapper: error_mapper.into(),
			use_authorization_header_for_get: false,
		})
	}

	/// Chooses how [`get`](Self::get) presents the access token: an `Authorization: Bearer`
	/// header when `true`, an `access_token` query parameter otherwise.
	pub fn use_authorization_header_for_get(&mut self, enabled: bool) {
		self.use_authorization_header_for_get = enabled;
	}

	/// Returns whether GET requests carry the access token in the `Authorization` header.
	pub fn uses_authorization_header_for_get(&self) -> bool {
		self.use_authorization_header_for_get
	}

	/// Builds the authorization redirect URL.
	///
	/// `scope` is sent verbatim, so callers join multi-valued scopes with the provider's
	/// separator beforehand.
	pub fn authorize_url(&self, scope: Option<&str>, state: &str) -> Url {
		let mut request =
			self.oauth_client.authorize_url(|| CsrfToken::new(state.to_owned()));

		if let Some(scope) = scope {
			request = request.add_extra_param("scope", scope.to_owned());
		}

		let (url, _) = request.url();

		url
	}

	/// Exchanges an authorization code for tokens.
	pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant> {
		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(meta.clone());
		let response = self
			.oauth_client
			.exchange_code(AuthorizationCode::new(code.to_owned()))
			.request_async(&handle)
			.await
			.map_err(|err| self.map_request_error(meta.take(), err))?;

		Ok(map_token_response(response))
	}

	/// Performs an authenticated GET and returns the response body.
	///
	/// `extra_headers` are appended per call after the access-token header; the client itself
	/// never stores them, so instances sharing a transport cannot leak headers into each other.
	/// Non-2xx responses are reported as [`FetchError::Status`].
	pub async fn get(
		&self,
		url: &Url,
		access_token: &str,
		extra_headers: &HeaderMap,
	) -> Result<String, FetchError> {
		let request = self.build_get(url, access_token, extra_headers).map_err(TransportError::from)?;
		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(meta.clone());
		let endpoint = "profile endpoint";
		let response = handle.call(request).await.map_err(|err| {
			self.error_mapper.map_transport_error(endpoint, meta.take().as_ref(), err)
		})?;
		let status = response.status();
		let body = String::from_utf8_lossy(response.body()).into_owned();

		if !status.is_success() {
			return Err(FetchError::Status { status: status.as_u16(), body: truncate_preview(body) });
		}

		Ok(body)
	}

	fn build_get(
		&self,
		url: &Url,
		access_token: &str,
		extra_headers: &HeaderMap,
	) -> Result<HttpRequest, oauth2::http::Error> {
		let mut target = url.clone();
		let mut headers = HeaderMap::new();

		headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

		if self.use_authorization_header_for_get {
			let mut bearer = HeaderValue::from_str(&format!("Bearer {access_token}"))?;

			bearer.set_sensitive(true);
			headers.append(AUTHORIZATION, bearer);
		} else {
			target.query_pairs_mut().append_pair("access_token", access_token);
		}

		for (name, value) in extra_headers {
			headers.append(name.clone(), value.clone());
		}

		let mut request = HttpRequest::new(Vec::new());

		*request.uri_mut() = target.as_str().parse::<Uri>()?;
		*request.headers_mut() = headers;

		Ok(request)
	}

	fn map_request_error(
		&self,
		meta: Option<ResponseMetadata>,
		err: BasicRequestTokenError<HttpClientError<C::TransportError>>,
	) -> Error {
		let meta_ref = meta.as_ref();
		let status = meta_ref.and_then(|value| value.status);

		match err {
			RequestTokenError::ServerResponse(response) =>
				map_server_response_error(response, status),
			RequestTokenError::Request(error) =>
				self.error_mapper.map_transport_error(TOKEN_ENDPOINT, meta_ref, error).into(),
			RequestTokenError::Parse(source, _body) =>
				TransientError::TokenResponseParse { source, status }.into(),
			RequestTokenError::Other(message) =>
				TransientError::TokenEndpoint { message, status }.into(),
		}
	}
}
#[cfg(feature = "reqwest")]
impl OAuth2Client<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Builds a client backed by a default reqwest transport.
	pub fn with_reqwest(options: &ClientOptions) -> Result<Self, ConfigError> {
		Self::new(options, ReqwestHttpClient::default(), ReqwestTransportErrorMapper)
	}
}
impl<C, M> Debug for OAuth2Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuth2Client")
			.field("client_id", &self.oauth_client.client_id().as_str())
			.field("use_authorization_header_for_get", &self.use_authorization_header_for_get)
			.finish()
	}
}

fn map_token_response(response: BasicTokenResponse) -> TokenGrant {
	let mut grant = TokenGrant::new(response.access_token().secret().to_owned());

	if let Some(refresh) = response.refresh_token() {
		grant = grant.with_refresh_token(refresh.secret().to_owned());
	}
	if let Some(expires_in) = response.expires_in().and_then(|value| Duration::try_from(value).ok())
	{
		grant = grant.with_expires_in(expires_in);
	}

	grant.scope = response
		.scopes()
		.and_then(|scopes| ScopeList::new(scopes.iter().map(|scope| scope.as_ref())).ok());

	grant
}

fn map_server_response_error(response: BasicErrorResponse, status: Option<u16>) -> Error {
	let code = response.error().as_ref().to_owned();
	let message = match response.error_description() {
		Some(description) => format!("Token endpoint returned an OAuth error: {description}"),
		None => format!("Token endpoint returned an OAuth error: {code}"),
	};

	match code.to_ascii_lowercase().as_str() {
		"invalid_grant" | "access_denied" => Error::InvalidGrant { reason: message },
		"invalid_client" | "unauthorized_client" => Error::InvalidClient { reason: message },
		_ => TransientError::TokenEndpoint { message, status }.into(),
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(
	endpoint: &'static str,
	meta: Option<&ResponseMetadata>,
	err: ReqwestError,
) -> TransportError {
	if err.is_timeout() {
		return TransportError::Timeout {
			endpoint,
			status: meta
				.and_then(|value| value.status)
				.or_else(|| err.status().map(|code| code.as_u16())),
		};
	}

	TransportError::network(endpoint, err)
}

fn truncate_preview(body: String) -> String {
	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return body;
	}

	let mut buf: String = body.chars().take(BODY_PREVIEW_LIMIT).collect();

	buf.push('…');

	buf
}
