// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::Arc,
};
// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use parking_lot::Mutex;
// self
use oauth2_pinterest::{
	auth::TokenGrant,
	config::StrategyOptions,
	error::{Error, FetchError, ProfileError, TransportError},
	http::{ProviderHttpClient, ResponseMetadata, ResponseMetadataSlot},
	oauth::{
		TransportErrorMapper,
		oauth2::{
			AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
			http::{StatusCode, header::AUTHORIZATION},
		},
	},
	strategy::{PinterestStrategy, Profile, StrategyBuilder, VerifyOutcome},
};

const CLIENT_ID: &str = "123-456-789";
const CLIENT_SECRET: &str = "shhh-its-a-secret";

#[derive(Debug)]
enum FakeTransportError {
	Unreachable,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Unreachable => write!(f, "Host unreachable."),
		}
	}
}
impl StdError for FakeTransportError {}

#[derive(Clone, Debug)]
struct RecordedRequest {
	method: String,
	uri: String,
	authorization: Vec<String>,
	authorization_sensitive: bool,
}
impl RecordedRequest {
	fn capture(request: &HttpRequest) -> Self {
		let values = request.headers().get_all(AUTHORIZATION);

		Self {
			method: request.method().to_string(),
			uri: request.uri().to_string(),
			authorization: values
				.iter()
				.map(|value| {
					value.to_str().expect("Authorization values should be ASCII.").to_owned()
				})
				.collect(),
			authorization_sensitive: values.iter().all(|value| value.is_sensitive()),
		}
	}
}

/// Records every request and answers with a canned body, or fails when `body` is `None`.
#[derive(Clone)]
struct RecordingHttpClient {
	body: Option<&'static str>,
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
}
impl RecordingHttpClient {
	fn answering(body: &'static str) -> Self {
		Self { body: Some(body), requests: Default::default() }
	}

	fn unreachable() -> Self {
		Self { body: None, requests: Default::default() }
	}

	fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().clone()
	}
}
impl ProviderHttpClient for RecordingHttpClient {
	type Handle = RecordingHandle;
	type TransportError = FakeTransportError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		RecordingHandle { client: self.clone(), slot }
	}
}

struct RecordingHandle {
	client: RecordingHttpClient,
	slot: ResponseMetadataSlot,
}
impl<'a> AsyncHttpClient<'a> for RecordingHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		self.client.requests.lock().push(RecordedRequest::capture(&request));

		let body = self.client.body;
		let slot = self.slot.clone();

		Box::pin(async move {
			let Some(body) = body else {
				return Err(HttpClientError::Reqwest(Box::new(FakeTransportError::Unreachable)));
			};
			let mut response = HttpResponse::new(body.as_bytes().to_vec());

			*response.status_mut() = StatusCode::OK;
			slot.store(ResponseMetadata { status: Some(200) });

			Ok(response)
		})
	}
}

#[derive(Clone, Copy, Default)]
struct FakeTransportErrorMapper;
impl TransportErrorMapper<FakeTransportError> for FakeTransportErrorMapper {
	fn map_transport_error(
		&self,
		endpoint: &'static str,
		_metadata: Option<&ResponseMetadata>,
		error: HttpClientError<FakeTransportError>,
	) -> TransportError {
		match error {
			HttpClientError::Reqwest(inner) => TransportError::network(endpoint, *inner),
			other => TransportError::Other { endpoint, message: other.to_string() },
		}
	}
}

async fn verify_noop(_: TokenGrant, _: Profile) -> Result<VerifyOutcome<()>, Error> {
	Ok(VerifyOutcome::rejected())
}

fn build_strategy(
	http_client: &RecordingHttpClient,
) -> PinterestStrategy<(), RecordingHttpClient, FakeTransportErrorMapper> {
	StrategyBuilder::new(StrategyOptions::new(
		CLIENT_ID,
		CLIENT_SECRET,
		"https://www.example.net/auth/pinterest/callback",
	))
	.verify(verify_noop)
	.build_with_http_client(http_client.clone(), FakeTransportErrorMapper)
	.expect("Strategy should build with the recording transport.")
}

#[tokio::test]
async fn profile_request_carries_bearer_and_basic_credentials() {
	let http_client = RecordingHttpClient::answering("{\"id\":\"12345\",\"username\":\"alice\"}");
	let strategy = build_strategy(&http_client);
	let profile = strategy.user_profile("token-abc").await.expect("Profile should normalize.");

	assert_eq!(profile.display_name.as_deref(), Some("alice"));

	let requests = http_client.requests();

	assert_eq!(requests.len(), 1, "Exactly one GET per profile call.");

	let request = &requests[0];
	let expected_basic =
		format!("Basic {}", STANDARD.encode(format!("{CLIENT_ID}:{CLIENT_SECRET}")));

	assert_eq!(request.method, "GET");
	assert_eq!(request.uri, "https://api.pinterest.com/v5/user_account");
	assert_eq!(request.authorization, vec!["Bearer token-abc".to_owned(), expected_basic]);
	assert!(request.authorization_sensitive, "Credential headers must be marked sensitive.");
}

#[tokio::test]
async fn repeated_calls_send_identical_credentials_without_caching() {
	let http_client = RecordingHttpClient::answering("{\"id\":\"12345\",\"username\":\"alice\"}");
	let strategy = build_strategy(&http_client);
	let first = strategy.user_profile("token-abc").await.expect("First call should succeed.");
	let second = strategy.user_profile("token-abc").await.expect("Second call should succeed.");

	assert_eq!(first, second);

	let requests = http_client.requests();

	assert_eq!(requests.len(), 2, "Profiles must not be cached.");
	assert_eq!(requests[0].authorization, requests[1].authorization);
	assert_eq!(requests[1].authorization.len(), 2);
}

#[tokio::test]
async fn strategies_sharing_a_transport_keep_their_own_credentials() {
	let http_client = RecordingHttpClient::answering("{\"id\":\"12345\",\"username\":\"alice\"}");
	let first = build_strategy(&http_client);
	let second: PinterestStrategy<(), RecordingHttpClient, FakeTransportErrorMapper> =
		StrategyBuilder::new(StrategyOptions::new(
			"other-client",
			"other-secret",
			"https://www.example.net/auth/pinterest/callback",
		))
		.verify(verify_noop)
		.build_with_http_client(http_client.clone(), FakeTransportErrorMapper)
		.expect("Second strategy should build with the shared transport.");

	first.user_profile("token-1").await.expect("First strategy call should succeed.");
	second.user_profile("token-2").await.expect("Second strategy call should succeed.");
	first.user_profile("token-1").await.expect("First strategy call should succeed again.");

	let requests = http_client.requests();
	let other_basic = format!("Basic {}", STANDARD.encode("other-client:other-secret"));

	assert_eq!(requests[0].authorization, requests[2].authorization);
	assert_eq!(requests[1].authorization, vec!["Bearer token-2".to_owned(), other_basic]);
}

#[tokio::test]
async fn transport_failures_are_wrapped_as_fetch_errors() {
	let http_client = RecordingHttpClient::unreachable();
	let strategy = build_strategy(&http_client);
	let err = strategy.user_profile("token-abc").await.expect_err("Transport failure must surface.");

	match err {
		Error::Profile(ProfileError::Fetch {
			source: FetchError::Transport(TransportError::Network { endpoint, source }),
		}) => {
			assert_eq!(endpoint, "profile endpoint");
			assert_eq!(source.to_string(), "Host unreachable.");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
	assert_eq!(http_client.requests().len(), 1, "Failures are not retried.");
}
