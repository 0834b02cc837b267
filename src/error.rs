//! Strategy-level error types shared across construction, token exchange, and profile retrieval.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical strategy error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem detected while constructing the strategy.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Profile retrieval or normalization failed.
	#[error(transparent)]
	Profile(#[from] ProfileError),
	/// Temporary upstream failure reported by the token endpoint.
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS) while calling the token endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Provider rejected the grant (e.g., bad or reused authorization code).
	#[error("Provider rejected the grant: {reason}.")]
	InvalidGrant {
		/// Provider- or strategy-supplied reason string.
		reason: String,
	},
	/// Client authentication failed or credentials are malformed.
	#[error("Client authentication failed: {reason}.")]
	InvalidClient {
		/// Provider- or strategy-supplied reason string.
		reason: String,
	},
	/// The host verify callback reported a failure.
	#[error("Verify callback failed.")]
	Verify {
		/// Error raised by the callback.
		#[source]
		source: BoxError,
	},
}
impl Error {
	/// Wraps an error raised inside a verify callback.
	pub fn verify(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Verify { source: Box::new(src) }
	}
}

/// Construction-time failures; the strategy is never usable when one of these is raised.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Options were not supplied as a structured object.
	#[error("Please pass the options as an object.")]
	OptionsNotObject,
	/// A recognized option carried a value of the wrong type.
	#[error("Option `{field}` has an invalid value.")]
	InvalidOption {
		/// Option name as spelled by integrators (e.g. `tokenURL`).
		field: String,
		/// Underlying deserialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// A required option is absent or empty.
	#[error("Please pass a string to options.{field}.")]
	MissingOption {
		/// Option name.
		field: &'static str,
	},
	/// An optional string option was supplied but is empty.
	#[error("Please pass a non-empty string to options.{field}.")]
	EmptyOption {
		/// Option name.
		field: &'static str,
	},
	/// No verify callback was registered before building the strategy.
	#[error("Please pass the verify callback.")]
	MissingVerify,
	/// Client credentials cannot be encoded as an HTTP header value.
	#[error("Client credentials cannot be encoded as an Authorization header.")]
	InvalidCredentialHeader {
		/// Underlying header validation failure.
		#[source]
		source: oauth2::http::header::InvalidHeaderValue,
	},
	/// An endpoint option is not a valid URL; raised by the OAuth client constructor.
	#[error("Option `{field}` is not a valid URL.")]
	InvalidEndpoint {
		/// Option name.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised while retrieving and normalizing the Pinterest account profile.
#[derive(Debug, ThisError)]
pub enum ProfileError {
	/// The profile request could not be completed.
	#[error("Failed to fetch user profile.")]
	Fetch {
		/// Transport or HTTP status failure.
		#[source]
		source: FetchError,
	},
	/// The response body is not valid JSON.
	#[error("Failed to parse user profile.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// The response parsed but carried no usable data.
	#[error("Pinterest API returned an empty response.")]
	EmptyResponse,
	/// The `id` field is missing or not a decimal string.
	#[error("Invalid Pinterest user ID format.")]
	InvalidIdentifier {
		/// Offending value as it appeared in the payload, if any.
		value: Option<String>,
	},
}

/// Causes wrapped by [`ProfileError::Fetch`].
#[derive(Debug, ThisError)]
pub enum FetchError {
	/// Transport layer failed before an HTTP response arrived.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The profile endpoint answered with a non-success status.
	#[error("Profile endpoint responded with HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, truncated for diagnostics.
		body: String,
	},
}

/// Temporary failure variants reported by the token endpoint.
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// Provider returned an unexpected but non-fatal response.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	TokenEndpoint {
		/// Provider- or strategy-supplied message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint responded with malformed JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}

/// Transport-level failures (network, IO, request construction).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {endpoint}.")]
	Network {
		/// Endpoint label (`token endpoint`, `profile endpoint`).
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request timed out.
	#[error("Request timed out while calling {endpoint}.")]
	Timeout {
		/// Endpoint label.
		endpoint: &'static str,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// The outgoing request could not be assembled.
	#[error("HTTP request could not be constructed.")]
	Request(#[from] oauth2::http::Error),
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
	/// Any other client-reported failure.
	#[error("HTTP client error occurred while calling {endpoint}: {message}.")]
	Other {
		/// Endpoint label.
		endpoint: &'static str,
		/// Client-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		endpoint: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}
}
