//! Integrator-facing options and the validated, defaulted strategy configuration.
//!
//! [`StrategyOptions`] mirrors the option object integrators already know (`clientID`,
//! `callbackURL`, `profileURL`, ...) and can be parsed from JSON. [`StrategyConfig`] is the
//! immutable result of validating those options and filling in Pinterest's protocol defaults.

// crates.io
use serde::Deserializer;
// self
use crate::{
	_prelude::*,
	auth::{ScopeList, TokenSecret},
	error::ConfigError,
	oauth::ClientOptions,
};

/// Pinterest authorization page.
pub const DEFAULT_AUTHORIZATION_URL: &str = "https://www.pinterest.com/oauth/";
/// Pinterest v5 token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://api.pinterest.com/v5/oauth/token";
/// Pinterest v5 account-info endpoint.
pub const DEFAULT_PROFILE_URL: &str = "https://api.pinterest.com/v5/user_account";
/// Pinterest joins multiple scopes with commas.
pub const DEFAULT_SCOPE_SEPARATOR: &str = ",";
/// Session namespace used by hosts to stash authorization state.
pub const DEFAULT_SESSION_KEY: &str = "oauth2:pinterest";

/// Raw strategy options as supplied by the integrator.
///
/// Every field is optional at this stage; [`StrategyConfig::try_from`] enforces presence and
/// applies defaults. The five endpoint and naming overrides may be omitted but never `null`.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct StrategyOptions {
	/// Pinterest application id.
	#[serde(rename = "clientID", default, skip_serializing_if = "Option::is_none")]
	pub client_id: Option<String>,
	/// Pinterest application secret.
	#[serde(rename = "clientSecret", default, skip_serializing_if = "Option::is_none")]
	pub client_secret: Option<String>,
	/// URL Pinterest redirects to after authorization.
	#[serde(rename = "callbackURL", default, skip_serializing_if = "Option::is_none")]
	pub callback_url: Option<String>,
	/// Requested scopes, as one string or a list.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<ScopeList>,
	/// Fixed state value forwarded to the authorization request.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Authorization endpoint override.
	#[serde(
		rename = "authorizationURL",
		default,
		deserialize_with = "non_null_string",
		skip_serializing_if = "Option::is_none"
	)]
	pub authorization_url: Option<String>,
	/// Token endpoint override.
	#[serde(
		rename = "tokenURL",
		default,
		deserialize_with = "non_null_string",
		skip_serializing_if = "Option::is_none"
	)]
	pub token_url: Option<String>,
	/// Scope separator override.
	#[serde(
		rename = "scopeSeparator",
		default,
		deserialize_with = "non_null_string",
		skip_serializing_if = "Option::is_none"
	)]
	pub scope_separator: Option<String>,
	/// Session key override.
	#[serde(
		rename = "sessionKey",
		default,
		deserialize_with = "non_null_string",
		skip_serializing_if = "Option::is_none"
	)]
	pub session_key: Option<String>,
	/// Profile endpoint override.
	#[serde(
		rename = "profileURL",
		default,
		deserialize_with = "non_null_string",
		skip_serializing_if = "Option::is_none"
	)]
	pub profile_url: Option<String>,
}
impl StrategyOptions {
	/// Creates options carrying the three required values.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		callback_url: impl Into<String>,
	) -> Self {
		Self {
			client_id: Some(client_id.into()),
			client_secret: Some(client_secret.into()),
			callback_url: Some(callback_url.into()),
			..Default::default()
		}
	}

	/// Parses options from an untyped JSON value.
	///
	/// Non-object values fail with [`ConfigError::OptionsNotObject`]; a recognized field holding
	/// the wrong JSON type fails with [`ConfigError::InvalidOption`] naming that field. Unknown
	/// fields are ignored. `null` counts as absent except for the optional string overrides,
	/// which reject it.
	pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
		if !value.is_object() {
			return Err(ConfigError::OptionsNotObject);
		}

		serde_path_to_error::deserialize(value).map_err(|err| ConfigError::InvalidOption {
			field: err.path().to_string(),
			source: err.into_inner(),
		})
	}

	/// Sets the requested scopes.
	pub fn scope(mut self, scope: ScopeList) -> Self {
		self.scope = Some(scope);

		self
	}

	/// Sets a fixed authorization state value.
	pub fn state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Overrides the authorization endpoint.
	pub fn authorization_url(mut self, url: impl Into<String>) -> Self {
		self.authorization_url = Some(url.into());

		self
	}

	/// Overrides the token endpoint.
	pub fn token_url(mut self, url: impl Into<String>) -> Self {
		self.token_url = Some(url.into());

		self
	}

	/// Overrides the scope separator.
	pub fn scope_separator(mut self, separator: impl Into<String>) -> Self {
		self.scope_separator = Some(separator.into());

		self
	}

	/// Overrides the session key.
	pub fn session_key(mut self, key: impl Into<String>) -> Self {
		self.session_key = Some(key.into());

		self
	}

	/// Overrides the profile endpoint.
	pub fn profile_url(mut self, url: impl Into<String>) -> Self {
		self.profile_url = Some(url.into());

		self
	}
}
impl Debug for StrategyOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyOptions")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("callback_url", &self.callback_url)
			.field("scope", &self.scope)
			.field("state", &self.state)
			.field("authorization_url", &self.authorization_url)
			.field("token_url", &self.token_url)
			.field("scope_separator", &self.scope_separator)
			.field("session_key", &self.session_key)
			.field("profile_url", &self.profile_url)
			.finish()
	}
}
impl TryFrom<serde_json::Value> for StrategyOptions {
	type Error = ConfigError;

	fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
		Self::from_value(value)
	}
}

/// Validated strategy configuration; immutable once built.
#[derive(Clone)]
pub struct StrategyConfig {
	/// Pinterest application id.
	pub client_id: String,
	/// Pinterest application secret.
	pub client_secret: TokenSecret,
	/// Redirect URI.
	pub callback_url: String,
	/// Authorization endpoint.
	pub authorization_url: String,
	/// Token endpoint.
	pub token_url: String,
	/// Requested scopes (possibly empty).
	pub scope: ScopeList,
	/// String placed between scope entries.
	pub scope_separator: String,
	/// Session namespace for authorization state.
	pub session_key: String,
	/// Account-info endpoint.
	pub profile_url: String,
	/// Fixed state value, if the integrator supplied one.
	pub state: Option<String>,
}
impl StrategyConfig {
	/// Joined scope parameter, or `None` when no scopes were requested.
	pub fn scope_param(&self) -> Option<String> {
		self.scope.join(&self.scope_separator)
	}

	/// Settings handed to the generic OAuth client.
	pub fn client_options(&self) -> ClientOptions {
		ClientOptions {
			client_id: self.client_id.clone(),
			client_secret: self.client_secret.clone(),
			authorization_url: self.authorization_url.clone(),
			token_url: self.token_url.clone(),
			callback_url: self.callback_url.clone(),
		}
	}
}
impl TryFrom<StrategyOptions> for StrategyConfig {
	type Error = ConfigError;

	fn try_from(options: StrategyOptions) -> Result<Self, Self::Error> {
		let client_id = required(options.client_id, "clientID")?;
		let client_secret = required(options.client_secret, "clientSecret")?;
		let callback_url = required(options.callback_url, "callbackURL")?;
		let authorization_url =
			optional(options.authorization_url, "authorizationURL", DEFAULT_AUTHORIZATION_URL)?;
		let token_url = optional(options.token_url, "tokenURL", DEFAULT_TOKEN_URL)?;
		let scope_separator =
			optional(options.scope_separator, "scopeSeparator", DEFAULT_SCOPE_SEPARATOR)?;
		let session_key = optional(options.session_key, "sessionKey", DEFAULT_SESSION_KEY)?;
		let profile_url = optional(options.profile_url, "profileURL", DEFAULT_PROFILE_URL)?;

		Ok(Self {
			client_id,
			client_secret: TokenSecret::new(client_secret),
			callback_url,
			authorization_url,
			token_url,
			scope: options.scope.unwrap_or_default(),
			scope_separator,
			session_key,
			profile_url,
			state: options.state,
		})
	}
}
impl TryFrom<serde_json::Value> for StrategyConfig {
	type Error = ConfigError;

	fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
		StrategyOptions::from_value(value)?.try_into()
	}
}
impl Debug for StrategyConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyConfig")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.field("callback_url", &self.callback_url)
			.field("authorization_url", &self.authorization_url)
			.field("token_url", &self.token_url)
			.field("scope", &self.scope)
			.field("scope_separator", &self.scope_separator)
			.field("session_key", &self.session_key)
			.field("profile_url", &self.profile_url)
			.field("state", &self.state)
			.finish()
	}
}

fn non_null_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	String::deserialize(deserializer).map(Some)
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
	match value {
		Some(value) if !value.is_empty() => Ok(value),
		_ => Err(ConfigError::MissingOption { field }),
	}
}

fn optional(
	value: Option<String>,
	field: &'static str,
	default: &'static str,
) -> Result<String, ConfigError> {
	match value {
		None => Ok(default.to_owned()),
		Some(value) if value.is_empty() => Err(ConfigError::EmptyOption { field }),
		Some(value) => Ok(value),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn minimal() -> StrategyOptions {
		StrategyOptions::new(
			"client-id",
			"client-secret",
			"https://example.com/auth/pinterest/callback",
		)
	}

	#[test]
	fn defaults_fill_every_omitted_field() {
		let config = StrategyConfig::try_from(minimal()).expect("Minimal options should validate.");

		assert_eq!(config.authorization_url, DEFAULT_AUTHORIZATION_URL);
		assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
		assert_eq!(config.scope_separator, ",");
		assert_eq!(config.session_key, "oauth2:pinterest");
		assert_eq!(config.profile_url, DEFAULT_PROFILE_URL);
		assert!(config.scope.is_empty());
		assert!(config.state.is_none());
		assert_eq!(config.scope_param(), None);
	}

	#[test]
	fn explicit_values_are_kept() {
		let options = minimal()
			.authorization_url("https://auth.example.com/oauth/")
			.token_url("https://auth.example.com/token")
			.scope_separator(" ")
			.session_key("oauth2:custom")
			.profile_url("https://api.example.com/me")
			.state("fixed-state")
			.scope(
				ScopeList::new(["user_accounts:read", "pins:read"])
					.expect("Scope fixture should be valid."),
			);
		let config = StrategyConfig::try_from(options).expect("Full options should validate.");

		assert_eq!(config.authorization_url, "https://auth.example.com/oauth/");
		assert_eq!(config.token_url, "https://auth.example.com/token");
		assert_eq!(config.session_key, "oauth2:custom");
		assert_eq!(config.profile_url, "https://api.example.com/me");
		assert_eq!(config.state.as_deref(), Some("fixed-state"));
		assert_eq!(config.scope_param(), Some("user_accounts:read pins:read".into()));
	}

	#[test]
	fn each_optional_string_rejects_empty_values() {
		let cases: [(&str, fn(StrategyOptions) -> StrategyOptions); 5] = [
			("authorizationURL", |o| o.authorization_url("")),
			("tokenURL", |o| o.token_url("")),
			("scopeSeparator", |o| o.scope_separator("")),
			("sessionKey", |o| o.session_key("")),
			("profileURL", |o| o.profile_url("")),
		];

		for (expected, apply) in cases {
			let err = StrategyConfig::try_from(apply(minimal()))
				.expect_err("Empty optional strings must be rejected.");

			assert!(
				matches!(err, ConfigError::EmptyOption { field } if field == expected),
				"Unexpected error for {expected}: {err:?}."
			);
		}
	}

	#[test]
	fn required_fields_must_be_present_and_non_empty() {
		let mut options = minimal();

		options.client_id = None;

		assert!(matches!(
			StrategyConfig::try_from(options),
			Err(ConfigError::MissingOption { field: "clientID" })
		));

		let mut options = minimal();

		options.client_secret = Some(String::new());

		assert!(matches!(
			StrategyConfig::try_from(options),
			Err(ConfigError::MissingOption { field: "clientSecret" })
		));

		let mut options = minimal();

		options.callback_url = None;

		assert!(matches!(
			StrategyConfig::try_from(options),
			Err(ConfigError::MissingOption { field: "callbackURL" })
		));
	}

	#[test]
	fn json_options_are_type_checked_per_field() {
		let err = StrategyOptions::from_value(serde_json::json!("client-id"))
			.expect_err("Non-object options must be rejected.");

		assert!(matches!(err, ConfigError::OptionsNotObject));

		let err = StrategyOptions::from_value(serde_json::json!({
			"clientID": "client-id",
			"clientSecret": "client-secret",
			"callbackURL": "https://example.com/cb",
			"tokenURL": 42,
		}))
		.expect_err("Non-string tokenURL must be rejected.");

		assert!(matches!(err, ConfigError::InvalidOption { ref field, .. } if field == "tokenURL"));

		let err = StrategyOptions::from_value(serde_json::json!({
			"clientID": "client-id",
			"clientSecret": "client-secret",
			"callbackURL": "https://example.com/cb",
			"sessionKey": null,
		}))
		.expect_err("Null sessionKey must be rejected.");

		assert!(matches!(err, ConfigError::InvalidOption { ref field, .. } if field == "sessionKey"));

		let options = StrategyOptions::from_value(serde_json::json!({
			"clientID": null,
			"clientSecret": "client-secret",
			"callbackURL": "https://example.com/cb",
			"scope": ["user_accounts:read"],
			"passReqToCallback": true,
		}))
		.expect("Unknown fields should be ignored.");

		assert!(options.client_id.is_none());

		assert_eq!(
			options.scope.and_then(|scope| scope.join(",")),
			Some("user_accounts:read".into())
		);
	}

	#[test]
	fn debug_output_redacts_client_secret() {
		let config = StrategyConfig::try_from(minimal()).expect("Minimal options should validate.");
		let rendered = format!("{config:?} {:?}", minimal());

		assert!(!rendered.contains("client-secret"));
	}
}
