//! Normalization of Pinterest `user_account` payloads into [`Profile`] records.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, auth::AccountId, error::ProfileError};

/// Provider tag stamped on every normalized profile.
pub const PROVIDER: &str = "pinterest";

const BUSINESS_ACCOUNT: &str = "BUSINESS";

/// Canonical identity record produced from a Pinterest account payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Profile {
	/// Always [`PROVIDER`].
	pub provider: &'static str,
	/// Numeric Pinterest account id.
	pub id: AccountId,
	/// Username, or `"<business_name> <username> (Business)"` for business accounts.
	///
	/// A business account without a username omits that slot (`"<business_name> (Business)"`).
	pub display_name: Option<String>,
	/// Response body exactly as received.
	pub raw: String,
	/// Parsed payload, for callers that need fields beyond the normalized ones.
	pub json: Value,
}
impl Profile {
	/// Parses and validates a raw `user_account` response body.
	pub fn parse(raw: String) -> Result<Self, ProfileError> {
		let json: Value =
			serde_json::from_str(&raw).map_err(|source| ProfileError::Parse { source })?;

		if is_empty(&json) {
			return Err(ProfileError::EmptyResponse);
		}

		let Value::Object(record) = &json else {
			return Err(ProfileError::InvalidIdentifier { value: None });
		};
		let id = account_id(record)?;
		let display_name = display_name(record);

		Ok(Self { provider: PROVIDER, id, display_name, raw, json })
	}

	/// Returns a string field from the parsed payload.
	pub fn field(&self, name: &str) -> Option<&str> {
		self.json.get(name).and_then(Value::as_str)
	}

	/// Returns `true` when Pinterest reports a business account.
	pub fn is_business(&self) -> bool {
		self.field("account_type") == Some(BUSINESS_ACCOUNT)
	}
}

fn is_empty(json: &Value) -> bool {
	match json {
		Value::Null => true,
		Value::Bool(flag) => !flag,
		Value::Number(n) => n.as_f64() == Some(0.0),
		Value::String(s) => s.is_empty(),
		Value::Object(_) | Value::Array(_) => false,
	}
}

fn account_id(record: &Map<String, Value>) -> Result<AccountId, ProfileError> {
	let Some(value) = record.get("id") else {
		return Err(ProfileError::InvalidIdentifier { value: None });
	};

	AccountId::from_json(value)
		.map_err(|_| ProfileError::InvalidIdentifier { value: Some(value.to_string()) })
}

fn display_name(record: &Map<String, Value>) -> Option<String> {
	let username = record.get("username").and_then(Value::as_str);

	if record.get("account_type").and_then(Value::as_str) != Some(BUSINESS_ACCOUNT) {
		return username.map(str::to_owned);
	}

	let business_name =
		record.get("business_name").map(render_business_name).unwrap_or_default();
	let label = match username {
		Some(username) => format!("{business_name} {username} (Business)"),
		None => format!("{business_name} (Business)"),
	};

	Some(label.trim().to_owned())
}

// Falsy values render as nothing; other scalars use their JSON text.
fn render_business_name(value: &Value) -> String {
	match value {
		Value::String(name) => name.clone(),
		Value::Number(n) if n.as_f64() != Some(0.0) => n.to_string(),
		Value::Bool(true) => "true".to_owned(),
		_ => String::new(),
	}
}
