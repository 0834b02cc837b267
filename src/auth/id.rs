//! Strongly typed Pinterest account identifiers.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

/// Error returned when account identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("Account identifier cannot be empty.")]
	Empty,
	/// The identifier contains a character outside `0-9`.
	#[error("Account identifier must only contain decimal digits: {value}.")]
	NotNumeric {
		/// The rejected value.
		value: String,
	},
}

/// Numeric Pinterest account identifier (`^\d+$`), kept as a string so large ids never lose
/// precision.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);
impl AccountId {
	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Reads an identifier out of a JSON value.
	///
	/// Strings are validated as-is; non-negative integers are rendered in decimal. Every other
	/// shape is rejected.
	pub fn from_json(value: &serde_json::Value) -> Result<Self, IdentifierError> {
		match value {
			serde_json::Value::String(s) => Self::new(s),
			serde_json::Value::Number(n) if n.is_u64() => Self::new(n.to_string()),
			other => Err(IdentifierError::NotNumeric { value: other.to_string() }),
		}
	}
}
impl Deref for AccountId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for AccountId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for AccountId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<AccountId> for String {
	fn from(value: AccountId) -> Self {
		value.0
	}
}
impl TryFrom<String> for AccountId {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Debug for AccountId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "AccountId({})", self.0)
	}
}
impl Display for AccountId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for AccountId {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_view(view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty);
	}
	if !view.bytes().all(|b| b.is_ascii_digit()) {
		return Err(IdentifierError::NotNumeric { value: view.to_owned() });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_require_ascii_digits() {
		let id = AccountId::new("12345").expect("Digit-only identifiers should be accepted.");

		assert_eq!(id.as_ref(), "12345");
		assert_eq!(AccountId::new(""), Err(IdentifierError::Empty));
		assert!(AccountId::new("abc123").is_err());
		assert!(AccountId::new("123 ").is_err());
		assert!(AccountId::new("-1").is_err());
		assert!(AccountId::new("1.5").is_err());
		// Arabic-Indic digits are not ASCII digits.
		assert!(AccountId::new("١٢٣").is_err());
	}

	#[test]
	fn json_numbers_are_rendered_in_decimal() {
		let id = AccountId::from_json(&serde_json::json!(549755885175_u64))
			.expect("Non-negative integers should be accepted.");

		assert_eq!(id.as_ref(), "549755885175");
		assert!(AccountId::from_json(&serde_json::json!(-7)).is_err());
		assert!(AccountId::from_json(&serde_json::json!(1.5)).is_err());
		assert!(AccountId::from_json(&serde_json::Value::Null).is_err());
		assert!(AccountId::from_json(&serde_json::json!(["123"])).is_err());
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let id: AccountId =
			serde_json::from_str("\"42\"").expect("Account id should deserialize successfully.");

		assert_eq!(id.as_ref(), "42");
		assert!(serde_json::from_str::<AccountId>("\"4x2\"").is_err());
		assert_eq!(
			serde_json::to_string(&id).expect("Account id should serialize successfully."),
			"\"42\""
		);
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<AccountId, u8> = HashMap::from_iter([(
			AccountId::new("123").expect("Account id used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("123"), Some(&7));
	}
}
