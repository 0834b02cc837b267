//! Ordered scope lists joined with a provider-specific separator.

// std
use std::slice::Iter;
// crates.io
use serde::{Deserializer, Serializer, de::Error as DeError, ser::SerializeSeq};
// self
use crate::_prelude::*;

/// Errors emitted when validating scopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ScopeValidationError {
	/// Empty scope entries are not allowed.
	#[error("Scope entries cannot be empty.")]
	Empty,
}

/// Ordered list of OAuth scopes.
///
/// Integrators may supply either a single pre-joined string or a sequence of entries. Order is
/// preserved and duplicates are dropped after their first occurrence, so
/// [`join`](Self::join) renders exactly what the integrator asked for.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScopeList(Vec<String>);
impl ScopeList {
	/// Creates a scope list from any iterator, keeping first occurrences in order.
	pub fn new<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut list = Vec::new();

		for scope in scopes {
			let owned: String = scope.into();

			if owned.is_empty() {
				return Err(ScopeValidationError::Empty);
			}
			if !list.contains(&owned) {
				list.push(owned);
			}
		}

		Ok(Self(list))
	}

	/// Number of distinct scope entries.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no scopes are defined.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if the list contains the provided scope.
	pub fn contains(&self, scope: &str) -> bool {
		self.0.iter().any(|candidate| candidate == scope)
	}

	/// Iterator over scope entries in their original order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|s| s.as_str())
	}

	/// Joins the entries with `separator`, or returns `None` when the list is empty.
	pub fn join(&self, separator: &str) -> Option<String> {
		if self.is_empty() { None } else { Some(self.0.join(separator)) }
	}

	/// Returns the underlying slice of scope strings.
	pub fn as_slice(&self) -> &[String] {
		&self.0
	}
}
impl Display for ScopeList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0.join(" "))
	}
}
impl TryFrom<Vec<String>> for ScopeList {
	type Error = ScopeValidationError;

	fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl FromStr for ScopeList {
	type Err = ScopeValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new([s])
	}
}

/// Iterator over scope strings.
pub struct ScopeIter<'a> {
	inner: Iter<'a, String>,
}
impl<'a> Iterator for ScopeIter<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|s| s.as_str())
	}
}
impl<'a> IntoIterator for &'a ScopeList {
	type IntoIter = ScopeIter<'a>;
	type Item = &'a str;

	fn into_iter(self) -> Self::IntoIter {
		ScopeIter { inner: self.0.iter() }
	}
}
impl Serialize for ScopeList {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut seq = serializer.serialize_seq(Some(self.0.len()))?;

		for scope in self.0.iter() {
			seq.serialize_element(scope)?;
		}

		seq.end()
	}
}
impl<'de> Deserialize<'de> for ScopeList {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			One(String),
			Many(Vec<String>),
		}

		let list = match Raw::deserialize(deserializer)? {
			Raw::One(value) => ScopeList::new([value]),
			Raw::Many(values) => ScopeList::new(values),
		};

		list.map_err(DeError::custom)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn join_preserves_order_and_drops_duplicates() {
		let scope = ScopeList::new(["user_accounts:read", "boards:read", "user_accounts:read"])
			.expect("Scope fixture should be valid.");

		assert_eq!(scope.len(), 2);
		assert_eq!(scope.join(","), Some("user_accounts:read,boards:read".into()));
		assert_eq!(scope.join(" "), Some("user_accounts:read boards:read".into()));
		assert!(scope.contains("boards:read"));
	}

	#[test]
	fn empty_lists_join_to_none_and_empty_entries_fail() {
		assert_eq!(ScopeList::default().join(","), None);
		assert_eq!(ScopeList::new(["pins:read", ""]), Err(ScopeValidationError::Empty));
	}

	#[test]
	fn deserializes_from_string_or_sequence() {
		let single: ScopeList = serde_json::from_str("\"user_accounts:read,pins:read\"")
			.expect("String scopes should deserialize.");

		assert_eq!(single.join(","), Some("user_accounts:read,pins:read".into()));

		let many: ScopeList = serde_json::from_str("[\"user_accounts:read\",\"pins:read\"]")
			.expect("Sequence scopes should deserialize.");

		assert_eq!(many.join(","), Some("user_accounts:read,pins:read".into()));
		assert!(serde_json::from_str::<ScopeList>("[\"\"]").is_err());
		assert!(serde_json::from_str::<ScopeList>("42").is_err());
	}
}
