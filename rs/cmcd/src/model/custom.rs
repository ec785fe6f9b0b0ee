use serde::{Deserialize, Serialize};

/// A non-standard key defined by the application.
///
/// Custom keys are always sent in the `CMCD-Session` header.
/// The name should carry a hyphenated, reverse-DNS prefix (ex. `com.example-myKey`)
/// so it can't collide with future revisions of CMCD; this is not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct Custom {
	pub key: String,
	pub value: CustomValue,
}

impl Custom {
	pub fn new(key: impl Into<String>, value: impl Into<CustomValue>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
		}
	}

	/// Returns true if the key follows the hyphenated prefix convention.
	pub fn is_prefixed(&self) -> bool {
		matches!(self.key.find('-'), Some(index) if index > 0 && index + 1 < self.key.len())
	}
}

/// The value of a [`Custom`] key.
///
/// Numbers are sent as-is, strings are quoted like any other string value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::From)]
#[serde(untagged)]
pub enum CustomValue {
	#[from(f64, u32, i32, u16, i16, u8, i8)]
	Number(f64),
	#[from(String, &str)]
	String(String),
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn values() {
		assert_eq!(CustomValue::from(500), CustomValue::Number(500.0));
		assert_eq!(CustomValue::from(1.5), CustomValue::Number(1.5));
		assert_eq!(CustomValue::from("abc"), CustomValue::String("abc".to_string()));
	}

	#[test]
	fn prefixed() {
		assert!(Custom::new("com.example-myKey", 1).is_prefixed());
		assert!(Custom::new("x-y", 1).is_prefixed());
		assert!(!Custom::new("myKey", 1).is_prefixed());
		assert!(!Custom::new("-myKey", 1).is_prefixed());
		assert!(!Custom::new("myKey-", 1).is_prefixed());
	}
}
