/// An error produced while parsing CMCD keys, tokens, or values.
///
/// Encoding itself never fails; these only surface when building items from text.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
	#[error("unknown key: {0}")]
	UnknownKey(String),

	#[error("missing value for key: {0}")]
	MissingValue(String),

	#[error("invalid value for key {key}: {value}")]
	InvalidValue { key: String, value: String },

	#[error("unknown {kind} token: {token}")]
	UnknownToken { kind: &'static str, token: String },

	#[error("unsupported version: {0}")]
	UnsupportedVersion(u8),
}

pub type Result<T> = std::result::Result<T, Error>;
